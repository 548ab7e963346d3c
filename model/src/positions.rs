use std::collections::BTreeMap;

use crate::geometry::LonLat;
use crate::replay::MarkerKind;
use crate::{Route, RouteID, TimeOffset, Window};

/// Positions are precalculated at this granularity, in minutes
pub const TIME_INTERVAL: u32 = 5;

/// Where a marker is along its route at evenly spaced times through its window.
#[derive(Clone, Debug)]
pub struct PositionTable {
    window: Window,
    step: u32,
    // positions[i] is where the marker is `i * step` minutes after the window begins
    positions: Vec<LonLat>,
}

impl PositionTable {
    pub fn new(route: &Route, window: Window, step: u32) -> Self {
        let step = step.max(1);
        let duration = window.duration();
        let mut positions = Vec::new();
        if duration == 0 {
            positions.push(route.path.first_pt());
        } else {
            let mut idx = 0;
            while idx * step <= duration {
                let pct = (idx * step) as f64 / duration as f64;
                positions.push(route.path.percent_along(pct));
                idx += 1;
            }
        }
        Self {
            window,
            step,
            positions,
        }
    }

    /// Rounds to the nearest precalculated step. Times outside the window clamp to the nearest
    /// end of the table.
    pub fn position_at(&self, time: TimeOffset) -> LonLat {
        let elapsed = self.window.elapsed(time);
        let idx = ((elapsed as f64) / (self.step as f64)).round() as usize;
        self.positions[idx.min(self.positions.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// How to find a marker on its route.
pub enum Positions {
    /// Walk the route every time
    Direct,
    /// Look up a table built once up-front
    Precomputed(BTreeMap<(RouteID, MarkerKind), PositionTable>),
}

impl Positions {
    pub fn precompute(routes: &[Route], step: u32) -> Self {
        let mut tables = BTreeMap::new();
        for route in routes {
            for kind in [MarkerKind::Primary, MarkerKind::Secondary] {
                tables.insert(
                    (route.id, kind),
                    PositionTable::new(route, kind.window(route), step),
                );
            }
        }
        debug!("Precomputed positions for {} routes", routes.len());
        Self::Precomputed(tables)
    }

    /// Assumes the marker's window contains `time`
    pub fn position(&self, route: &Route, kind: MarkerKind, time: TimeOffset) -> LonLat {
        if let Positions::Precomputed(tables) = self {
            if let Some(table) = tables.get(&(route.id, kind)) {
                return table.position_at(time);
            }
            warn!("No precomputed positions for {:?} {:?}", route.id, kind);
        }
        let window = kind.window(route);
        route.path.percent_along(window.progress(time))
    }
}
