use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::LonLat;
use crate::positions::Positions;
use crate::{DayCategory, DayFilter, Model, Route, RouteID, TimeOffset, Window};

/// Marker updates closer than this to the last pushed position (in degrees) are skipped
pub const DEFAULT_PUSH_THRESHOLD: f64 = 0.0001;

/// Everything the user can change. Nothing else is mutable after loading.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub time: TimeOffset,
    pub days: DayFilter,
}

impl AppState {
    pub fn new(time: TimeOffset) -> Self {
        Self {
            time,
            days: DayFilter::new(),
        }
    }

    pub fn time_label(&self) -> String {
        format!("Time: {}", self.time)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The slider moved
    TimeChanged(TimeOffset),
    /// A day filter button was clicked
    DayToggled(DayCategory),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// The head of the procession
    Primary,
    /// Follows the `P_` window
    Secondary,
}

impl MarkerKind {
    pub fn window(self, route: &Route) -> Window {
        match self {
            MarkerKind::Primary => route.window,
            MarkerKind::Secondary => route.secondary_window,
        }
    }
}

/// Identifies one of the two moving points on a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerHandle {
    pub route: RouteID,
    pub kind: MarkerKind,
}

/// Whatever draws the map. Nothing is read back.
pub trait Renderer {
    fn set_line_visible(&mut self, route: RouteID, visible: bool);
    /// `None` means the marker shouldn't be drawn at all
    fn set_marker(&mut self, marker: MarkerHandle, pos: Option<LonLat>);
    fn set_time_label(&mut self, label: &str);
}

/// What should be on the map at one moment.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub time: TimeOffset,
    pub lines: BTreeMap<RouteID, bool>,
    pub markers: BTreeMap<MarkerHandle, Option<LonLat>>,
}

impl Frame {
    pub fn visible_routes(&self) -> Vec<RouteID> {
        self.lines
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn marker(&self, route: RouteID, kind: MarkerKind) -> Option<LonLat> {
        self.markers
            .get(&MarkerHandle { route, kind })
            .copied()
            .flatten()
    }
}

/// Recomputes route visibility and marker positions whenever the user does something, and pushes
/// the result to a `Renderer`.
pub struct Replay {
    model: Model,
    positions: Positions,
    /// If set, skip marker updates that barely moved
    push_threshold: Option<f64>,
    last_pushed: BTreeMap<MarkerHandle, Option<LonLat>>,
}

impl Replay {
    /// Interpolates along the full route on every change
    pub fn new(model: Model) -> Self {
        Self {
            model,
            positions: Positions::Direct,
            push_threshold: None,
            last_pushed: BTreeMap::new(),
        }
    }

    /// Builds position tables up-front and skips tiny marker movements
    pub fn optimized(model: Model, step: u32, push_threshold: f64) -> Self {
        let positions = Positions::precompute(&model.routes, step);
        Self {
            model,
            positions,
            push_threshold: Some(push_threshold),
            last_pushed: BTreeMap::new(),
        }
    }

    pub fn with_push_threshold(mut self, threshold: Option<f64>) -> Self {
        self.push_threshold = threshold;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Applies the event, then redraws everything.
    pub fn handle_event<R: Renderer>(
        &mut self,
        state: &mut AppState,
        event: Event,
        renderer: &mut R,
    ) {
        match event {
            Event::TimeChanged(time) => {
                state.time = time;
            }
            Event::DayToggled(day) => {
                let active = state.days.toggle(day);
                debug!("{day} is now {}", if active { "on" } else { "off" });
            }
        }
        self.refresh(state, renderer);
    }

    /// Pushes the full state for the current time and filters. Also used for the first draw.
    pub fn refresh<R: Renderer>(&mut self, state: &AppState, renderer: &mut R) {
        renderer.set_time_label(&state.time_label());

        let frame = self.frame(state);
        for (route, visible) in &frame.lines {
            renderer.set_line_visible(*route, *visible);
        }

        let mut pushed = 0;
        for (handle, pos) in frame.markers {
            if self.should_push(handle, pos) {
                renderer.set_marker(handle, pos);
                self.last_pushed.insert(handle, pos);
                pushed += 1;
            }
        }
        debug!(
            "At {}, {} routes visible, pushed {} marker updates",
            state.time,
            frame.lines.values().filter(|x| **x).count(),
            pushed
        );
    }

    /// Calculates what should be shown, without telling anybody.
    pub fn frame(&self, state: &AppState) -> Frame {
        let mut lines = BTreeMap::new();
        let mut markers = BTreeMap::new();
        for route in &self.model.routes {
            let day_active = state.days.is_active(route.day);
            lines.insert(route.id, day_active && route.window.contains(state.time));

            for kind in [MarkerKind::Primary, MarkerKind::Secondary] {
                let pos = if day_active && kind.window(route).contains(state.time) {
                    Some(self.positions.position(route, kind, state.time))
                } else {
                    None
                };
                markers.insert(
                    MarkerHandle {
                        route: route.id,
                        kind,
                    },
                    pos,
                );
            }
        }
        Frame {
            time: state.time,
            lines,
            markers,
        }
    }

    fn should_push(&self, handle: MarkerHandle, pos: Option<LonLat>) -> bool {
        let threshold = match self.push_threshold {
            Some(x) => x,
            None => return true,
        };
        match (self.last_pushed.get(&handle), pos) {
            // Never pushed
            (None, _) => true,
            (Some(Some(prev)), Some(pos)) => prev.fast_dist(pos) > threshold,
            (Some(None), None) => false,
            // Appearing or disappearing
            (Some(_), _) => true,
        }
    }
}
