use std::collections::BTreeMap;

use model::{LonLat, MarkerHandle, MarkerKind, Model, Renderer, RouteID};

use crate::config::MapStyle;

/// Stands in for a real map. Remembers what's drawn and logs every change.
pub struct LogRenderer {
    style: MapStyle,
    label: String,
    lines: BTreeMap<RouteID, bool>,
    markers: BTreeMap<MarkerHandle, LonLat>,
    updates: usize,
}

impl LogRenderer {
    pub fn new(style: MapStyle) -> Self {
        Self {
            style,
            label: String::new(),
            lines: BTreeMap::new(),
            markers: BTreeMap::new(),
            updates: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// How many times the map was asked to change something
    pub fn updates(&self) -> usize {
        self.updates
    }

    fn color(&self, kind: MarkerKind) -> &str {
        match kind {
            MarkerKind::Primary => &self.style.primary_marker_color,
            MarkerKind::Secondary => &self.style.secondary_marker_color,
        }
    }

    /// One line per visible route, plus the markers on it
    pub fn describe(&self, model: &Model) -> Vec<String> {
        let mut lines = vec![self.label.clone()];
        for (id, visible) in &self.lines {
            if !visible {
                continue;
            }
            let mut line = model.route(*id).describe();
            for kind in [MarkerKind::Primary, MarkerKind::Secondary] {
                if let Some(pos) = self.markers.get(&MarkerHandle { route: *id, kind }) {
                    line.push_str(&format!(", {} marker at {pos}", self.color(kind)));
                }
            }
            lines.push(line);
        }
        // A marker can still be out after its line disappears
        for (handle, pos) in &self.markers {
            if !self.lines.get(&handle.route).copied().unwrap_or(false) {
                lines.push(format!(
                    "{:?} trailing: {} marker at {pos}",
                    handle.route,
                    self.color(handle.kind)
                ));
            }
        }
        if lines.len() == 1 {
            lines.push("Nothing is out".to_string());
        }
        lines
    }
}

impl Renderer for LogRenderer {
    fn set_line_visible(&mut self, route: RouteID, visible: bool) {
        self.updates += 1;
        if self.lines.insert(route, visible) != Some(visible) {
            debug!("{:?} is now {}", route, if visible { "shown" } else { "hidden" });
        }
    }

    fn set_marker(&mut self, marker: MarkerHandle, pos: Option<LonLat>) {
        self.updates += 1;
        match pos {
            Some(pos) => {
                trace!("{:?} {:?} at {pos}", marker.route, marker.kind);
                self.markers.insert(marker, pos);
            }
            None => {
                if self.markers.remove(&marker).is_some() {
                    debug!("{:?} {:?} marker removed", marker.route, marker.kind);
                }
            }
        }
    }

    fn set_time_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}
