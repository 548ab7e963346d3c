#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod days;
mod error;
pub mod geometry;
pub mod positions;
mod replay;
mod routes;
mod time;
mod window;

use anyhow::Result;

pub use days::{DayCategory, DayFilter};
pub use error::Error;
pub use geometry::{interpolate, LonLat, Polyline};
pub use positions::{PositionTable, Positions, TIME_INTERVAL};
pub use replay::{
    AppState, Event, Frame, MarkerHandle, MarkerKind, Renderer, Replay, DEFAULT_PUSH_THRESHOLD,
};
pub use routes::{Route, RouteID};
pub use time::{format_time, parse_time, TimeOffset, MINUTES_PER_DAY};
pub use window::{is_visible, Window};

/// Every procession, loaded once and never changed.
#[derive(Clone, Debug)]
pub struct Model {
    // Indexed by RouteID
    pub routes: Vec<Route>,
}

impl Model {
    /// Imports a GeoJSON feature collection
    pub fn import_geojson(raw: &str) -> Result<Self> {
        let routes = routes::load(raw)?;
        if routes.is_empty() {
            warn!("The dataset has no routes");
        }
        Ok(Self { routes })
    }

    pub fn import_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = std::str::from_utf8(bytes)?;
        Self::import_geojson(raw)
    }

    pub fn route(&self, id: RouteID) -> &Route {
        &self.routes[id.0]
    }
}
