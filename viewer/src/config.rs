use anyhow::Result;
use serde::{Deserialize, Serialize};

use model::{TimeOffset, DEFAULT_PUSH_THRESHOLD, TIME_INTERVAL};

/// Settings that rarely change between runs. Everything has a default, so the file can be
/// partial or missing entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// A URL or a local path to the GeoJSON routes
    pub data: String,
    /// Where the slider starts
    pub initial_time: TimeOffset,
    /// Precompute positions at this granularity, in minutes
    pub time_interval: u32,
    /// Skip marker updates smaller than this, in degrees
    pub push_threshold: f64,
    pub map: MapStyle,
}

/// Passed straight through to whatever draws the map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    /// (longitude, latitude)
    pub center: (f64, f64),
    pub zoom: f64,
    pub min_zoom: f64,
    pub line_color: String,
    pub line_width: f64,
    pub primary_marker_color: String,
    pub secondary_marker_color: String,
    pub marker_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: "data/processions.geojson".to_string(),
            initial_time: TimeOffset::ZERO,
            time_interval: TIME_INTERVAL,
            push_threshold: DEFAULT_PUSH_THRESHOLD,
            map: MapStyle::default(),
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            center: (-5.98194, 37.38955),
            zoom: 13.0,
            min_zoom: 4.0,
            line_color: "#007cbf".to_string(),
            line_width: 2.0,
            primary_marker_color: "#FF0000".to_string(),
            secondary_marker_color: "#0000FF".to_string(),
            marker_radius: 5.0,
        }
    }
}

impl MapStyle {
    pub fn describe(&self) -> String {
        format!(
            "map centered on ({}, {}) at zoom {} (min {}), {}px {} lines, {}px markers",
            self.center.0,
            self.center.1,
            self.zoom,
            self.min_zoom,
            self.line_width,
            self.line_color,
            self.marker_radius
        )
    }
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(x) => x,
            None => return Ok(Self::default()),
        };
        let raw = fs_err::read_to_string(path)?;
        let settings = serde_json::from_str(&raw)?;
        info!("Loaded settings from {path}");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_interval == 0 {
            bail!("time_interval must be at least 1 minute");
        }
        if self.push_threshold.is_nan() || self.push_threshold < 0.0 {
            bail!("push_threshold must be non-negative, not {}", self.push_threshold);
        }
        Ok(())
    }
}
