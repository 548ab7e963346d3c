use anyhow::Result;
use geojson::{Feature, GeoJson, Value};
use serde::{Deserialize, Serialize};

use crate::geometry::{LonLat, Polyline};
use crate::time::{parse_time, TimeOffset};
use crate::{DayCategory, Error, Window};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteID(pub usize);

/// One procession: where it goes, on which day, and when.
#[derive(Clone, Debug)]
pub struct Route {
    pub id: RouteID,
    pub name: Option<String>,
    pub day: DayCategory,
    pub path: Polyline,
    /// When the head of the procession is out
    pub window: Window,
    /// When the second marker is out (the `P_` fields)
    pub secondary_window: Window,
}

impl Route {
    pub fn describe(&self) -> String {
        format!(
            "{} ({}, {} to {}, {:.1} km)",
            self.name
                .clone()
                .unwrap_or_else(|| format!("route {}", self.id.0)),
            self.day,
            self.window.begin,
            self.window.end,
            self.path.length() / 1000.0
        )
    }
}

/// Parses a GeoJSON feature collection. Every feature becomes a route, identified by its index.
pub fn load(raw: &str) -> Result<Vec<Route>> {
    let collection = match raw.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("Expected a FeatureCollection"),
    };
    let mut routes = Vec::new();
    for (index, feature) in collection.features.iter().enumerate() {
        routes.push(import_feature(index, feature)?);
    }
    info!("Imported {} routes", routes.len());
    Ok(routes)
}

fn import_feature(index: usize, feature: &Feature) -> Result<Route, Error> {
    let invalid = |reason: String| Error::InvalidFeature { index, reason };

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| invalid("no geometry".to_string()))?;
    let positions: Vec<&Vec<f64>> = match &geometry.value {
        Value::LineString(pts) => pts.iter().collect(),
        // Pieces of one route, in order
        Value::MultiLineString(lines) => lines.iter().flatten().collect(),
        _ => return Err(invalid("geometry isn't a LineString".to_string())),
    };
    let mut pts = Vec::new();
    for pos in positions {
        if pos.len() < 2 {
            return Err(invalid(format!("bad position {:?}", pos)));
        }
        pts.push(LonLat::new(pos[0], pos[1]));
    }
    let path = Polyline::new(pts).map_err(|err| invalid(err.to_string()))?;

    let string_prop = |key: &str| -> Result<String, Error> {
        match feature.property(key).and_then(|x| x.as_str()) {
            Some(x) => Ok(x.to_string()),
            None => Err(invalid(format!("missing property {key}"))),
        }
    };
    let time_prop = |key: &str| -> Result<TimeOffset, Error> {
        parse_time(&string_prop(key)?).map_err(|err| invalid(format!("{key}: {err}")))
    };

    let window = Window::new(time_prop("begin")?, time_prop("end")?);
    let secondary_window = Window::new(time_prop("P_begin")?, time_prop("P_end")?);
    let day = string_prop("icon")?
        .parse::<DayCategory>()
        .map_err(|err| invalid(err.to_string()))?;
    let name = feature
        .property("name")
        .and_then(|x| x.as_str())
        .map(|x| x.to_string());

    Ok(Route {
        id: RouteID(index),
        name,
        day,
        path,
        window,
        secondary_window,
    })
}
