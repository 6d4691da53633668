//! Snap-to-road through an OSRM-compatible walking route service.

use bevy::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::MAX_SNAP_WAYPOINTS;
use crate::geo::{Coordinate, Path};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum SnapError {
    #[error("routing request failed: {0}")]
    Transport(String),

    #[error("routing service returned status {0}")]
    Status(u16),

    #[error("could not decode routing response: {0}")]
    Decode(String),

    #[error("routing service found no route")]
    NoRoute,
}

/// Something that can route a walk through a list of points
pub trait RoutingService: Send + Sync {
    fn walking_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<Path, SnapError>;
}

/// The routing service used by the freehand tool
#[derive(Resource, Clone)]
pub struct RoutingBackend(pub Arc<dyn RoutingService>);

impl RoutingBackend {
    pub fn osrm(base_url: impl Into<String>) -> Self {
        Self(Arc::new(OsrmRouter::new(base_url)))
    }
}

impl Default for RoutingBackend {
    fn default() -> Self {
        Self::osrm(crate::config::DEFAULT_ROUTING_URL)
    }
}

#[derive(Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    geometry: LineString,
}

#[derive(Deserialize)]
struct LineString {
    /// GeoJSON order: [lng, lat]
    coordinates: Vec<[f64; 2]>,
}

fn route_path(response: RouteResponse) -> Result<Path, SnapError> {
    if response.code != "Ok" {
        return Err(SnapError::NoRoute);
    }
    let route = response.routes.into_iter().next().ok_or(SnapError::NoRoute)?;
    let path: Path = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| Coordinate::new(lat, lng))
        .collect();

    if path.len() < 2 || path.iter().any(|p| !p.is_finite()) {
        return Err(SnapError::NoRoute);
    }
    Ok(path)
}

/// Blocking client for the OSRM `route` endpoint
pub struct OsrmRouter {
    base_url: String,
    agent: ureq::Agent,
}

impl OsrmRouter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    fn route_url(&self, points: &[Coordinate]) -> String {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.lng, p.lat))
            .collect();
        format!(
            "{}/route/v1/foot/{}?overview=full&geometries=geojson",
            self.base_url,
            coords.join(";")
        )
    }
}

impl RoutingService for OsrmRouter {
    fn walking_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<Path, SnapError> {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(origin);
        points.extend_from_slice(waypoints);
        points.push(destination);

        let response = self
            .agent
            .get(&self.route_url(&points))
            .set("User-Agent", "territory-editor")
            .call();

        match response {
            Ok(resp) => match resp.into_json::<RouteResponse>() {
                Ok(body) => route_path(body),
                Err(e) => Err(SnapError::Decode(e.to_string())),
            },
            Err(ureq::Error::Status(code, _)) => Err(SnapError::Status(code)),
            Err(e) => Err(SnapError::Transport(e.to_string())),
        }
    }
}

/// Interior points to route through, evenly strided and at most [`MAX_SNAP_WAYPOINTS`]
pub fn sample_waypoints(points: &[Coordinate]) -> Vec<Coordinate> {
    if points.len() <= 2 {
        return Vec::new();
    }
    let interior = points.len() - 2;
    let step = interior.div_ceil(MAX_SNAP_WAYPOINTS).max(1);

    points[1..points.len() - 1]
        .iter()
        .step_by(step)
        .take(MAX_SNAP_WAYPOINTS)
        .copied()
        .collect()
}

/// Route `raw` along roads, or return it unchanged if routing fails
pub fn snap_or_fallback(router: &dyn RoutingService, raw: Path) -> Path {
    let (Some(&origin), Some(&destination)) = (raw.first(), raw.last()) else {
        return raw;
    };
    if raw.len() < 2 {
        return raw;
    }

    match router.walking_route(origin, destination, &sample_waypoints(&raw)) {
        Ok(route) if route.len() >= 2 => {
            debug!("Snapped stroke of {} points to {} points", raw.len(), route.len());
            route
        }
        Ok(_) => {
            warn!("Snap returned a degenerate route, keeping raw stroke");
            raw
        }
        Err(e) => {
            warn!("Snap to road failed, keeping raw stroke: {}", e);
            raw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_format() {
        let router = OsrmRouter::new("http://localhost:5000/");
        let url = router.route_url(&[Coordinate::new(-10.5, -48.25), Coordinate::new(-10.0, -48.0)]);
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/foot/-48.250000,-10.500000;-48.000000,-10.000000?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn test_route_response_decoding() {
        let json = r#"{
            "code": "Ok",
            "routes": [{ "geometry": { "type": "LineString", "coordinates": [[-48.3, -10.1], [-48.2, -10.2]] } }]
        }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        let path = route_path(response).unwrap();
        assert_eq!(path, vec![Coordinate::new(-10.1, -48.3), Coordinate::new(-10.2, -48.2)]);
    }

    #[test]
    fn test_no_route_response() {
        let response: RouteResponse = serde_json::from_str(r#"{ "code": "NoRoute" }"#).unwrap();
        assert!(matches!(route_path(response), Err(SnapError::NoRoute)));

        let json = r#"{ "code": "Ok", "routes": [{ "geometry": { "coordinates": [[1.0, 2.0]] } }] }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(route_path(response), Err(SnapError::NoRoute)));
    }
}
