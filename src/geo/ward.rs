use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a FeatureCollection, found {0:?}")]
    NotFeatureCollection(String),
}

/// Ward feature collection as delivered by the forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<WardFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardFeature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    /// Kept as raw JSON so unsupported geometry types survive a round trip.
    #[serde(default)]
    pub geometry: Value,
    pub properties: Ward,
}

fn feature_kind() -> String {
    "Feature".to_string()
}

/// One ward of a forecast snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ward {
    #[serde(rename = "Name")]
    pub name: String,
    pub flood_probability: f64,
    #[serde(default)]
    pub inundation_percent: f64,
    /// Precomputed fill color; overrides the gradient when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Any other properties (ward number, region, style …) pass through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ward {
    pub fn precomputed_color(&self) -> Option<&str> {
        self.color.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// `ward_number` may be sent as a string or a number.
    pub fn ward_number(&self) -> Option<String> {
        match self.extra.get("ward_number")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

impl WardFeature {
    /// Outer and inner rings as `(lon, lat)` pairs. Empty for non-polygonal geometry.
    pub fn rings(&self) -> Vec<Vec<(f64, f64)>> {
        let geometry = match Geometry::deserialize(&self.geometry) {
            Ok(g) => g,
            Err(_) => return Vec::new(),
        };

        let polygons = match geometry {
            Geometry::Polygon { coordinates } => vec![coordinates],
            Geometry::MultiPolygon { coordinates } => coordinates,
            Geometry::Unsupported => return Vec::new(),
        };

        polygons
            .into_iter()
            .flatten()
            .map(|ring| {
                ring.into_iter()
                    .filter(|pos| pos.len() >= 2)
                    .map(|pos| (pos[0], pos[1]))
                    .collect()
            })
            .collect()
    }
}

impl WardCollection {
    pub fn wards(&self) -> impl Iterator<Item = &Ward> {
        self.features.iter().map(|f| &f.properties)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(
            self.features
                .iter()
                .flat_map(|f| f.rings())
                .flatten(),
        )
    }
}

/// Parse the `geoJson` string of a forecast into wards.
pub fn parse_wards(geo_json: &str) -> Result<WardCollection, GeoError> {
    let collection: WardCollection = serde_json::from_str(geo_json)?;
    if collection.kind != "FeatureCollection" {
        return Err(GeoError::NotFeatureCollection(collection.kind));
    }
    Ok(collection)
}

/// The ward with the strictly highest flood probability.
///
/// Ties keep the first ward seen; wards at or below 0% never qualify.
pub fn peak_ward<'a>(wards: impl IntoIterator<Item = &'a Ward>) -> Option<&'a Ward> {
    let mut peak: Option<&Ward> = None;
    let mut max_probability = 0.0;

    for ward in wards {
        if ward.flood_probability > max_probability {
            max_probability = ward.flood_probability;
            peak = Some(ward);
        }
    }

    peak
}

/// Longitude/latitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    pub fn of(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        points.into_iter().fold(None, |acc, (lon, lat)| {
            Some(match acc {
                None => Bounds {
                    min_lon: lon,
                    min_lat: lat,
                    max_lon: lon,
                    max_lat: lat,
                },
                Some(b) => Bounds {
                    min_lon: b.min_lon.min(lon),
                    min_lat: b.min_lat.min(lat),
                    max_lon: b.max_lon.max(lon),
                    max_lat: b.max_lat.max(lat),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Grow each side by `fraction` of the span; degenerate spans get a fixed pad.
    pub fn padded(&self, fraction: f64) -> Self {
        let dx = (self.width() * fraction).max(1e-4);
        let dy = (self.height() * fraction).max(1e-4);
        Bounds {
            min_lon: self.min_lon - dx,
            min_lat: self.min_lat - dy,
            max_lon: self.max_lon + dx,
            max_lat: self.max_lat + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_WARDS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[76.29, 9.96], [76.30, 9.96], [76.30, 9.95], [76.29, 9.96]]]},
                "properties": {"Name": "Ward-1", "ward_number": 1, "flood_probability": 40.0, "inundation_percent": 12.5}
            },
            {
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": [[[[76.31, 9.97, 3.0], [76.32, 9.98], [76.31, 9.98], [76.31, 9.97]]]]},
                "properties": {"Name": "Ward-2", "ward_number": "2", "flood_probability": 70.0, "inundation_percent": 30.0, "color": ""}
            }
        ]
    }"#;

    #[test]
    fn test_parse_wards() {
        let wards = parse_wards(TWO_WARDS).unwrap();
        assert_eq!(wards.features.len(), 2);
        let first = &wards.features[0].properties;
        assert_eq!(first.name, "Ward-1");
        assert_eq!(first.ward_number().as_deref(), Some("1"));
        assert_eq!(wards.features[1].properties.ward_number().as_deref(), Some("2"));
        // empty color string is treated as absent
        assert_eq!(wards.features[1].properties.precomputed_color(), None);
    }

    #[test]
    fn test_rings_for_polygon_and_multipolygon() {
        let wards = parse_wards(TWO_WARDS).unwrap();
        assert_eq!(wards.features[0].rings()[0].len(), 4);
        let multi = wards.features[1].rings();
        assert_eq!(multi.len(), 1);
        assert_eq!(multi[0][0], (76.31, 9.97));
    }

    #[test]
    fn test_unsupported_geometry_has_no_rings() {
        let feature: WardFeature = serde_json::from_str(
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[76.3,9.9]},
                "properties":{"Name":"X","flood_probability":10}}"#,
        )
        .unwrap();
        assert!(feature.rings().is_empty());
    }

    #[test]
    fn test_bounds() {
        let wards = parse_wards(TWO_WARDS).unwrap();
        let b = wards.bounds().unwrap();
        assert_eq!(b.min_lon, 76.29);
        assert_eq!(b.max_lon, 76.32);
        assert_eq!(b.min_lat, 9.95);
        assert_eq!(b.max_lat, 9.98);
        assert!(Bounds::of(std::iter::empty()).is_none());
    }

    #[test]
    fn test_malformed_geojson_is_rejected() {
        assert!(matches!(parse_wards("{not json"), Err(GeoError::Json(_))));
        assert!(matches!(
            parse_wards(r#"{"type":"Feature","features":[]}"#),
            Err(GeoError::NotFeatureCollection(_))
        ));
    }

    #[test]
    fn test_peak_ward_first_wins_on_tie() {
        let wards = parse_wards(TWO_WARDS).unwrap();
        assert_eq!(peak_ward(wards.wards()).unwrap().name, "Ward-2");

        let mut tied = wards.clone();
        tied.features[0].properties.flood_probability = 70.0;
        assert_eq!(peak_ward(tied.wards()).unwrap().name, "Ward-1");
    }

    #[test]
    fn test_peak_ward_ignores_zero_probability() {
        let mut wards = parse_wards(TWO_WARDS).unwrap();
        for f in &mut wards.features {
            f.properties.flood_probability = 0.0;
        }
        assert!(peak_ward(wards.wards()).is_none());
        assert!(peak_ward(std::iter::empty()).is_none());
    }
}
