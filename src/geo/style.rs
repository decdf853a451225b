use serde::Serialize;
use serde_json::Value;

use super::ward::{peak_ward, Ward, WardCollection};
use crate::color::palette::Palette;
use crate::regions::RegionLookup;
use crate::risk::RiskBand;

const PEAK_STROKE: &str = "#FF0000";
const PEAK_DASH: &str = "5, 5";
const DEFAULT_STROKE: &str = "black";

/// Path style for one ward polygon, named after the Leaflet path options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardStyle {
    pub fill_color: String,
    pub weight: u32,
    pub opacity: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    pub fill_opacity: f64,
}

/// Style a ward. The peak ward gets a dashed red outline and a stronger fill.
pub fn ward_style(ward: &Ward, is_peak: bool, palette: &Palette) -> WardStyle {
    let fill_color = ward
        .precomputed_color()
        .map(str::to_string)
        .unwrap_or_else(|| palette.css_color(ward.flood_probability));

    if is_peak {
        WardStyle {
            fill_color,
            weight: 3,
            opacity: 1.0,
            color: PEAK_STROKE.to_string(),
            dash_array: Some(PEAK_DASH.to_string()),
            fill_opacity: 0.8,
        }
    } else {
        WardStyle {
            fill_color,
            weight: 1,
            opacity: 1.0,
            color: DEFAULT_STROKE.to_string(),
            dash_array: None,
            fill_opacity: 0.7,
        }
    }
}

/// Copy of `collection` with `style`, `region`, `risk_band` and `is_peak`
/// merged into every feature's properties.
pub fn styled_collection(
    collection: &WardCollection,
    palette: &Palette,
    regions: &RegionLookup,
) -> Result<WardCollection, serde_json::Error> {
    let peak_name = peak_ward(collection.wards()).map(|w| w.name.clone());
    let mut styled = collection.clone();

    for feature in &mut styled.features {
        let ward = &mut feature.properties;
        let is_peak = peak_name.as_deref() == Some(ward.name.as_str());
        let style = ward_style(ward, is_peak, palette);
        let band = RiskBand::from_probability(ward.flood_probability);
        let region = regions.region_for(&ward.name);

        ward.extra.insert("style".into(), serde_json::to_value(style)?);
        ward.extra.insert("region".into(), Value::String(region));
        ward.extra.insert("risk_band".into(), Value::String(band.to_string()));
        ward.extra.insert("is_peak".into(), Value::Bool(is_peak));
    }

    Ok(styled)
}
