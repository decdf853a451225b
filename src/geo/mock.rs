use std::f64::consts::PI;

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::models::{Forecast, HourlyForecast, TopFactor};

/// Four central Kochi wards with fixed probabilities, used when the forecast
/// service cannot be reached or returns unusable data.
pub fn mock_forecast() -> Forecast {
    let geo_json = json!({
        "type": "FeatureCollection",
        "features": [
            mock_ward("Kadavanthra", "1", 85.0, 68.0, "#ff9900",
                [[76.294, 9.965], [76.301, 9.965], [76.304, 9.957], [76.294, 9.957], [76.294, 9.965]]),
            mock_ward("Elamkulam", "2", 65.0, 52.0, "#ffff00",
                [[76.305, 9.959], [76.312, 9.959], [76.312, 9.952], [76.305, 9.952], [76.305, 9.959]]),
            mock_ward("Vennala", "3", 45.0, 36.0, "#00ff00",
                [[76.323, 9.987], [76.331, 9.987], [76.331, 9.979], [76.323, 9.979], [76.323, 9.987]]),
            mock_ward("Palarivattom", "4", 75.0, 60.0, "#ff9900",
                [[76.312, 9.983], [76.322, 9.983], [76.322, 9.975], [76.312, 9.975], [76.312, 9.983]]),
        ]
    });

    let top_factors = [
        ("Water Level", 0.75),
        ("Rainfall", 0.65),
        ("Tide Height", 0.55),
        ("Ground Elevation", 0.45),
        ("Drainage Capacity", 0.35),
    ]
    .into_iter()
    .map(|(feature, shap_value)| TopFactor {
        feature: feature.to_string(),
        shap_value,
    })
    .collect();

    Forecast {
        geo_json: geo_json.to_string(),
        peak_flood_probability: 85.0,
        top_factors,
        hourly_forecast: mock_hourly(),
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn mock_ward(
    name: &str,
    number: &str,
    probability: f64,
    inundation: f64,
    color: &str,
    ring: [[f64; 2]; 5],
) -> serde_json::Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": [ring] },
        "properties": {
            "Name": name,
            "ward_number": number,
            "flood_probability": probability,
            "inundation_percent": inundation,
            "color": color,
        }
    })
}

/// Sinusoidal day curve around 50%, peaking at 06:00 and bottoming at 18:00.
fn mock_hourly() -> Vec<HourlyForecast> {
    (0..24)
        .map(|i| HourlyForecast {
            hour: format!("{:02}:00", i),
            probability: (50.0 + 25.0 * (i as f64 * PI / 12.0).sin()).round(),
        })
        .collect()
}
