use crate::models::{FeatureImportance, ModelVerification};

/// Plain-language explanation of one validation metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDetail {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub formula: &'static str,
    pub interpretation: &'static str,
}

pub const METRIC_DETAILS: [MetricDetail; 8] = [
    MetricDetail {
        key: "rmse",
        name: "Root Mean Square Error (RMSE)",
        description: "A measure of the average magnitude of errors between predicted and actual values.",
        formula: "RMSE = sqrt(1/n * sum((y_pred - y_actual)²))",
        interpretation: "Lower values indicate better model performance. This metric gives higher weight to larger errors.",
    },
    MetricDetail {
        key: "mae",
        name: "Mean Absolute Error (MAE)",
        description: "Average of absolute differences between predicted and actual values.",
        formula: "MAE = 1/n * sum(|y_pred - y_actual|)",
        interpretation: "Lower values indicate better model performance. This metric treats all errors equally.",
    },
    MetricDetail {
        key: "r2",
        name: "R-squared (R²)",
        description: "Proportion of variance in the dependent variable that is predictable from the independent variables.",
        formula: "R² = 1 - (sum((y_actual - y_pred)²) / sum((y_actual - y_mean)²))",
        interpretation: "Ranges from 0 to 1, with 1 indicating perfect prediction. Values closer to 1 indicate better model fit.",
    },
    MetricDetail {
        key: "mape",
        name: "Mean Absolute Percentage Error (MAPE)",
        description: "Average of percentage errors between predicted and actual values.",
        formula: "MAPE = 100% * 1/n * sum(|y_actual - y_pred| / |y_actual|)",
        interpretation: "Expressed as a percentage. Lower values indicate better model performance.",
    },
    MetricDetail {
        key: "lead_time_hours",
        name: "Lead Time (Hours)",
        description: "The time in advance that the model can make accurate predictions.",
        formula: "N/A",
        interpretation: "Longer lead times indicate a more useful forecasting model for early warning systems.",
    },
    MetricDetail {
        key: "correct_predictions",
        name: "Correct Predictions",
        description: "Percentage of extreme events that were correctly predicted by the model.",
        formula: "Correct Predictions = (True Positives / (True Positives + False Negatives)) * 100",
        interpretation: "Higher percentages indicate better ability to detect extreme events.",
    },
    MetricDetail {
        key: "false_alarms",
        name: "False Alarms",
        description: "Percentage of predictions that incorrectly indicated an extreme event would occur.",
        formula: "False Alarms = (False Positives / (False Positives + True Positives)) * 100",
        interpretation: "Lower percentages indicate fewer false warnings.",
    },
    MetricDetail {
        key: "lead_time_accuracy",
        name: "Lead Time Accuracy",
        description: "Percentage of extreme events that were predicted with sufficient lead time.",
        formula: "Lead Time Accuracy = (Events Predicted with Sufficient Lead Time / Total Events) * 100",
        interpretation: "Higher percentages indicate better early warning capabilities.",
    },
];

pub fn metric_detail(key: &str) -> Option<&'static MetricDetail> {
    METRIC_DETAILS.iter().find(|d| d.key == key)
}

/// Four decimals, or `N/A`.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "N/A".to_string(),
    }
}

/// Two decimals with a percent sign, or `N/A`.
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "N/A".to_string(),
    }
}

pub fn format_hours(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} hours", v),
        None => "N/A".to_string(),
    }
}

/// Rows of the enhanced-model table: (label, key, formatted value).
pub fn enhanced_model_rows(m: &ModelVerification) -> Vec<(&'static str, &'static str, String)> {
    let e = &m.enhanced_model;
    vec![
        ("RMSE", "rmse", format_metric(e.rmse)),
        ("MAE", "mae", format_metric(e.mae)),
        ("R²", "r2", format_metric(e.r2)),
        ("MAPE", "mape", format_percentage(e.mape)),
        ("Lead Time", "lead_time_hours", format_hours(e.lead_time_hours)),
    ]
}

/// Feature importances, most important first, with `_` shown as spaces.
pub fn ranked_features(features: &[FeatureImportance]) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = features
        .iter()
        .map(|f| FeatureImportance {
            feature: f.feature.replace('_', " "),
            importance: f.importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(format_metric(Some(0.123456)), "0.1235");
        assert_eq!(format_metric(None), "N/A");
        assert_eq!(format_percentage(Some(3.2)), "3.20%");
        assert_eq!(format_percentage(None), "N/A");
        assert_eq!(format_hours(Some(24.0)), "24 hours");
        assert_eq!(format_hours(Some(1.5)), "1.5 hours");
    }

    #[test]
    fn test_every_enhanced_row_has_detail() {
        let rows = enhanced_model_rows(&ModelVerification::default());
        for (_, key, value) in rows {
            assert!(metric_detail(key).is_some(), "{key}");
            assert_eq!(value, "N/A");
        }
    }

    #[test]
    fn test_ranked_features() {
        let ranked = ranked_features(&[
            FeatureImportance { feature: "tide_height".into(), importance: 0.2 },
            FeatureImportance { feature: "water_level".into(), importance: 0.5 },
        ]);
        assert_eq!(ranked[0].feature, "water level");
        assert_eq!(ranked[1].feature, "tide height");
    }
}
