use serde::Serialize;

/// Legend band for a ward's flood probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskBand {
    /// Bands are upper-inclusive: 85 is High, 85.01 is Very High.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 85.0 {
            RiskBand::VeryHigh
        } else if probability > 65.0 {
            RiskBand::High
        } else if probability > 45.0 {
            RiskBand::Medium
        } else if probability > 25.0 {
            RiskBand::Low
        } else {
            RiskBand::VeryLow
        }
    }

    /// Highest band first, as the legend lists them.
    pub fn all() -> [RiskBand; 5] {
        [
            RiskBand::VeryHigh,
            RiskBand::High,
            RiskBand::Medium,
            RiskBand::Low,
            RiskBand::VeryLow,
        ]
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            RiskBand::VeryHigh => ">85%",
            RiskBand::High => "65-85%",
            RiskBand::Medium => "45-65%",
            RiskBand::Low => "25-45%",
            RiskBand::VeryLow => "<25%",
        }
    }

    /// Probability at the middle of the band, used for legend swatches.
    pub fn representative(&self) -> f64 {
        match self {
            RiskBand::VeryHigh => 92.5,
            RiskBand::High => 75.0,
            RiskBand::Medium => 55.0,
            RiskBand::Low => 35.0,
            RiskBand::VeryLow => 12.5,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::VeryLow => write!(f, "Very Low"),
            RiskBand::Low => write!(f, "Low"),
            RiskBand::Medium => write!(f, "Medium"),
            RiskBand::High => write!(f, "High"),
            RiskBand::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Risk level of one hour in the 24-hour outlook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HourlyBand {
    Low,
    Medium,
    High,
}

/// Reference lines drawn on the hourly chart.
pub const HOURLY_HIGH_LINE: f64 = 50.0;
pub const HOURLY_MEDIUM_LINE: f64 = 20.0;

impl HourlyBand {
    pub fn from_probability(probability: f64) -> Self {
        if probability > HOURLY_HIGH_LINE {
            HourlyBand::High
        } else if probability > HOURLY_MEDIUM_LINE {
            HourlyBand::Medium
        } else {
            HourlyBand::Low
        }
    }
}

impl std::fmt::Display for HourlyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HourlyBand::Low => write!(f, "Low"),
            HourlyBand::Medium => write!(f, "Medium"),
            HourlyBand::High => write!(f, "High"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_probability(0.0), RiskBand::VeryLow);
        assert_eq!(RiskBand::from_probability(25.0), RiskBand::VeryLow);
        assert_eq!(RiskBand::from_probability(25.1), RiskBand::Low);
        assert_eq!(RiskBand::from_probability(45.0), RiskBand::Low);
        assert_eq!(RiskBand::from_probability(65.0), RiskBand::Medium);
        assert_eq!(RiskBand::from_probability(85.0), RiskBand::High);
        assert_eq!(RiskBand::from_probability(85.5), RiskBand::VeryHigh);
    }

    #[test]
    fn test_representative_lies_in_band() {
        for band in RiskBand::all() {
            assert_eq!(RiskBand::from_probability(band.representative()), band);
        }
    }

    #[test]
    fn test_hourly_band() {
        assert_eq!(HourlyBand::from_probability(75.0), HourlyBand::High);
        assert_eq!(HourlyBand::from_probability(50.0), HourlyBand::Medium);
        assert_eq!(HourlyBand::from_probability(20.0), HourlyBand::Low);
    }
}
