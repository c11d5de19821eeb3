//! Heat banding.
//!
//! The city's response to the crew is decided in exactly one place. A
//! [`HeatReading`] is taken once per operation and handed both to mission
//! scoring (for the Notoriety multiplier) and to the complication wheel
//! (for the option table), so the two can never disagree about how hot
//! things are.

use serde::{Deserialize, Serialize};

/// Coarse heat classification used to pick the complication table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatBand {
    /// The city is not yet paying attention.
    Low,
    /// Notoriety has crossed the high-heat threshold.
    High,
}

impl HeatBand {
    /// Both bands.
    pub const ALL: [HeatBand; 2] = [HeatBand::Low, HeatBand::High];

    /// Parse "low"/"high" (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for HeatBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::High => write!(f, "High"),
        }
    }
}

/// The heat assessment for one Notoriety total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatReading {
    /// Notoriety total the reading was taken at.
    pub notoriety: f64,
    /// Band used for option-table selection.
    pub band: HeatBand,
    /// Multiplier applied to Notoriety gains.
    pub multiplier: f64,
}

/// Multiplier below the high threshold.
pub const BASE_MULTIPLIER: f64 = 1.0;
/// Multiplier from the high threshold.
pub const HIGH_MULTIPLIER: f64 = 1.25;
/// Multiplier from the severe threshold.
pub const SEVERE_MULTIPLIER: f64 = 1.5;

/// Thresholds that turn a Notoriety total into a [`HeatReading`].
///
/// The band boundary and the first multiplier step share `high_threshold`,
/// so `band == High` exactly when `multiplier > 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatBanding {
    high_threshold: f64,
    severe_threshold: f64,
}

impl Default for HeatBanding {
    fn default() -> Self {
        Self {
            high_threshold: 10.0,
            severe_threshold: 20.0,
        }
    }
}

impl HeatBanding {
    /// Banding with custom thresholds. The severe threshold is raised to the
    /// high threshold if given lower; negative or non-finite values fall
    /// back to the defaults.
    pub fn new(high_threshold: f64, severe_threshold: f64) -> Self {
        let defaults = Self::default();
        let high = if high_threshold.is_finite() && high_threshold >= 0.0 {
            high_threshold
        } else {
            defaults.high_threshold
        };
        let severe = if severe_threshold.is_finite() {
            severe_threshold.max(high)
        } else {
            defaults.severe_threshold.max(high)
        };
        Self {
            high_threshold: high,
            severe_threshold: severe,
        }
    }

    /// Notoriety at which heat turns High.
    pub fn high_threshold(&self) -> f64 {
        self.high_threshold
    }

    /// Notoriety at which the top multiplier applies.
    pub fn severe_threshold(&self) -> f64 {
        self.severe_threshold
    }

    /// Take a reading at `notoriety`.
    pub fn read(&self, notoriety: f64) -> HeatReading {
        let notoriety = if notoriety.is_finite() {
            notoriety.max(0.0)
        } else {
            0.0
        };
        let (band, multiplier) = if notoriety >= self.severe_threshold {
            (HeatBand::High, SEVERE_MULTIPLIER)
        } else if notoriety >= self.high_threshold {
            (HeatBand::High, HIGH_MULTIPLIER)
        } else {
            (HeatBand::Low, BASE_MULTIPLIER)
        };
        HeatReading {
            notoriety,
            band,
            multiplier,
        }
    }

    /// The band at `notoriety`.
    pub fn band(&self, notoriety: f64) -> HeatBand {
        self.read(notoriety).band
    }

    /// The Notoriety multiplier at `notoriety`.
    pub fn heat_multiplier(&self, notoriety: f64) -> f64 {
        self.read(notoriety).multiplier
    }
}
