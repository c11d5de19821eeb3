//! Direct, deterministic meter adjustments.

use serde::{Deserialize, Serialize};

use crate::heat::{HeatBand, HeatReading};

/// A player action that moves the meters without a roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Keep heads down: -2 Notoriety under high heat, -1 otherwise.
    LieLow,
    /// Donate through a proxy: -1 Notoriety.
    ProxyCharity,
    /// A table ruling with explicit deltas.
    Custom {
        /// Why the adjustment was made.
        reason: String,
        /// Change to Renown.
        renown: f64,
        /// Change to Notoriety.
        notoriety: f64,
    },
}

impl Adjustment {
    /// Parse a named adjustment.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "lie low" | "lielow" => Some(Self::LieLow),
            "proxy charity" | "proxy" | "charity" => Some(Self::ProxyCharity),
            _ => None,
        }
    }

    /// The reason recorded in the ledger.
    pub fn reason(&self) -> &str {
        match self {
            Self::LieLow => "Lie Low",
            Self::ProxyCharity => "Proxy Charity",
            Self::Custom { reason, .. } => reason,
        }
    }

    /// `(renown, notoriety)` deltas at the given heat.
    pub fn deltas(&self, heat: &HeatReading) -> (f64, f64) {
        match self {
            Self::LieLow => {
                let drop = if heat.band == HeatBand::High { 2.0 } else { 1.0 };
                (0.0, -drop)
            }
            Self::ProxyCharity => (0.0, -1.0),
            Self::Custom {
                renown, notoriety, ..
            } => (finite_or_zero(*renown), finite_or_zero(*notoriety)),
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
