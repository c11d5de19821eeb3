//! Tier ladders, Renown perks, and the city's Notoriety responses.

use serde::{Deserialize, Serialize};

/// Ascending thresholds that divide a meter into tiers.
///
/// Tier 0 is everything below the first threshold; reaching the n-th
/// threshold puts a total in tier n.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierLadder {
    thresholds: Vec<f64>,
}

impl Default for TierLadder {
    fn default() -> Self {
        Self {
            thresholds: vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0],
        }
    }
}

/// Where a total stands relative to the next tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NextTier {
    /// More tiers remain.
    Remaining {
        /// Points still needed.
        points: f64,
        /// Tier that will be reached.
        tier: usize,
    },
    /// The total has passed the last threshold.
    AtMax,
}

impl std::fmt::Display for NextTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remaining { points, tier } => write!(
                f,
                "{} to tier {tier}",
                owl_core::format_points(*points)
            ),
            Self::AtMax => write!(f, "at max"),
        }
    }
}

impl TierLadder {
    /// Build a ladder. Non-finite values are dropped; the rest are sorted
    /// and deduplicated.
    pub fn new(thresholds: impl IntoIterator<Item = f64>) -> Self {
        let mut thresholds: Vec<f64> = thresholds.into_iter().filter(|t| t.is_finite()).collect();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        Self { thresholds }
    }

    /// Parse a comma-separated ladder such as `"5,10,15"`.
    pub fn parse(s: &str) -> Option<Self> {
        let values: Option<Vec<f64>> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok())
            .collect();
        let ladder = Self::new(values?);
        if ladder.thresholds.is_empty() {
            None
        } else {
            Some(ladder)
        }
    }

    /// The thresholds, ascending.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of tiers above tier 0.
    pub fn max_tier(&self) -> usize {
        self.thresholds.len()
    }

    /// Count of thresholds at or below `total`.
    pub fn tier_of(&self, total: f64) -> usize {
        self.thresholds.iter().take_while(|t| **t <= total).count()
    }

    /// Distance from `total` to the next threshold.
    pub fn distance_to_next(&self, total: f64) -> NextTier {
        match self.thresholds.iter().position(|t| *t > total) {
            Some(i) => NextTier::Remaining {
                points: self.thresholds[i] - total,
                tier: i + 1,
            },
            None => NextTier::AtMax,
        }
    }
}

/// A tier unlock with its flavour text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Perk {
    /// Short code, e.g. "R3" or "N2".
    pub code: &'static str,
    /// Name of the perk or response.
    pub name: &'static str,
    /// What it does at the table.
    pub text: &'static str,
}

/// Renown perks, one per tier from tier 1 ("veil-fame": subtle favours
/// while the mask stays on).
pub const RENOWN_PERKS: &[Perk] = &[
    Perk {
        code: "R1",
        name: "Street Signals",
        text: "Glean rumours; recognised hand-signs in Dock, Field and Trades.",
    },
    Perk {
        code: "R2",
        name: "Quiet Hands",
        text: "Once per session arrange a safe hand-off nearby.",
    },
    Perk {
        code: "R3",
        name: "Crowd Cover",
        text: "Once per long rest break line-of-sight for a round.",
    },
    Perk {
        code: "R4",
        name: "Whisper Network",
        text: "One social check at advantage vs townsfolk; free d6 help.",
    },
    Perk {
        code: "R5",
        name: "Safehouses",
        text: "Two boltholes; negate one post-job pursuit per adventure.",
    },
    Perk {
        code: "R6",
        name: "Folk Halo",
        text: "Quiet -10% on mundane gear; the crowd coincidentally helps once per adventure.",
    },
];

/// City responses to Notoriety, one per tier starting at tier 0. The last
/// entry covers every tier beyond it.
pub const NOTORIETY_RESPONSES: &[Perk] = &[
    Perk {
        code: "N0",
        name: "Cold",
        text: "Nothing special.",
    },
    Perk {
        code: "N1",
        name: "Warm",
        text: "Ward sweeps after jobs in hot wards.",
    },
    Perk {
        code: "N2",
        name: "Hot",
        text: "Pattern watch: repeat methods are harder; bag checks.",
    },
    Perk {
        code: "N3",
        name: "Scalding",
        text: "Counter-ops: rivals interfere; residue detectors.",
    },
    Perk {
        code: "N4",
        name: "Burning",
        text: "Scry-sweeps: casting risks a Trace test.",
    },
    Perk {
        code: "N5",
        name: "Inferno",
        text: "Citywide dragnet: curfews; bounty posted.",
    },
];

/// Renown perks unlocked at `tier`.
pub fn unlocked_perks(tier: usize) -> &'static [Perk] {
    &RENOWN_PERKS[..tier.min(RENOWN_PERKS.len())]
}

/// The city's response at Notoriety `tier`.
pub fn notoriety_response(tier: usize) -> &'static Perk {
    &NOTORIETY_RESPONSES[tier.min(NOTORIETY_RESPONSES.len() - 1)]
}
