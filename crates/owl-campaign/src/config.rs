//! Configuration for a campaign session.

use std::path::PathBuf;

use owl_core::ward::{DEFAULT_WARD, normalize_ward};
use owl_mechanics::{HeatBanding, TierLadder};
use owl_wheel::reconciler::DEFAULT_NONCE_CAPACITY;

/// Largest nonce cache a session will keep.
pub const MAX_NONCE_CAPACITY: usize = 4096;

/// Configuration for a campaign session.
#[derive(Debug, Clone)]
pub struct CampaignConfig {
    /// RNG seed for reproducible spins; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// How many recent spin nonces to remember for dedup.
    pub nonce_capacity: usize,
    /// Ward stamped on new records.
    pub ward: String,
    /// Directory holding `complications_low.json` / `complications_high.json`.
    /// `None` uses the built-in tables.
    pub tables_dir: Option<PathBuf>,
    /// Renown tier thresholds.
    pub renown_ladder: TierLadder,
    /// Notoriety tier thresholds.
    pub notoriety_ladder: TierLadder,
    /// Heat thresholds.
    pub heat: HeatBanding,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed: None,
            nonce_capacity: DEFAULT_NONCE_CAPACITY,
            ward: DEFAULT_WARD.to_string(),
            tables_dir: None,
            renown_ladder: TierLadder::default(),
            notoriety_ladder: TierLadder::default(),
            heat: HeatBanding::default(),
        }
    }
}

impl CampaignConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the nonce cache capacity (clamped to 1-4096).
    pub fn with_nonce_capacity(mut self, capacity: usize) -> Self {
        self.nonce_capacity = capacity.clamp(1, MAX_NONCE_CAPACITY);
        self
    }

    /// Set the active ward. Blank input keeps the current ward.
    pub fn with_ward(mut self, ward: &str) -> Self {
        let ward = normalize_ward(ward);
        if !ward.is_empty() {
            self.ward = ward;
        }
        self
    }

    /// Read complication tables from `dir`.
    pub fn with_tables_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tables_dir = Some(dir.into());
        self
    }

    /// Set the Renown ladder. An empty ladder is ignored.
    pub fn with_renown_ladder(mut self, ladder: TierLadder) -> Self {
        if ladder.max_tier() > 0 {
            self.renown_ladder = ladder;
        }
        self
    }

    /// Set the Notoriety ladder. An empty ladder is ignored.
    pub fn with_notoriety_ladder(mut self, ladder: TierLadder) -> Self {
        if ladder.max_tier() > 0 {
            self.notoriety_ladder = ladder;
        }
        self
    }

    /// Set the heat thresholds.
    pub fn with_heat(mut self, heat: HeatBanding) -> Self {
        self.heat = heat;
        self
    }
}
