pub mod adjust;
pub mod export;
pub mod mission;
pub mod play;
pub mod spin;
pub mod status;
pub mod tiers;

use std::path::PathBuf;

use clap::Args;

use owl_campaign::{CampaignConfig, CampaignSession};
use owl_core::JsonLinesLedger;
use owl_mechanics::TierLadder;

/// Options shared by every subcommand.
#[derive(Args)]
pub struct SessionArgs {
    /// Ledger file (JSON lines)
    #[arg(short, long, global = true, default_value = "owl-ledger.jsonl")]
    pub ledger: PathBuf,

    /// Ward stamped on new records
    #[arg(short, long, global = true)]
    pub ward: Option<String>,

    /// RNG seed for reproducible spins
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Directory with complications_low.json / complications_high.json
    #[arg(long, global = true)]
    pub tables: Option<PathBuf>,

    /// Renown tier thresholds, e.g. "5,10,15,20,25,30"
    #[arg(long, global = true)]
    pub renown_tiers: Option<String>,

    /// Notoriety tier thresholds
    #[arg(long, global = true)]
    pub notoriety_tiers: Option<String>,

    /// How many recent spin nonces to remember
    #[arg(long, global = true, default_value = "64")]
    pub nonce_capacity: usize,
}

impl SessionArgs {
    /// Build the session configuration from the flags.
    pub fn config(&self) -> Result<CampaignConfig, String> {
        let mut config = CampaignConfig::default().with_nonce_capacity(self.nonce_capacity);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(ward) = &self.ward {
            config = config.with_ward(ward);
        }
        if let Some(dir) = &self.tables {
            config = config.with_tables_dir(dir.clone());
        }
        if let Some(thresholds) = &self.renown_tiers {
            config = config.with_renown_ladder(parse_ladder(thresholds)?);
        }
        if let Some(thresholds) = &self.notoriety_tiers {
            config = config.with_notoriety_ladder(parse_ladder(thresholds)?);
        }
        Ok(config)
    }
}

fn parse_ladder(thresholds: &str) -> Result<TierLadder, String> {
    TierLadder::parse(thresholds).ok_or_else(|| {
        format!("invalid tier thresholds \"{thresholds}\"; use comma-separated numbers like 5,10,15")
    })
}

/// Open a session over the ledger file.
fn open_session(args: &SessionArgs) -> Result<CampaignSession<JsonLinesLedger>, String> {
    let config = args.config()?;
    let store = JsonLinesLedger::open(args.ledger.clone());
    log::debug!("opening ledger {}", args.ledger.display());
    CampaignSession::new(store, config).map_err(|e| format!("failed to open ledger: {e}"))
}
