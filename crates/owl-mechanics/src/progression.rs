//! Running totals derived from the ledger.
//!
//! Totals are never stored; they are recomputed by folding the ledger in
//! timestamp order (insertion order breaks ties). Both meters are clamped at
//! zero after every record, so Notoriety cannot go negative even
//! transiently.

use serde::{Deserialize, Serialize};

use owl_core::LedgerRecord;

use crate::heat::{HeatBanding, HeatReading};
use crate::meter::Meter;
use crate::tier::{NextTier, TierLadder};

/// Renown and Notoriety after folding some prefix of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressionTotals {
    /// Renown total.
    pub renown_total: f64,
    /// Notoriety total.
    pub notoriety_total: f64,
}

/// Records in fold order.
fn in_fold_order(records: &[LedgerRecord]) -> Vec<&LedgerRecord> {
    let mut ordered: Vec<&LedgerRecord> = records.iter().collect();
    // Stable: equal timestamps keep insertion order.
    ordered.sort_by_key(|r| r.timestamp);
    ordered
}

/// Totals after each record, in fold order.
pub fn replay(records: &[LedgerRecord]) -> Vec<ProgressionTotals> {
    let mut renown = Meter::new("Renown");
    let mut notoriety = Meter::new("Notoriety");

    in_fold_order(records)
        .into_iter()
        .map(|r| ProgressionTotals {
            renown_total: renown.apply(r.renown_delta),
            notoriety_total: notoriety.apply(r.notoriety_delta),
        })
        .collect()
}

/// Totals after the whole ledger.
pub fn recompute(records: &[LedgerRecord]) -> ProgressionTotals {
    let totals = replay(records).last().copied().unwrap_or_default();
    log::debug!(
        "recomputed {} records: renown {}, notoriety {}",
        records.len(),
        totals.renown_total,
        totals.notoriety_total
    );
    totals
}

/// Everything the player needs to know about their standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    /// Current totals.
    pub totals: ProgressionTotals,
    /// Renown tier.
    pub renown_tier: usize,
    /// Progress toward the next Renown tier.
    pub renown_next: NextTier,
    /// Notoriety tier.
    pub notoriety_tier: usize,
    /// Progress toward the next Notoriety tier.
    pub notoriety_next: NextTier,
    /// Heat at the current Notoriety.
    pub heat: HeatReading,
}

impl Standing {
    /// Assess `totals` against the ladders and heat banding.
    pub fn assess(
        totals: ProgressionTotals,
        renown_ladder: &TierLadder,
        notoriety_ladder: &TierLadder,
        banding: &HeatBanding,
    ) -> Self {
        Self {
            totals,
            renown_tier: renown_ladder.tier_of(totals.renown_total),
            renown_next: renown_ladder.distance_to_next(totals.renown_total),
            notoriety_tier: notoriety_ladder.tier_of(totals.notoriety_total),
            notoriety_next: notoriety_ladder.distance_to_next(totals.notoriety_total),
            heat: banding.read(totals.notoriety_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn adj(renown: f64, notoriety: f64) -> LedgerRecord {
        LedgerRecord::adjustment("Dock", "test", renown, notoriety)
    }

    #[test]
    fn empty_ledger_is_zero() {
        assert_eq!(recompute(&[]), ProgressionTotals::default());
        assert!(replay(&[]).is_empty());
    }

    #[test]
    fn sums_deltas() {
        let records = vec![adj(4.5, 2.0), adj(3.0, 1.0)];
        let t = recompute(&records);
        assert_eq!(t.renown_total, 7.5);
        assert_eq!(t.notoriety_total, 3.0);
    }

    #[test]
    fn notoriety_floor_discards_excess() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();
        let records = vec![
            adj(0.0, 3.0).at(t0),
            adj(0.0, -10.0).at(t0 + Duration::minutes(1)),
            adj(0.0, 2.0).at(t0 + Duration::minutes(2)),
        ];
        let prefixes = replay(&records);
        assert_eq!(prefixes[0].notoriety_total, 3.0);
        assert_eq!(prefixes[1].notoriety_total, 0.0);
        assert_eq!(prefixes[2].notoriety_total, 2.0);
    }

    #[test]
    fn renown_is_not_borrowed_from() {
        let records = vec![adj(5.0, 1.0), adj(0.0, -4.0)];
        let t = recompute(&records);
        assert_eq!(t.renown_total, 5.0);
        assert_eq!(t.notoriety_total, 0.0);
    }

    #[test]
    fn folds_in_timestamp_order() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();
        // Inserted out of order: the drop happened before the gain.
        let records = vec![
            adj(0.0, 4.0).at(t0 + Duration::minutes(5)),
            adj(0.0, -4.0).at(t0),
        ];
        assert_eq!(recompute(&records).notoriety_total, 4.0);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();
        let records = vec![adj(0.0, 4.0).at(t0), adj(0.0, -4.0).at(t0)];
        assert_eq!(recompute(&records).notoriety_total, 0.0);
        let reversed = vec![adj(0.0, -4.0).at(t0), adj(0.0, 4.0).at(t0)];
        assert_eq!(recompute(&reversed).notoriety_total, 4.0);
    }

    #[test]
    fn heat_escalation_scenario() {
        let banding = HeatBanding::default();
        let records = vec![adj(0.0, 9.0)];
        let before = recompute(&records);
        assert_eq!(banding.heat_multiplier(before.notoriety_total), 1.0);

        let records = vec![adj(0.0, 9.0), adj(0.0, 6.0)];
        let after = recompute(&records);
        assert_eq!(after.notoriety_total, 15.0);
        assert_eq!(banding.heat_multiplier(after.notoriety_total), 1.25);
    }

    #[test]
    fn standing_assessment() {
        let totals = ProgressionTotals {
            renown_total: 12.0,
            notoriety_total: 10.0,
        };
        let ladder = TierLadder::default();
        let s = Standing::assess(totals, &ladder, &ladder, &HeatBanding::default());
        assert_eq!(s.renown_tier, 2);
        assert_eq!(
            s.renown_next,
            NextTier::Remaining {
                points: 3.0,
                tier: 3
            }
        );
        assert_eq!(s.notoriety_tier, 2);
        assert_eq!(s.heat.band, crate::heat::HeatBand::High);
    }
}
