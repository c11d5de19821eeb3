//! Mission scoring.
//!
//! A mission is reduced to three small integers: Base Impact (how big),
//! Effect Bucket (how well it went) and Ops Qualifier Modifier (how cleanly
//! it was run). Their clamped sum is the Base Score, which a
//! [`ScoringPolicy`] turns into Renown. Notoriety is driven separately by
//! the Exposure Index and the current heat.
//!
//! Out-of-range inputs are clamped, never rejected.

use serde::{Deserialize, Serialize};

use owl_core::{ExposureBreakdown, MissionDetail};

use crate::heat::HeatReading;
use crate::mission::{Archetype, Execution, Magnitude, MissionInputs, OpsFlags};

/// Lowest possible Base Score.
pub const MIN_BASE_SCORE: u8 = 1;
/// Highest possible Base Score.
pub const MAX_BASE_SCORE: u8 = 7;
/// Bound on the summed ops modifier.
pub const MAX_OPS_MODIFIER: i8 = 2;
/// Highest Effect Bucket.
pub const MAX_EFFECT_BUCKET: u8 = 3;

/// Band a gold amount into 1-5.
fn spend_band(gold: u32) -> u8 {
    match gold {
        0..25 => 1,
        25..50 => 2,
        50..100 => 3,
        100..200 => 4,
        _ => 5,
    }
}

/// Band a household count into 1-5.
fn household_band(households: u32) -> u8 {
    match households {
        0..10 => 1,
        10..25 => 2,
        25..50 => 3,
        50..100 => 4,
        _ => 5,
    }
}

/// Base Impact (1-5) for a mission of the given size.
///
/// Charity takes the better of its spend and household bands; the other
/// archetypes use their level directly.
pub fn base_impact(archetype: Archetype, magnitude: &Magnitude) -> u8 {
    match archetype {
        Archetype::HelpThePoor => {
            spend_band(magnitude.gold_spent).max(household_band(magnitude.households))
        }
        Archetype::SabotageEvil | Archetype::ExposeCorruption => magnitude.level.clamp(1, 5),
    }
}

/// Effect Bucket (0-3). A critical success always takes the top bucket;
/// a critical failure is scored on the Notoriety side instead.
pub fn result_bucket(execution: &Execution) -> u8 {
    if execution.critical_success {
        MAX_EFFECT_BUCKET
    } else if execution.margin >= 5 {
        2
    } else if execution.margin >= 1 {
        1
    } else {
        0
    }
}

/// Ops Qualifier Modifier: the archetype's checkbox contributions summed
/// and clamped to ±2.
pub fn ops_modifier(archetype: Archetype, ops: &OpsFlags) -> i8 {
    let sum = match archetype {
        Archetype::HelpThePoor => i8::from(ops.solid_plan),
        Archetype::SabotageEvil => i8::from(ops.inside_contact) - i8::from(ops.rushed),
        Archetype::ExposeCorruption => i8::from(ops.hard_proof) - i8::from(ops.reused_signature),
    };
    sum.clamp(-MAX_OPS_MODIFIER, MAX_OPS_MODIFIER)
}

/// Base Score: `clamp(BI + EB + clamp(OQM, -2, 2), 1, 7)`.
pub fn base_score(base_impact: i32, effect_bucket: i32, ops_modifier: i32) -> u8 {
    let oqm = ops_modifier.clamp(-(MAX_OPS_MODIFIER as i32), MAX_OPS_MODIFIER as i32);
    let raw = base_impact.saturating_add(effect_bucket).saturating_add(oqm);
    raw.clamp(MIN_BASE_SCORE as i32, MAX_BASE_SCORE as i32) as u8
}

/// Exposure Index: exposing components minus concealing ones.
///
/// Each slider is clamped to its range first; the index itself is left
/// unclamped and a negative value means the job cooled things down.
pub fn exposure_index(e: &ExposureBreakdown) -> i32 {
    let exposing = e.visibility.min(3) as i32
        + e.noise.min(3) as i32
        + e.signature.min(2) as i32
        + e.witnesses.min(2) as i32
        + e.magic.min(2) as i32;
    let concealing = e.concealment.min(3) as i32 + e.misdirection.min(2) as i32;
    exposing - concealing
}

/// Converts a scored mission into meter deltas.
///
/// The heat multiplier is not chosen here: it arrives in the
/// [`HeatReading`] so scoring and the complication wheel share one source.
pub trait ScoringPolicy {
    /// Short name of the tuning.
    fn name(&self) -> &str;

    /// Renown earned for a Base Score.
    fn renown_gain(&self, base_score: u8, archetype: Archetype) -> f64;

    /// Notoriety earned for a mission, never negative.
    fn notoriety_gain(
        &self,
        archetype: Archetype,
        exposure_index: i32,
        heat: &HeatReading,
        execution: &Execution,
    ) -> f64;
}

/// The stepped tuning: flat archetype multipliers for Renown and a stepped
/// heat multiplier for Notoriety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteppedPolicy {
    /// Renown multiplier per archetype, in [`Archetype::ALL`] order.
    pub renown_multipliers: [f64; 3],
    /// Notoriety category base per archetype, in [`Archetype::ALL`] order.
    pub category_bases: [u32; 3],
}

impl Default for SteppedPolicy {
    fn default() -> Self {
        Self {
            renown_multipliers: [1.0, 1.5, 2.0],
            category_bases: [1, 2, 3],
        }
    }
}

impl SteppedPolicy {
    /// Renown multiplier for `archetype`. Non-positive tunings read as 1.0.
    pub fn renown_multiplier(&self, archetype: Archetype) -> f64 {
        let m = self.renown_multipliers[archetype.index()];
        if m.is_finite() && m > 0.0 { m } else { 1.0 }
    }

    /// Notoriety category base for `archetype`.
    pub fn category_base(&self, archetype: Archetype) -> u32 {
        self.category_bases[archetype.index()]
    }
}

impl ScoringPolicy for SteppedPolicy {
    fn name(&self) -> &str {
        "stepped"
    }

    fn renown_gain(&self, base_score: u8, archetype: Archetype) -> f64 {
        let score = base_score.clamp(MIN_BASE_SCORE, MAX_BASE_SCORE) as f64;
        score * self.renown_multiplier(archetype)
    }

    fn notoriety_gain(
        &self,
        archetype: Archetype,
        exposure_index: i32,
        heat: &HeatReading,
        execution: &Execution,
    ) -> f64 {
        let raw = self.category_base(archetype) as i64
            + (exposure_index as i64 - 1).max(0)
            + i64::from(execution.critical_failure);
        let mut gain = (raw as f64 * heat.multiplier).ceil().max(0.0);
        if execution.critical_success {
            gain = (gain - 1.0).max(0.0);
        }
        gain
    }
}

/// The full scoring of one mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionScore {
    /// Kind of job.
    pub archetype: Archetype,
    /// Base Impact (1-5).
    pub base_impact: u8,
    /// Effect Bucket (0-3).
    pub effect_bucket: u8,
    /// Ops Qualifier Modifier (-2..=2).
    pub ops_modifier: i8,
    /// Base Score (1-7).
    pub base_score: u8,
    /// Net Exposure Index.
    pub exposure_index: i32,
    /// Projected Renown gain.
    pub renown_gain: f64,
    /// Projected Notoriety gain.
    pub notoriety_gain: f64,
    /// Heat the mission was scored against.
    pub heat: HeatReading,
}

impl MissionScore {
    /// Ledger payload for this score.
    pub fn to_detail(&self, inputs: &MissionInputs, notes: Option<String>) -> MissionDetail {
        MissionDetail {
            archetype: self.archetype.to_string(),
            base_impact: self.base_impact,
            effect_bucket: self.effect_bucket,
            ops_modifier: self.ops_modifier,
            base_score: self.base_score,
            exposure: inputs.exposure,
            exposure_index: self.exposure_index,
            heat_multiplier: self.heat.multiplier,
            critical_success: inputs.execution.critical_success,
            critical_failure: inputs.execution.critical_failure,
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

impl std::fmt::Display for MissionScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Base Impact: {} | EB: {} | OQM: {:+} -> Base Score: {} | EI: {} | Renown +{} | Notoriety +{}",
            self.base_impact,
            self.effect_bucket,
            self.ops_modifier,
            self.base_score,
            self.exposure_index,
            owl_core::format_points(self.renown_gain),
            owl_core::format_points(self.notoriety_gain),
        )
    }
}

/// Score a mission against a heat reading.
pub fn score_mission<P: ScoringPolicy + ?Sized>(
    policy: &P,
    inputs: &MissionInputs,
    heat: HeatReading,
) -> MissionScore {
    let bi = base_impact(inputs.archetype, &inputs.magnitude);
    let eb = result_bucket(&inputs.execution);
    let oqm = ops_modifier(inputs.archetype, &inputs.ops);
    let score = base_score(bi as i32, eb as i32, oqm as i32);
    let ei = exposure_index(&inputs.exposure);

    let renown_gain = policy.renown_gain(score, inputs.archetype);
    let notoriety_gain = policy.notoriety_gain(inputs.archetype, ei, &heat, &inputs.execution);

    log::debug!(
        "scored {} with {} policy: BI {bi} EB {eb} OQM {oqm} -> {score}, EI {ei}, heat x{}",
        inputs.archetype,
        policy.name(),
        heat.multiplier
    );

    MissionScore {
        archetype: inputs.archetype,
        base_impact: bi,
        effect_bucket: eb,
        ops_modifier: oqm,
        base_score: score,
        exposure_index: ei,
        renown_gain,
        notoriety_gain,
        heat,
    }
}
