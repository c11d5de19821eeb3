use std::path::Path;

use colored::Colorize;

use owl_core::{ExposureBreakdown, format_points, saturating};
use owl_mechanics::{Archetype, Execution, Magnitude, MissionInputs, OpsFlags};

use super::SessionArgs;
use crate::MissionArgs;

pub fn run(args: &SessionArgs, mission: &MissionArgs) -> Result<(), String> {
    let inputs = match &mission.inputs {
        Some(path) => read_inputs(path)?,
        None => inputs_from_flags(mission)?,
    };
    let mut session = super::open_session(args)?;

    let (score, verb) = if mission.apply {
        let (score, _) = session
            .apply_mission(&inputs, mission.notes.clone())
            .map_err(|e| e.to_string())?;
        (score, "Resolved".green().bold())
    } else {
        let score = session.preview_mission(&inputs).map_err(|e| e.to_string())?;
        (score, "Preview".bold())
    };

    println!("  {verb}: {} ({})", inputs.archetype, session.ward());
    println!(
        "  Base Impact {} | Effect Bucket {} | Ops {:+} -> Base Score {}",
        score.base_impact, score.effect_bucket, score.ops_modifier, score.base_score
    );
    println!(
        "  Exposure Index {} at {} heat (x{})",
        score.exposure_index, score.heat.band, score.heat.multiplier
    );
    println!(
        "  Renown +{} | Notoriety +{}",
        format_points(score.renown_gain),
        format_points(score.notoriety_gain)
    );

    if mission.apply {
        let totals = session.totals().map_err(|e| e.to_string())?;
        println!(
            "  Totals: Renown {} | Notoriety {}",
            format_points(totals.renown_total),
            format_points(totals.notoriety_total)
        );
    } else {
        println!("  {}", "Not recorded; pass --apply to resolve.".dimmed());
    }

    Ok(())
}

fn read_inputs(path: &Path) -> Result<MissionInputs, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid mission file {}: {e}", path.display()))
}

fn inputs_from_flags(m: &MissionArgs) -> Result<MissionInputs, String> {
    let name = m.archetype.as_deref().unwrap_or_default();
    let archetype = Archetype::parse(name).ok_or_else(|| {
        format!("unknown archetype \"{name}\". Use: help, sabotage, expose")
    })?;

    let magnitude = match archetype {
        Archetype::HelpThePoor => Magnitude::charity(
            saturating::to_u32(m.gold),
            saturating::to_u32(m.households),
        ),
        _ => Magnitude::level(saturating::to_u8(m.level)),
    };
    let ops = OpsFlags {
        solid_plan: m.plan,
        inside_contact: m.contact,
        rushed: m.rushed,
        hard_proof: m.proof,
        reused_signature: m.reused,
    };
    let execution = Execution {
        margin: saturating::to_i32(m.margin),
        critical_success: m.crit,
        critical_failure: m.fumble,
    };
    let exposure = ExposureBreakdown {
        visibility: saturating::to_u8(m.vis),
        noise: saturating::to_u8(m.noise),
        signature: saturating::to_u8(m.sig),
        witnesses: saturating::to_u8(m.wit),
        magic: saturating::to_u8(m.magic),
        concealment: saturating::to_u8(m.conceal),
        misdirection: saturating::to_u8(m.misdir),
    };

    Ok(MissionInputs::new(archetype, magnitude)
        .with_ops(ops)
        .with_execution(execution)
        .with_exposure(exposure))
}
