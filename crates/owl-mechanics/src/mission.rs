//! Mission inputs as entered by the player.
//!
//! Inputs are deliberately permissive: every number is accepted and later
//! clamped by the scoring functions, matching how the table plays.

use serde::{Deserialize, Serialize};

use owl_core::ExposureBreakdown;

/// The kind of job the crew pulled, in ascending order of risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Spend gold to aid struggling households.
    HelpThePoor,
    /// Damage the operations of a villainous concern.
    SabotageEvil,
    /// Bring corruption into the light.
    ExposeCorruption,
}

impl Archetype {
    /// All archetypes, lowest risk first.
    pub const ALL: [Archetype; 3] = [
        Archetype::HelpThePoor,
        Archetype::SabotageEvil,
        Archetype::ExposeCorruption,
    ];

    /// Position in [`Archetype::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::HelpThePoor => 0,
            Self::SabotageEvil => 1,
            Self::ExposeCorruption => 2,
        }
    }

    /// Parse an archetype from a name or a short alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "help the poor" | "help" | "poor" | "charity" => Some(Self::HelpThePoor),
            "sabotage evil" | "sabotage" => Some(Self::SabotageEvil),
            "expose corruption" | "expose" | "corruption" => Some(Self::ExposeCorruption),
            _ => None,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HelpThePoor => write!(f, "Help the Poor"),
            Self::SabotageEvil => write!(f, "Sabotage Evil"),
            Self::ExposeCorruption => write!(f, "Expose Corruption"),
        }
    }
}

/// How big the job was. Each archetype reads only the fields it uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Magnitude {
    /// Gold spent (Help the Poor).
    #[serde(deserialize_with = "owl_core::saturating::deserialize_u32")]
    pub gold_spent: u32,
    /// Households aided (Help the Poor).
    #[serde(deserialize_with = "owl_core::saturating::deserialize_u32")]
    pub households: u32,
    /// Impact level for sabotage, exposure level for exposés (1-5).
    #[serde(deserialize_with = "owl_core::saturating::deserialize_u8")]
    pub level: u8,
}

impl Magnitude {
    /// Magnitude for a charity run.
    pub fn charity(gold_spent: u32, households: u32) -> Self {
        Self {
            gold_spent,
            households,
            level: 0,
        }
    }

    /// Magnitude for a sabotage or exposé.
    pub fn level(level: u8) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }
}

/// Operational checkboxes. Flags that do not apply to the mission's
/// archetype are ignored when scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsFlags {
    /// Solid plan (+1, Help the Poor).
    pub solid_plan: bool,
    /// Inside contact (+1, Sabotage Evil).
    pub inside_contact: bool,
    /// Rushed or loud (-1, Sabotage Evil).
    pub rushed: bool,
    /// Hard proof or magical corroboration (+1, Expose Corruption).
    pub hard_proof: bool,
    /// Reused signature (-1, Expose Corruption).
    pub reused_signature: bool,
}

/// How the decisive roll went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Execution {
    /// Amount the roll beat its DC by (negative on a miss).
    #[serde(deserialize_with = "owl_core::saturating::deserialize_i32")]
    pub margin: i32,
    /// Natural 20.
    pub critical_success: bool,
    /// Critical botch.
    pub critical_failure: bool,
}

/// Everything needed to score one mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionInputs {
    /// Kind of job.
    pub archetype: Archetype,
    /// Size of the job.
    #[serde(default)]
    pub magnitude: Magnitude,
    /// Operational modifiers.
    #[serde(default)]
    pub ops: OpsFlags,
    /// Outcome of the decisive roll.
    #[serde(default)]
    pub execution: Execution,
    /// Exposure sliders.
    #[serde(default)]
    pub exposure: ExposureBreakdown,
}

impl MissionInputs {
    /// Inputs for `archetype` with every other field at its default.
    pub fn new(archetype: Archetype, magnitude: Magnitude) -> Self {
        Self {
            archetype,
            magnitude,
            ops: OpsFlags::default(),
            execution: Execution::default(),
            exposure: ExposureBreakdown::default(),
        }
    }

    /// Replace the operational flags.
    pub fn with_ops(mut self, ops: OpsFlags) -> Self {
        self.ops = ops;
        self
    }

    /// Replace the execution result.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Replace the exposure sliders.
    pub fn with_exposure(mut self, exposure: ExposureBreakdown) -> Self {
        self.exposure = exposure;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!(Archetype::parse("help"), Some(Archetype::HelpThePoor));
        assert_eq!(
            Archetype::parse("Help the Poor"),
            Some(Archetype::HelpThePoor)
        );
        assert_eq!(
            Archetype::parse("sabotage-evil"),
            Some(Archetype::SabotageEvil)
        );
        assert_eq!(
            Archetype::parse("EXPOSE_CORRUPTION"),
            Some(Archetype::ExposeCorruption)
        );
        assert_eq!(Archetype::parse("heist"), None);
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for a in Archetype::ALL {
            assert_eq!(Archetype::parse(&a.to_string()), Some(a));
        }
    }

    #[test]
    fn index_matches_all() {
        for (i, a) in Archetype::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
        }
    }

    #[test]
    fn inputs_deserialize_with_defaults() {
        let json = r#"{"archetype":"SabotageEvil","magnitude":{"level":3}}"#;
        let inputs: MissionInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.archetype, Archetype::SabotageEvil);
        assert_eq!(inputs.magnitude.level, 3);
        assert!(!inputs.ops.rushed);
        assert_eq!(inputs.execution.margin, 0);
        assert_eq!(inputs.exposure, ExposureBreakdown::default());
    }

    #[test]
    fn oversized_and_negative_numbers_saturate() {
        let json = r#"{
            "archetype": "SabotageEvil",
            "magnitude": {"level": 300, "gold_spent": -5},
            "execution": {"margin": -99999999999},
            "exposure": {"visibility": -1, "noise": 1000}
        }"#;
        let inputs: MissionInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.magnitude.level, u8::MAX);
        assert_eq!(inputs.magnitude.gold_spent, 0);
        assert_eq!(inputs.execution.margin, i32::MIN);
        assert_eq!(inputs.exposure.visibility, 0);
        assert_eq!(inputs.exposure.noise, u8::MAX);
        assert_eq!(
            crate::scoring::base_impact(inputs.archetype, &inputs.magnitude),
            crate::scoring::base_impact(Archetype::SabotageEvil, &Magnitude::level(5))
        );
    }
}
