use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three kinds of ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A mission was resolved and its gains applied.
    MissionResolved,
    /// A deterministic heat or renown adjustment.
    Adjustment,
    /// A complication was drawn from the wheel.
    ComplicationDrawn,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissionResolved => write!(f, "Mission"),
            Self::Adjustment => write!(f, "Adjustment"),
            Self::ComplicationDrawn => write!(f, "Complication"),
        }
    }
}

/// The raw exposure sliders recorded for a mission.
///
/// The first five components expose the crew, the last two conceal it.
/// Numbers outside `u8` saturate on deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureBreakdown {
    /// How many people saw the job (0-3).
    #[serde(deserialize_with = "crate::saturating::deserialize_u8")]
    pub visibility: u8,
    /// How loud it was (0-3).
    #[serde(deserialize_with = "crate::saturating::deserialize_u8")]
    pub noise: u8,
    /// How recognisable the crew's methods were (0-2).
    #[serde(deserialize_with = "crate::saturating::deserialize_u8")]
    pub signature: u8,
    /// Witnesses left behind (0-2).
    #[serde(deserialize_with = "crate::saturating::deserialize_u8")]
    pub witnesses: u8,
    /// Lingering magical trace (0-2).
    #[serde(deserialize_with = "crate::saturating::deserialize_u8")]
    pub magic: u8,
    /// Disguises and cover (0-3).
    #[serde(deserialize_with = "crate::saturating::deserialize_u8")]
    pub concealment: u8,
    /// False trails laid (0-2).
    #[serde(deserialize_with = "crate::saturating::deserialize_u8")]
    pub misdirection: u8,
}

impl std::fmt::Display for ExposureBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "vis {} noise {} sig {} wit {} magic {} / conceal {} misdirect {}",
            self.visibility,
            self.noise,
            self.signature,
            self.witnesses,
            self.magic,
            self.concealment,
            self.misdirection
        )
    }
}

/// Score breakdown stored with a resolved mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDetail {
    /// Archetype label, e.g. "Sabotage Evil".
    pub archetype: String,
    /// Base Impact (1-5).
    pub base_impact: u8,
    /// Effect Bucket (0-3).
    pub effect_bucket: u8,
    /// Ops Qualifier Modifier (-2..=2).
    pub ops_modifier: i8,
    /// Clamped Base Score (1-7).
    pub base_score: u8,
    /// Exposure sliders as entered.
    pub exposure: ExposureBreakdown,
    /// Net Exposure Index.
    pub exposure_index: i32,
    /// Heat multiplier in force when the mission was resolved.
    pub heat_multiplier: f64,
    /// Whether the execution was a critical success.
    pub critical_success: bool,
    /// Whether the execution was a critical failure.
    pub critical_failure: bool,
    /// Free-form player notes.
    pub notes: Option<String>,
}

/// The drawn option stored with a complication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplicationDetail {
    /// Index into the option table that was active for the draw.
    pub index: usize,
    /// Number of options in that table.
    pub option_count: usize,
    /// Complication text at `index`.
    pub text: String,
    /// Heat band whose table was used ("Low" or "High").
    pub band: String,
    /// Spin nonce that committed this draw.
    pub nonce: String,
}

/// Kind-specific payload of a ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RecordDetail {
    /// A resolved mission with its score breakdown.
    MissionResolved(MissionDetail),
    /// A direct adjustment with its reason.
    Adjustment {
        /// Why the adjustment was made, e.g. "Lie Low".
        reason: String,
    },
    /// A drawn complication.
    ComplicationDrawn(ComplicationDetail),
}

/// One immutable entry in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// When the record was accepted.
    pub timestamp: DateTime<Utc>,
    /// Free-form location tag.
    pub ward: String,
    /// Signed change to Renown.
    pub renown_delta: f64,
    /// Signed change to Notoriety (the fold keeps the total at or above zero).
    pub notoriety_delta: f64,
    /// Kind-specific payload.
    pub detail: RecordDetail,
}

impl LedgerRecord {
    /// A resolved mission stamped with the current time.
    pub fn mission(
        ward: impl Into<String>,
        renown_delta: f64,
        notoriety_delta: f64,
        detail: MissionDetail,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            ward: ward.into(),
            renown_delta,
            notoriety_delta,
            detail: RecordDetail::MissionResolved(detail),
        }
    }

    /// A direct adjustment stamped with the current time.
    pub fn adjustment(
        ward: impl Into<String>,
        reason: impl Into<String>,
        renown_delta: f64,
        notoriety_delta: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            ward: ward.into(),
            renown_delta,
            notoriety_delta,
            detail: RecordDetail::Adjustment {
                reason: reason.into(),
            },
        }
    }

    /// A drawn complication. Complications never move either meter.
    pub fn complication(ward: impl Into<String>, detail: ComplicationDetail) -> Self {
        Self {
            timestamp: Utc::now(),
            ward: ward.into(),
            renown_delta: 0.0,
            notoriety_delta: 0.0,
            detail: RecordDetail::ComplicationDrawn(detail),
        }
    }

    /// Replace the timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The kind of this record, derived from its payload.
    pub fn kind(&self) -> RecordKind {
        match self.detail {
            RecordDetail::MissionResolved(_) => RecordKind::MissionResolved,
            RecordDetail::Adjustment { .. } => RecordKind::Adjustment,
            RecordDetail::ComplicationDrawn(_) => RecordKind::ComplicationDrawn,
        }
    }

    /// The spin nonce, for complication records.
    pub fn nonce(&self) -> Option<&str> {
        match &self.detail {
            RecordDetail::ComplicationDrawn(c) => Some(&c.nonce),
            _ => None,
        }
    }
}

/// Format a meter value without a trailing `.0` for whole numbers.
pub fn format_points(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mission() -> MissionDetail {
        MissionDetail {
            archetype: "Sabotage Evil".to_string(),
            base_impact: 3,
            effect_bucket: 0,
            ops_modifier: 0,
            base_score: 3,
            exposure: ExposureBreakdown::default(),
            exposure_index: 0,
            heat_multiplier: 1.0,
            critical_success: false,
            critical_failure: false,
            notes: None,
        }
    }

    #[test]
    fn kind_follows_detail() {
        let m = LedgerRecord::mission("Dock", 4.5, 2.0, sample_mission());
        assert_eq!(m.kind(), RecordKind::MissionResolved);

        let a = LedgerRecord::adjustment("Dock", "Lie Low", 0.0, -1.0);
        assert_eq!(a.kind(), RecordKind::Adjustment);
        assert!(a.nonce().is_none());
    }

    #[test]
    fn complication_has_zero_deltas() {
        let c = LedgerRecord::complication(
            "Sea",
            ComplicationDetail {
                index: 2,
                option_count: 8,
                text: "A rival crew".to_string(),
                band: "Low".to_string(),
                nonce: "abc".to_string(),
            },
        );
        assert_eq!(c.kind(), RecordKind::ComplicationDrawn);
        assert_eq!(c.renown_delta, 0.0);
        assert_eq!(c.notoriety_delta, 0.0);
        assert_eq!(c.nonce(), Some("abc"));
    }

    #[test]
    fn serde_roundtrip_keeps_kind_tag() {
        let m = LedgerRecord::mission("Trades", 4.5, 3.0, sample_mission());
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"kind\":\"MissionResolved\""));
        let back: LedgerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn format_points_drops_trailing_zero() {
        assert_eq!(format_points(3.0), "3");
        assert_eq!(format_points(4.5), "4.5");
        assert_eq!(format_points(-2.0), "-2");
    }

    #[test]
    fn kind_display() {
        assert_eq!(RecordKind::MissionResolved.to_string(), "Mission");
        assert_eq!(RecordKind::ComplicationDrawn.to_string(), "Complication");
    }
}
