/// The seven wards of the city, in map order.
pub const WARDS: &[&str] = &["Dock", "Field", "South", "North", "Castle", "Trades", "Sea"];

/// Ward used when none is chosen.
pub const DEFAULT_WARD: &str = "Dock";

/// Match `input` against the canonical wards, ignoring case and an
/// optional trailing " Ward".
pub fn canonical_ward(input: &str) -> Option<&'static str> {
    let lower = input.trim().to_lowercase();
    let name = lower.strip_suffix(" ward").unwrap_or(&lower).trim();
    WARDS.iter().copied().find(|w| w.to_lowercase() == name)
}

/// Normalize a ward tag: canonical spelling for known wards, trimmed text
/// otherwise. Wards are free-form, so unknown names pass through.
pub fn normalize_ward(input: &str) -> String {
    canonical_ward(input)
        .map(str::to_string)
        .unwrap_or_else(|| input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_matches_case_insensitively() {
        assert_eq!(canonical_ward("dock"), Some("Dock"));
        assert_eq!(canonical_ward("  TRADES "), Some("Trades"));
        assert_eq!(canonical_ward("Castle Ward"), Some("Castle"));
        assert_eq!(canonical_ward("Undercliff"), None);
    }

    #[test]
    fn unknown_wards_pass_through() {
        assert_eq!(normalize_ward("sea"), "Sea");
        assert_eq!(normalize_ward(" Undercliff "), "Undercliff");
    }

    #[test]
    fn default_is_canonical() {
        assert!(WARDS.contains(&DEFAULT_WARD));
    }
}
