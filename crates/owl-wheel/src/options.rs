//! Complication tables.
//!
//! Each heat band has its own table. The reconciler only needs a table's
//! length (to validate the client's index) and the text at the chosen
//! index (to store in the ledger).

use std::path::{Path, PathBuf};

use owl_mechanics::HeatBand;

use crate::error::{WheelError, WheelResult};

/// Complications while heat is low.
pub const LOW_HEAT_COMPLICATIONS: &[&str] = &[
    "A street urchin recognises a hand-sign and wants in.",
    "A nosy neighbour keeps a diary of comings and goings.",
    "The fence is short on coin; payment comes in favours.",
    "Rain washes out the escape route; take the long way home.",
    "A grateful family tells one person too many.",
    "A watch patrol changes its rounds without warning.",
    "A rival crew claims the job as their own.",
    "A dropped token is found by a curious scribe.",
];

/// Complications while heat is high.
pub const HIGH_HEAT_COMPLICATIONS: &[&str] = &[
    "A watch sergeant starts matching your methods across wards.",
    "Bag checks at every ward gate until the next tenday.",
    "A diviner is hired to read the residue of your last job.",
    "An informant sells a description of one crew member.",
    "A rival guild sets a trap at your favourite drop.",
    "Curfew bells ring early; the streets empty at dusk.",
    "A bounty notice appears with an uncomfortably good sketch.",
    "A safehouse landlord raises the rent, and his eyebrows.",
];

/// The options for one heat band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTable {
    band: HeatBand,
    options: Vec<String>,
}

impl OptionTable {
    /// Build a table, rejecting an empty one.
    pub fn new(band: HeatBand, options: Vec<String>) -> WheelResult<Self> {
        if options.is_empty() {
            return Err(WheelError::EmptyTable(band));
        }
        Ok(Self { band, options })
    }

    /// Band this table belongs to.
    pub fn band(&self) -> HeatBand {
        self.band
    }

    /// Number of options (never zero).
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always false; tables are never empty.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Text at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// All options in wheel order.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// Where complication tables come from.
pub trait OptionSource {
    /// Load the table for `band`.
    fn load_options(&self, band: HeatBand) -> WheelResult<OptionTable>;
}

/// The built-in tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOptions;

impl OptionSource for BuiltinOptions {
    fn load_options(&self, band: HeatBand) -> WheelResult<OptionTable> {
        let list = match band {
            HeatBand::Low => LOW_HEAT_COMPLICATIONS,
            HeatBand::High => HIGH_HEAT_COMPLICATIONS,
        };
        OptionTable::new(band, list.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Tables read from `complications_low.json` and `complications_high.json`
/// (JSON arrays of strings) in a directory.
///
/// A band whose file is missing falls back to the built-in table.
#[derive(Debug, Clone)]
pub struct DirOptions {
    dir: PathBuf,
}

impl DirOptions {
    /// Read tables from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file for `band`.
    pub fn path_for(&self, band: HeatBand) -> PathBuf {
        let name = match band {
            HeatBand::Low => "complications_low.json",
            HeatBand::High => "complications_high.json",
        };
        self.dir.join(name)
    }
}

impl OptionSource for DirOptions {
    fn load_options(&self, band: HeatBand) -> WheelResult<OptionTable> {
        let path = self.path_for(band);
        if !path.exists() {
            log::debug!(
                "{} not found, using built-in {band} table",
                path.display()
            );
            return BuiltinOptions.load_options(band);
        }
        let options = read_table(&path)?;
        OptionTable::new(band, options)
    }
}

fn read_table(path: &Path) -> WheelResult<Vec<String>> {
    let load_err = |message: String| WheelError::TableLoad {
        path: path.to_path_buf(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_tables_are_distinct() {
        let low = BuiltinOptions.load_options(HeatBand::Low).unwrap();
        let high = BuiltinOptions.load_options(HeatBand::High).unwrap();
        assert_eq!(low.band(), HeatBand::Low);
        assert_eq!(high.band(), HeatBand::High);
        assert!(!low.is_empty());
        assert_ne!(low.options(), high.options());
    }

    #[test]
    fn empty_table_rejected() {
        let err = OptionTable::new(HeatBand::High, Vec::new()).unwrap_err();
        assert!(matches!(err, WheelError::EmptyTable(HeatBand::High)));
    }

    #[test]
    fn get_is_bounds_checked() {
        let t = OptionTable::new(HeatBand::Low, vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(t.get(1), Some("b"));
        assert_eq!(t.get(2), None);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn dir_source_reads_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("complications_high.json"),
            r#"["Dragnet", "Scrying", "Bounty"]"#,
        )
        .unwrap();
        let source = DirOptions::new(dir.path());

        let high = source.load_options(HeatBand::High).unwrap();
        assert_eq!(high.len(), 3);
        assert_eq!(high.get(0), Some("Dragnet"));

        // Missing low table falls back to the built-ins.
        let low = source.load_options(HeatBand::Low).unwrap();
        assert_eq!(low.len(), LOW_HEAT_COMPLICATIONS.len());
    }

    #[test]
    fn dir_source_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("complications_low.json"), "{oops").unwrap();
        let err = DirOptions::new(dir.path())
            .load_options(HeatBand::Low)
            .unwrap_err();
        assert!(matches!(err, WheelError::TableLoad { .. }));
        assert!(err.to_string().contains("complications_low.json"));
    }

    #[test]
    fn dir_source_rejects_empty_list() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("complications_low.json"), "[]").unwrap();
        let err = DirOptions::new(dir.path())
            .load_options(HeatBand::Low)
            .unwrap_err();
        assert!(matches!(err, WheelError::EmptyTable(HeatBand::Low)));
    }
}
