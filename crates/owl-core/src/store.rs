use crate::error::LedgerResult;
use crate::record::LedgerRecord;

/// Append-only storage for ledger records.
///
/// Implementations must preserve insertion order and must not drop a record
/// once `append` has returned `Ok`. An `append` either stores the whole
/// record or fails without storing anything.
pub trait LedgerStore {
    /// Append one record.
    fn append(&mut self, record: LedgerRecord) -> LedgerResult<()>;

    /// Read every record in insertion order.
    fn read_all(&self) -> LedgerResult<Vec<LedgerRecord>>;

    /// Number of stored records.
    fn len(&self) -> LedgerResult<usize> {
        Ok(self.read_all()?.len())
    }

    /// Whether the store holds no records.
    fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// A ledger held in memory for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    records: Vec<LedgerRecord>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the stored records.
    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }
}

impl From<Vec<LedgerRecord>> for MemoryLedger {
    fn from(records: Vec<LedgerRecord>) -> Self {
        Self { records }
    }
}

impl LedgerStore for MemoryLedger {
    fn append(&mut self, record: LedgerRecord) -> LedgerResult<()> {
        self.records.push(record);
        Ok(())
    }

    fn read_all(&self) -> LedgerResult<Vec<LedgerRecord>> {
        Ok(self.records.clone())
    }

    fn len(&self) -> LedgerResult<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger() {
        let l = MemoryLedger::new();
        assert!(l.is_empty().unwrap());
        assert_eq!(l.len().unwrap(), 0);
    }

    #[test]
    fn append_preserves_order() {
        let mut l = MemoryLedger::new();
        l.append(LedgerRecord::adjustment("Dock", "first", 0.0, -1.0))
            .unwrap();
        l.append(LedgerRecord::adjustment("Dock", "second", 1.0, 0.0))
            .unwrap();
        let all = l.read_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].notoriety_delta, -1.0);
        assert_eq!(all[1].renown_delta, 1.0);
        assert_eq!(l.records().len(), 2);
    }

    #[test]
    fn from_vec() {
        let l = MemoryLedger::from(vec![LedgerRecord::adjustment("Sea", "x", 0.0, 0.0)]);
        assert_eq!(l.len().unwrap(), 1);
    }
}
