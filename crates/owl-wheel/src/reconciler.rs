//! Idempotent spin completion.
//!
//! A completion is checked against the nonce cache first, then the active
//! table's bounds. Only a fresh, in-range completion reaches the ledger, and
//! the nonce is cached only after the append succeeds. A nonce that is
//! rejected or whose append fails can therefore be resent.

use std::collections::{HashMap, VecDeque};

use rand::Rng;

use owl_core::{ComplicationDetail, LedgerRecord, LedgerStore, RecordDetail};

use crate::error::{WheelError, WheelResult};
use crate::options::OptionTable;
use crate::spin::{SpinProposal, propose_spin};

/// Nonces remembered by default.
pub const DEFAULT_NONCE_CAPACITY: usize = 64;

/// Recently committed nonces and the records they produced.
///
/// Bounded FIFO: once full, the oldest nonce is forgotten first.
#[derive(Debug, Clone)]
pub struct NonceCache {
    capacity: usize,
    order: VecDeque<String>,
    records: HashMap<String, LedgerRecord>,
}

impl NonceCache {
    /// A cache holding at most `capacity` nonces (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            records: HashMap::with_capacity(capacity),
        }
    }

    /// Maximum number of nonces held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of nonces held.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no nonces are held.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `nonce` has been committed and not yet evicted.
    pub fn contains(&self, nonce: &str) -> bool {
        self.records.contains_key(nonce)
    }

    /// The record committed for `nonce`.
    pub fn get(&self, nonce: &str) -> Option<&LedgerRecord> {
        self.records.get(nonce)
    }

    /// Remember `nonce`, evicting the oldest entry if full.
    pub fn insert(&mut self, nonce: String, record: LedgerRecord) {
        if self.records.contains_key(&nonce) {
            return;
        }
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(old) => {
                    self.records.remove(&old);
                }
                None => break,
            }
        }
        self.order.push_back(nonce.clone());
        self.records.insert(nonce, record);
    }
}

impl Default for NonceCache {
    fn default() -> Self {
        Self::new(DEFAULT_NONCE_CAPACITY)
    }
}

/// The outcome of a completed spin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinReceipt {
    /// The ledger record for this spin.
    pub record: LedgerRecord,
    /// The complication that was drawn.
    pub drawn: ComplicationDetail,
    /// True when this completion repeated an already committed nonce and
    /// nothing new was written.
    pub replayed: bool,
}

impl SpinReceipt {
    fn from_record(record: LedgerRecord, replayed: bool) -> Option<Self> {
        match &record.detail {
            RecordDetail::ComplicationDrawn(detail) => Some(Self {
                drawn: detail.clone(),
                record,
                replayed,
            }),
            _ => None,
        }
    }
}

/// Commits spins to the ledger exactly once per nonce.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    cache: NonceCache,
}

impl Reconciler {
    /// A reconciler remembering up to `capacity` nonces.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonceCache::new(capacity),
        }
    }

    /// Seed the cache from complication records already in the ledger, so
    /// resends survive a restart. Later records win when over capacity.
    pub fn warm_from(&mut self, records: &[LedgerRecord]) {
        for record in records {
            if let Some(nonce) = record.nonce() {
                self.cache.insert(nonce.to_string(), record.clone());
            }
        }
        log::debug!("nonce cache warmed with {} entries", self.cache.len());
    }

    /// The nonce cache.
    pub fn cache(&self) -> &NonceCache {
        &self.cache
    }

    /// The original receipt for an already-committed `nonce`, marked as
    /// replayed. Needs no table, so a resend succeeds even when the
    /// complication source has since become unreadable.
    pub fn replay(&self, nonce: &str) -> Option<SpinReceipt> {
        let nonce = nonce.trim();
        let record = self.cache.get(nonce)?;
        log::warn!("spin {nonce} already committed; returning original result");
        SpinReceipt::from_record(record.clone(), true)
    }

    /// Commit a client-chosen spin.
    ///
    /// A nonce seen before returns the original receipt with `replayed` set,
    /// whatever index is sent this time. An index outside `table` is
    /// rejected without consuming the nonce.
    pub fn complete_spin<S: LedgerStore + ?Sized>(
        &mut self,
        store: &mut S,
        table: &OptionTable,
        ward: &str,
        chosen_index: usize,
        nonce: &str,
    ) -> WheelResult<SpinReceipt> {
        let nonce = nonce.trim();
        if nonce.is_empty() {
            return Err(WheelError::InvalidNonce);
        }

        if let Some(receipt) = self.replay(nonce) {
            return Ok(receipt);
        }

        let Some(text) = table.get(chosen_index) else {
            log::warn!(
                "spin {nonce} rejected: index {chosen_index} outside {} table of {}",
                table.band(),
                table.len()
            );
            return Err(WheelError::OutOfRangeChoice {
                index: chosen_index,
                count: table.len(),
                band: table.band(),
            });
        };

        let drawn = ComplicationDetail {
            index: chosen_index,
            option_count: table.len(),
            text: text.to_string(),
            band: table.band().to_string(),
            nonce: nonce.to_string(),
        };
        let record = LedgerRecord::complication(ward, drawn.clone());
        store.append(record.clone())?;
        self.cache.insert(nonce.to_string(), record.clone());
        log::info!(
            "spin {nonce} committed: {} #{chosen_index} \"{}\"",
            drawn.band,
            drawn.text
        );

        Ok(SpinReceipt {
            record,
            drawn,
            replayed: false,
        })
    }

    /// Pick the index here rather than trusting a client, then commit it.
    ///
    /// The returned proposal tells the presentation where to land the wheel.
    pub fn draw_spin<S, R>(
        &mut self,
        store: &mut S,
        table: &OptionTable,
        ward: &str,
        rng: &mut R,
    ) -> WheelResult<(SpinProposal, SpinReceipt)>
    where
        S: LedgerStore + ?Sized,
        R: Rng + ?Sized,
    {
        let proposal =
            propose_spin(table.len(), rng).ok_or(WheelError::EmptyTable(table.band()))?;
        let receipt =
            self.complete_spin(store, table, ward, proposal.chosen_index, &proposal.nonce)?;
        Ok((proposal, receipt))
    }
}
