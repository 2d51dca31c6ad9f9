//! In-memory source of truth for the transaction and group collections.

use tracing::debug;
use uuid::Uuid;

use mmm_domain::{Group, Ownership, Transaction};

use crate::CoreError;

/// Owns the canonical ledger state. All mutation passes through here; reads
/// go through [`LedgerStore::snapshot`].
///
/// Both collections keep insertion order: transactions newest-first (new
/// entries are prepended), groups in creation order (display order).
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    groups: Vec<Group>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from externally-loaded collections. Loaded blobs may
    /// predate validation, so nothing is checked here; aggregation stays
    /// defensive instead.
    pub fn from_parts(transactions: Vec<Transaction>, groups: Vec<Group>) -> Self {
        Self {
            transactions,
            groups,
        }
    }

    /// Inserts or fully replaces a transaction keyed by id.
    ///
    /// A new transaction is prepended (newest-first); a replacement keeps its
    /// original position. On any failure the store is unchanged.
    pub fn upsert_transaction(&mut self, mut txn: Transaction) -> Result<(), CoreError> {
        txn.normalize();
        txn.validate()?;
        if let (Ownership::Group, Some(group_id)) = (txn.ownership, txn.group_id) {
            if self.group(group_id).is_none() {
                return Err(CoreError::UnknownGroup(group_id));
            }
        }
        match self.transactions.iter_mut().find(|t| t.id == txn.id) {
            Some(existing) => {
                debug!(id = %txn.id, "replacing transaction");
                *existing = txn;
            }
            None => {
                debug!(id = %txn.id, "recording transaction");
                self.transactions.insert(0, txn);
            }
        }
        Ok(())
    }

    /// Appends a new group, rejecting duplicate ids.
    pub fn add_group(&mut self, group: Group) -> Result<(), CoreError> {
        group.validate()?;
        if self.group(group.id).is_some() {
            return Err(CoreError::DuplicateGroup(group.id));
        }
        debug!(id = %group.id, name = %group.name, "adding group");
        self.groups.push(group);
        Ok(())
    }

    /// Fully replaces the group with a matching id, preserving its position.
    pub fn update_group(&mut self, group: Group) -> Result<(), CoreError> {
        group.validate()?;
        match self.groups.iter_mut().find(|g| g.id == group.id) {
            Some(existing) => {
                *existing = group;
                Ok(())
            }
            None => Err(CoreError::GroupNotFound(group.id)),
        }
    }

    /// Returns a consistent read-only view of both collections.
    pub fn snapshot(&self) -> LedgerSnapshot<'_> {
        LedgerSnapshot {
            transactions: &self.transactions,
            groups: &self.groups,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

/// Immutable point-in-time view of the ledger collections.
///
/// Borrowing from the store keeps reads copy-free; mutation requires
/// `&mut LedgerStore`, so a held snapshot can never observe a partial write.
#[derive(Debug, Clone, Copy)]
pub struct LedgerSnapshot<'a> {
    pub transactions: &'a [Transaction],
    pub groups: &'a [Group],
}
