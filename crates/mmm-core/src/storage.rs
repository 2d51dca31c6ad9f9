use mmm_domain::{Group, Transaction};

use crate::CoreError;

/// Abstraction over persistence backends for the two ledger blobs.
///
/// Semantics are last-write-wins and fire-and-forget: `save` runs after
/// every successful mutation, a failure never rolls the mutation back, and
/// `load` yields empty collections when no prior state exists.
pub trait LedgerStorage: Send + Sync {
    fn load(&self) -> Result<(Vec<Transaction>, Vec<Group>), CoreError>;
    fn save(&self, transactions: &[Transaction], groups: &[Group]) -> Result<(), CoreError>;
}
