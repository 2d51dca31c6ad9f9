//! mmm-domain
//!
//! Pure domain models (Transaction, Group) and their validity rules.
//! No I/O, no storage. Only data types and core enums.

pub mod common;
pub mod group;
pub mod transaction;

pub use common::*;
pub use group::*;
pub use transaction::*;
