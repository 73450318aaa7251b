//! Data models for gigawork
//!
//! This module contains backend-independent data structures representing
//! git concepts like commits and diff entries, and the dataset rows built
//! from them.

mod change_type;
mod commit;
mod diff_entry;
mod entry;

pub use change_type::ChangeType;
pub use commit::{Commit, Signature};
pub use diff_entry::{DiffEntry, DiffSide};
pub use entry::{Entry, Validity};
