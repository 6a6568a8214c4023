//! Domain model for reviewer records.
//!
//! # Responsibility
//! - Define the canonical reviewer shape shared by storage, service and HTTP.
//! - Own field-level validation rules.
//!
//! # Invariants
//! - A reviewer is identified by a storage-assigned `ReviewerId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod reviewer;
