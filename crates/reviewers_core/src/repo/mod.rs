//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the reviewer data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Reviewer::validate()` before persistence.
//! - Unique-constraint failures surface as `RepoError::DuplicateEmail`.

pub mod reviewer_repo;
