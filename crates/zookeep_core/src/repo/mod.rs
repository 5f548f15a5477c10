//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage capability contract for zoo records.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Zoo::validate()` before persistence.
//! - Repository lookups are total: an absent id yields `None`/`false`/no-op,
//!   never a semantic error.

pub mod zoo_repo;
