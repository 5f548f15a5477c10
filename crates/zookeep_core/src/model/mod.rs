//! Domain model for zoo records.
//!
//! # Responsibility
//! - Define the canonical record shape used by core business logic.
//! - Keep required-field validation next to the data it guards.
//!
//! # Invariants
//! - A persisted record is identified by a stable `ZooId` assigned by storage.
//! - Deletion is a hard delete; there are no tombstones in this domain.

pub mod zoo;
