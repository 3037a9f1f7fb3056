//! Shared utilities for Lookout crates.
//!
//! Currently this only hosts [`observability`], the centralised tracing
//! setup used by binaries and integration tests. It is intentionally
//! lightweight so every crate can depend on it without heavy transitive
//! costs.

pub mod observability;
