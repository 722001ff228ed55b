//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain values and the aggregate,
//! commit sealing and chain verification, read authorization, pure
//! projections, and service orchestration over the in-memory adapters.

mod support;
