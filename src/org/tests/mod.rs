//! Unit tests for the org module.
//!
//! Tests are organised by concern: domain value behaviour and scope
//! resolution over the in-memory directory.
