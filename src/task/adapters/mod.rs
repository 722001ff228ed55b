//! Adapter implementations of the task context's ports.

pub mod memory;
