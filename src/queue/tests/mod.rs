//! Test modules for the handoff queue system
//!
//! Tests are organized by functional area.

mod lifecycle;
mod pool;
