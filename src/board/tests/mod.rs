//! Unit tests for the board module.
//!
//! Tests are organised by layer: the pure ordering engine, then column and
//! task orchestration over the in-memory adapters.

mod column_service_tests;
