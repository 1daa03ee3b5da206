//! Unit tests for the activity module.

mod feed_tests;
mod payload_tests;
mod recorder_tests;
