//! Unit tests for the access module.

mod membership_service_tests;
