//! Collision system property tests
//!
//! Scenario tests for the documented boundary cases and randomized sweeps
//! checking that related tests agree with each other.
