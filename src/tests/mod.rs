//! Binary-level test suites.
