//! Error model algebra tests.

#[path = "../common/mod.rs"]
mod common;

mod canonical_tests;
