//! DEM text format tests.

#[path = "../common/mod.rs"]
mod common;

mod parser_tests;
mod writer_tests;
