//! Unit tests for epiboard.

mod parser_tests;
mod snapshot_tests;
