//! Integration tests for epiboard.
//!
//! These tests drive complete load cycles through the board and
//! exercise the dashboard server over real HTTP.

mod server_tests;
