//! Shared test harness modules for the Vantage CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod compare_steps;
mod helpers;
