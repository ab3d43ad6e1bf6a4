#![doc(test(attr(deny(warnings))))]

//! Budget Tracker keeps a monthly budget: a base amount, extra incomes, and fixed
//! expenses that are either open-ended monthly debits or installment plans, plus
//! free-form notes and stored logins. The whole document lives under one key in a
//! key-value store and is rewritten after every change.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Tracker tracing initialized.");
    });
}
