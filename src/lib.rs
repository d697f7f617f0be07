#![doc(test(attr(deny(warnings))))]

//! Bookkeeping Core offers the client-side primitives behind a double-entry
//! bookkeeping front end: chart-of-accounts trees, expand/collapse state,
//! amount input sanitizing, and the forms and views built on top of them.

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod input;
pub mod session;
pub mod tree;
pub mod utils;

pub use errors::{BookkeepingError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bookkeeping Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
