#![doc(test(attr(deny(warnings))))]

//! MDM Register keeps the daily attendance, consumption, stock, and
//! reporting records of a single-school PM POSHAN (mid-day meal) program.
//!
//! The crate is split into a pure domain/service core, a JSON persistence
//! layer, report builders, and an interactive CLI shell binary.

pub mod cli;
pub mod core;
pub mod domain;
pub mod errors;
pub mod reports;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("mdm_register=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("MDM Register tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
