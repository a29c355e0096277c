pub mod consumption_service;
pub mod entry_service;
pub mod ledger_service;
pub mod receipt_service;
pub mod settings_service;
pub mod summary_service;

pub use consumption_service::ConsumptionService;
pub use entry_service::{EntryService, SaveOutcome};
pub use ledger_service::{LedgerService, OverallBalance, StockAlert, StockKind};
pub use receipt_service::ReceiptService;
pub use settings_service::SettingsService;
pub use summary_service::SummaryService;

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 3 decimal places, half away from zero.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
