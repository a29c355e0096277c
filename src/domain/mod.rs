pub mod app_data;
pub mod balance;
pub mod category;
pub mod entry;
pub mod rates;
pub mod receipt;
pub mod settings;

pub use app_data::{AppData, AuthState};
pub use balance::{
    Abstract, CategoryTotals, ExpenditureBreakdown, FinancialYear, MonthKey, MonthTotals,
    MonthlyBalanceData, MonthlySummary,
};
pub use category::{Category, CategoryBalance, PerCategory};
pub use entry::{Consumption, DailyEntry, EntryDraft, NoMealReason, ReasonCategory};
pub use rates::{RateKind, RateTable};
pub use receipt::Receipt;
pub use settings::{
    AlertThresholds, ClassRoll, GenderCount, HealthRecord, KitchenType, SchoolProfile, Settings,
    StaffMember,
};
