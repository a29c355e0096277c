//! Daily attendance/consumption records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::category::PerCategory;
use crate::errors::RegisterError;

pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// One record per calendar date. The `consumption` snapshot is computed
/// from the rate table once, at save time, and never recomputed afterwards;
/// rate edits therefore cannot retroactively alter past records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    /// `YYYY-MM-DD`, unique per date.
    pub id: String,
    pub date: NaiveDate,
    pub present: PerCategory<u32>,
    /// Denormalized sum of `present`.
    pub total_present: u32,
    pub consumption: Consumption,
    /// Present exactly when `total_present == 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_no_meal: Option<NoMealReason>,
}

impl DailyEntry {
    pub fn entry_id(date: NaiveDate) -> String {
        date.format(ENTRY_DATE_FORMAT).to_string()
    }

    pub fn meal_served(&self) -> bool {
        self.total_present > 0
    }
}

/// Rice and cash figures frozen into an entry at save time. The
/// per-category split is stored so monthly aggregation never has to consult
/// the rate table that was current when the entry was written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    /// Rice in kg per cohort, 3 decimals.
    pub rice: PerCategory<f64>,
    /// Cash per cohort, 2 decimals.
    pub cash: PerCategory<f64>,
    /// Total rice in kg, 3 decimals.
    pub rice_total: f64,
    pub dal_veg: f64,
    pub oil_cond: f64,
    pub salt: f64,
    pub fuel: f64,
    /// Sum of the four rounded cash components, 2 decimals.
    pub total_cash: f64,
}

/// Structured two-level reason recorded on "no meal served" days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoMealReason {
    pub main: ReasonCategory,
    /// Required when `main` defines sub-reasons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl fmt::Display for NoMealReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.main, detail),
            None => write!(f, "{}", self.main),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReasonCategory {
    Sunday,
    Holiday,
    StockOut,
    Strike,
    Other,
}

impl ReasonCategory {
    /// Categories with sub-reasons require a detail (which holiday, what
    /// ran out, what happened); bare categories stand on their own.
    pub fn requires_detail(&self) -> bool {
        matches!(
            self,
            ReasonCategory::Holiday | ReasonCategory::StockOut | ReasonCategory::Other
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReasonCategory::Sunday => "Sunday",
            ReasonCategory::Holiday => "Holiday",
            ReasonCategory::StockOut => "Stock out",
            ReasonCategory::Strike => "Strike",
            ReasonCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ReasonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReasonCategory {
    type Err = RegisterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" => Ok(ReasonCategory::Sunday),
            "holiday" => Ok(ReasonCategory::Holiday),
            "stockout" | "stock-out" | "stock_out" => Ok(ReasonCategory::StockOut),
            "strike" => Ok(ReasonCategory::Strike),
            "other" => Ok(ReasonCategory::Other),
            other => Err(RegisterError::Validation(format!(
                "unknown no-meal reason `{other}`"
            ))),
        }
    }
}

/// What the caller supplies when saving a day; the service derives the rest.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub present: PerCategory<u32>,
    pub reason_for_no_meal: Option<NoMealReason>,
}
