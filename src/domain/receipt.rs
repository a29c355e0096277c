//! Incoming rice/cash stock events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryBalance;

/// One record per incoming-stock event. The id is the creation timestamp in
/// epoch milliseconds (not date-derived), so several receipts can share a
/// date and ids survive export/import untouched. Receipts are never edited
/// in place: created by explicit add, removed by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub date: NaiveDate,
    /// Rice in kg per cohort.
    pub rice: CategoryBalance,
    /// Cash per cohort.
    pub cash: CategoryBalance,
}

impl Receipt {
    pub fn total_rice(&self) -> f64 {
        self.rice.sum()
    }

    pub fn total_cash(&self) -> f64 {
        self.cash.sum()
    }
}
