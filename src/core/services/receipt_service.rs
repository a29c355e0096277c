//! Incoming stock receipts: append-only, removed by id, never edited.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::domain::app_data::AppData;
use crate::domain::category::CategoryBalance;
use crate::domain::receipt::Receipt;
use crate::errors::{RegisterError, Result};

pub struct ReceiptService;

impl ReceiptService {
    /// Adds a receipt and returns its id. Amounts must be non-negative and
    /// at least one cell must be non-zero.
    pub fn add(
        data: &mut AppData,
        date: NaiveDate,
        rice: CategoryBalance,
        cash: CategoryBalance,
    ) -> Result<String> {
        if !rice.is_non_negative() || !cash.is_non_negative() {
            return Err(RegisterError::Validation(
                "receipt amounts must be non-negative".into(),
            ));
        }
        if rice.is_zero() && cash.is_zero() {
            return Err(RegisterError::Validation(
                "a receipt must carry some rice or cash".into(),
            ));
        }

        let id = Self::next_id(data);
        data.receipts.push(Receipt {
            id: id.clone(),
            date,
            rice,
            cash,
        });
        debug!(%date, id = %id, "receipt added");
        Ok(id)
    }

    pub fn delete(data: &mut AppData, id: &str) -> Result<Receipt> {
        let idx = data
            .receipts
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RegisterError::ReceiptNotFound(id.to_string()))?;
        Ok(data.receipts.remove(idx))
    }

    /// Creation-timestamp id in epoch milliseconds. Bumped past the last
    /// issued id when two receipts land within the same millisecond.
    fn next_id(data: &AppData) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        let max_existing = data
            .receipts
            .iter()
            .filter_map(|r| r.id.parse::<i64>().ok())
            .max();
        if let Some(max) = max_existing {
            if candidate <= max {
                candidate = max + 1;
            }
        }
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::PerCategory;

    fn april(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
    }

    #[test]
    fn add_assigns_unique_ids_even_on_the_same_date() {
        let mut data = AppData::default();
        let rice = PerCategory::new(10.0, 20.0, 5.0);
        let a = ReceiptService::add(&mut data, april(1), rice, PerCategory::default()).unwrap();
        let b = ReceiptService::add(&mut data, april(1), rice, PerCategory::default()).unwrap();
        assert_ne!(a, b);
        assert_eq!(data.receipts.len(), 2);
    }

    #[test]
    fn empty_receipt_is_rejected() {
        let mut data = AppData::default();
        let err = ReceiptService::add(
            &mut data,
            april(1),
            PerCategory::default(),
            PerCategory::default(),
        )
        .expect_err("all-zero receipt must fail");
        assert!(matches!(err, RegisterError::Validation(_)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut data = AppData::default();
        assert!(ReceiptService::add(
            &mut data,
            april(1),
            PerCategory::new(-1.0, 0.0, 0.0),
            PerCategory::default(),
        )
        .is_err());
    }

    #[test]
    fn delete_removes_by_id() {
        let mut data = AppData::default();
        let rice = PerCategory::new(10.0, 0.0, 0.0);
        let id = ReceiptService::add(&mut data, april(2), rice, PerCategory::default()).unwrap();
        let removed = ReceiptService::delete(&mut data, &id).unwrap();
        assert_eq!(removed.id, id);
        assert!(data.receipts.is_empty());
        assert!(matches!(
            ReceiptService::delete(&mut data, &id),
            Err(RegisterError::ReceiptNotFound(_))
        ));
    }
}
