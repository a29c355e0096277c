//! Saving and deleting daily entries: the overwrite state machine and the
//! zero-attendance reason rules.

use tracing::debug;

use crate::core::services::ConsumptionService;
use crate::domain::app_data::AppData;
use crate::domain::entry::{DailyEntry, EntryDraft};
use crate::errors::{RegisterError, Result};

/// Result of a save attempt. `NeedsConfirmation` is a rejection, not an
/// error: the caller either retries with `overwrite = true` (after a
/// prompt, or immediately when the auto-overwrite preference is on) or
/// drops the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Replaced,
    NeedsConfirmation,
}

pub struct EntryService;

impl EntryService {
    /// Validates a draft and saves it as the entry for its date. The
    /// consumption snapshot is computed from the current rate table here,
    /// once, and frozen into the record. Entries are replaced wholesale;
    /// there are no partial updates.
    pub fn save(data: &mut AppData, draft: EntryDraft, overwrite: bool) -> Result<SaveOutcome> {
        let total_present = draft.present.sum();

        let reason = if total_present == 0 {
            let reason = draft.reason_for_no_meal.clone().ok_or_else(|| {
                RegisterError::Validation(
                    "a no-meal day needs a reason (sunday, holiday, stockout, strike, other)"
                        .into(),
                )
            })?;
            if reason.main.requires_detail()
                && reason
                    .detail
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or("")
                    .is_empty()
            {
                return Err(RegisterError::Validation(format!(
                    "reason `{}` needs a detail",
                    reason.main
                )));
            }
            Some(reason)
        } else {
            // A reason only makes sense on a day with no meal served.
            None
        };

        let exists = data.entry_for_date(draft.date).is_some();
        if exists && !overwrite {
            return Ok(SaveOutcome::NeedsConfirmation);
        }

        let entry = DailyEntry {
            id: DailyEntry::entry_id(draft.date),
            date: draft.date,
            present: draft.present,
            total_present,
            consumption: ConsumptionService::compute(&draft.present, &data.settings.rates),
            reason_for_no_meal: reason,
        };

        if exists {
            data.entries.retain(|e| e.date != draft.date);
        }
        let insert_at = data
            .entries
            .partition_point(|e| e.date < entry.date);
        data.entries.insert(insert_at, entry);
        debug!(date = %draft.date, replaced = exists, "entry saved");

        Ok(if exists {
            SaveOutcome::Replaced
        } else {
            SaveOutcome::Saved
        })
    }

    pub fn delete(data: &mut AppData, date: chrono::NaiveDate) -> Result<DailyEntry> {
        let idx = data
            .entries
            .iter()
            .position(|e| e.date == date)
            .ok_or_else(|| RegisterError::EntryNotFound(date.to_string()))?;
        Ok(data.entries.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::PerCategory;
    use crate::domain::entry::{NoMealReason, ReasonCategory};
    use chrono::NaiveDate;

    fn draft_on(day: u32, present: PerCategory<u32>) -> EntryDraft {
        EntryDraft {
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            present,
            reason_for_no_meal: None,
        }
    }

    #[test]
    fn first_save_succeeds_directly() {
        let mut data = AppData::default();
        let outcome =
            EntryService::save(&mut data, draft_on(5, PerCategory::new(10, 20, 5)), false)
                .unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(data.entries.len(), 1);
        assert_eq!(data.entries[0].total_present, 35);
    }

    #[test]
    fn duplicate_date_without_overwrite_needs_confirmation() {
        let mut data = AppData::default();
        EntryService::save(&mut data, draft_on(5, PerCategory::new(10, 20, 5)), false).unwrap();
        let original = data.entries[0].clone();

        let outcome =
            EntryService::save(&mut data, draft_on(5, PerCategory::new(1, 1, 1)), false).unwrap();
        assert_eq!(outcome, SaveOutcome::NeedsConfirmation);
        assert_eq!(data.entries[0], original, "original entry must be untouched");
    }

    #[test]
    fn overwrite_replaces_wholesale() {
        let mut data = AppData::default();
        EntryService::save(&mut data, draft_on(5, PerCategory::new(10, 20, 5)), false).unwrap();
        let outcome =
            EntryService::save(&mut data, draft_on(5, PerCategory::new(1, 1, 1)), true).unwrap();
        assert_eq!(outcome, SaveOutcome::Replaced);
        assert_eq!(data.entries.len(), 1);
        assert_eq!(data.entries[0].total_present, 3);
    }

    #[test]
    fn no_meal_day_requires_a_reason() {
        let mut data = AppData::default();
        let err = EntryService::save(&mut data, draft_on(7, PerCategory::splat(0)), false)
            .expect_err("zero attendance without reason must fail");
        assert!(matches!(err, RegisterError::Validation(_)));
        assert!(data.entries.is_empty());
    }

    #[test]
    fn no_meal_day_with_reason_is_stored() {
        let mut data = AppData::default();
        let mut draft = draft_on(7, PerCategory::splat(0));
        draft.reason_for_no_meal = Some(NoMealReason {
            main: ReasonCategory::Sunday,
            detail: None,
        });
        EntryService::save(&mut data, draft, false).unwrap();
        assert!(data.entries[0].reason_for_no_meal.is_some());
        assert_eq!(data.entries[0].consumption.rice_total, 0.0);
    }

    #[test]
    fn detailed_reason_category_rejects_bare_reason() {
        let mut data = AppData::default();
        let mut draft = draft_on(8, PerCategory::splat(0));
        draft.reason_for_no_meal = Some(NoMealReason {
            main: ReasonCategory::Holiday,
            detail: None,
        });
        assert!(EntryService::save(&mut data, draft, false).is_err());
    }

    #[test]
    fn reason_is_dropped_when_a_meal_was_served() {
        let mut data = AppData::default();
        let mut draft = draft_on(9, PerCategory::new(5, 5, 5));
        draft.reason_for_no_meal = Some(NoMealReason {
            main: ReasonCategory::Sunday,
            detail: None,
        });
        EntryService::save(&mut data, draft, false).unwrap();
        assert!(data.entries[0].reason_for_no_meal.is_none());
    }

    #[test]
    fn entries_stay_sorted_by_date() {
        let mut data = AppData::default();
        EntryService::save(&mut data, draft_on(10, PerCategory::new(1, 1, 1)), false).unwrap();
        EntryService::save(&mut data, draft_on(2, PerCategory::new(1, 1, 1)), false).unwrap();
        EntryService::save(&mut data, draft_on(6, PerCategory::new(1, 1, 1)), false).unwrap();
        let days: Vec<u32> = data
            .entries
            .iter()
            .map(|e| chrono::Datelike::day(&e.date))
            .collect();
        assert_eq!(days, vec![2, 6, 10]);
    }

    #[test]
    fn delete_unknown_date_fails() {
        let mut data = AppData::default();
        let missing = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert!(matches!(
            EntryService::delete(&mut data, missing),
            Err(RegisterError::EntryNotFound(_))
        ));
    }
}
