//! The entry save state machine, end to end through persistence.

mod common;

use common::{date, setup_store};
use mdm_register::core::services::{EntryService, SaveOutcome};
use mdm_register::domain::{
    AppData, EntryDraft, NoMealReason, PerCategory, ReasonCategory,
};

fn draft(present: PerCategory<u32>) -> EntryDraft {
    EntryDraft {
        date: date(2024, 4, 10),
        present,
        reason_for_no_meal: None,
    }
}

#[test]
fn saving_twice_needs_confirmation_then_replaces() {
    let mut data = AppData::default();
    let first = EntryService::save(&mut data, draft(PerCategory::new(10, 10, 10)), false)
        .expect("first save");
    assert_eq!(first, SaveOutcome::Saved);

    let second = EntryService::save(&mut data, draft(PerCategory::new(20, 20, 20)), false)
        .expect("second save");
    assert_eq!(second, SaveOutcome::NeedsConfirmation);
    assert_eq!(data.entries[0].total_present, 30, "rejected save mutates nothing");

    let third = EntryService::save(&mut data, draft(PerCategory::new(20, 20, 20)), true)
        .expect("overwrite");
    assert_eq!(third, SaveOutcome::Replaced);
    assert_eq!(data.entries.len(), 1);
    assert_eq!(data.entries[0].total_present, 60);
}

#[test]
fn zero_attendance_requires_a_detailed_reason() {
    let mut data = AppData::default();
    let mut no_meal = draft(PerCategory::splat(0));
    assert!(EntryService::save(&mut data, no_meal.clone(), false).is_err());

    no_meal.reason_for_no_meal = Some(NoMealReason {
        main: ReasonCategory::Holiday,
        detail: None,
    });
    assert!(
        EntryService::save(&mut data, no_meal.clone(), false).is_err(),
        "holiday needs a detail"
    );

    no_meal.reason_for_no_meal = Some(NoMealReason {
        main: ReasonCategory::Holiday,
        detail: Some("Republic Day".into()),
    });
    EntryService::save(&mut data, no_meal, false).expect("valid no-meal day");
    assert!(!data.entries[0].meal_served());
}

#[test]
fn consumption_is_frozen_at_save_time_even_across_reload() {
    let store = setup_store();
    let mut data = AppData::default();
    EntryService::save(&mut data, draft(PerCategory::new(25, 40, 35)), false).expect("save");
    let frozen = data.entries[0].consumption.clone();
    store.save(&data).expect("persist");

    // Double the rates and save a different day; the April 10 snapshot
    // must not move.
    data.settings.rates.rice = PerCategory::new(200.0, 200.0, 300.0);
    EntryService::save(
        &mut data,
        EntryDraft {
            date: date(2024, 4, 11),
            present: PerCategory::new(25, 40, 35),
            reason_for_no_meal: None,
        },
        false,
    )
    .expect("save at new rates");
    store.save(&data).expect("persist again");

    let reloaded = store.load().expect("reload");
    assert_eq!(reloaded.entries[0].consumption, frozen);
    assert!(reloaded.entries[1].consumption.rice_total > frozen.rice_total);
}

#[test]
fn entries_stay_sorted_by_date() {
    let mut data = AppData::default();
    for day in [14, 2, 30, 7] {
        EntryService::save(
            &mut data,
            EntryDraft {
                date: date(2024, 4, day),
                present: PerCategory::new(1, 1, 1),
                reason_for_no_meal: None,
            },
            false,
        )
        .expect("save");
    }
    let days: Vec<u32> = data
        .entries
        .iter()
        .map(|e| e.id[8..].parse().unwrap())
        .collect();
    assert_eq!(days, vec![2, 7, 14, 30]);
}

#[test]
fn delete_removes_exactly_the_requested_date() {
    let mut data = AppData::default();
    EntryService::save(&mut data, draft(PerCategory::new(5, 5, 5)), false).expect("save");
    assert!(EntryService::delete(&mut data, date(2024, 4, 11)).is_err());

    let removed = EntryService::delete(&mut data, date(2024, 4, 10)).expect("delete");
    assert_eq!(removed.id, "2024-04-10");
    assert!(data.entries.is_empty());
}
