//! The daily consumption formula: attendance × rate table.

use crate::core::services::{round2, round3};
use crate::domain::category::{Category, PerCategory};
use crate::domain::entry::Consumption;
use crate::domain::rates::{RateKind, RateTable};

/// Pure arithmetic over a day's attendance. Never fails; attendance is
/// non-negative by construction.
pub struct ConsumptionService;

impl ConsumptionService {
    /// Computes a day's rice and cash consumption. Rice per cohort is
    /// `present × grams ÷ 1000` (kg, 3 decimals); each cash component is
    /// summed across cohorts and rounded to 2 decimals; the total is the
    /// sum of the four rounded components.
    pub fn compute(present: &PerCategory<u32>, rates: &RateTable) -> Consumption {
        let rice_kg =
            |c: Category| f64::from(*present.get(c)) * rates.rice.get(c) / 1000.0;
        let rice = PerCategory::from_fn(|c| round3(rice_kg(c)));
        let rice_total = round3(Category::ALL.iter().map(|&c| rice_kg(c)).sum());

        let component = |kind: RateKind| {
            round2(
                Category::ALL
                    .iter()
                    .map(|&c| f64::from(*present.get(c)) * rates.get(kind).get(c))
                    .sum(),
            )
        };
        let dal_veg = component(RateKind::DalVeg);
        let oil_cond = component(RateKind::OilCond);
        let salt = component(RateKind::Salt);
        let fuel = component(RateKind::Fuel);

        let cash = PerCategory::from_fn(|c| {
            round2(f64::from(*present.get(c)) * rates.cost_per_student(c))
        });

        Consumption {
            rice,
            cash,
            rice_total,
            dal_veg,
            oil_cond,
            salt,
            fuel,
            total_cash: round2(dal_veg + oil_cond + salt + fuel),
        }
    }
}
