//! Per-category unit rates for rice and the four cash cost components.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, PerCategory};
use crate::errors::RegisterError;

/// The five rate kinds tracked per cohort.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RateKind {
    Rice,
    DalVeg,
    OilCond,
    Salt,
    Fuel,
}

impl RateKind {
    pub const ALL: [RateKind; 5] = [
        RateKind::Rice,
        RateKind::DalVeg,
        RateKind::OilCond,
        RateKind::Salt,
        RateKind::Fuel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RateKind::Rice => "Rice (g)",
            RateKind::DalVeg => "Dal/Vegetables",
            RateKind::OilCond => "Oil/Condiments",
            RateKind::Salt => "Salt",
            RateKind::Fuel => "Fuel",
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RateKind {
    type Err = RegisterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rice" => Ok(RateKind::Rice),
            "dal-veg" | "dalveg" | "dal_veg" => Ok(RateKind::DalVeg),
            "oil-cond" | "oilcond" | "oil_cond" => Ok(RateKind::OilCond),
            "salt" => Ok(RateKind::Salt),
            "fuel" => Ok(RateKind::Fuel),
            other => Err(RegisterError::Validation(format!(
                "unknown rate kind `{other}` (expected rice, dal-veg, oil-cond, salt or fuel)"
            ))),
        }
    }
}

/// Unit rates per student per day. `rice` is grams; the four cash kinds are
/// currency. Owned by `Settings`, mutated only through the settings-save
/// flow, read-only to the calculators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub rice: PerCategory<f64>,
    pub dal_veg: PerCategory<f64>,
    pub oil_cond: PerCategory<f64>,
    pub salt: PerCategory<f64>,
    pub fuel: PerCategory<f64>,
}

impl RateTable {
    pub fn get(&self, kind: RateKind) -> &PerCategory<f64> {
        match kind {
            RateKind::Rice => &self.rice,
            RateKind::DalVeg => &self.dal_veg,
            RateKind::OilCond => &self.oil_cond,
            RateKind::Salt => &self.salt,
            RateKind::Fuel => &self.fuel,
        }
    }

    pub fn get_mut(&mut self, kind: RateKind) -> &mut PerCategory<f64> {
        match kind {
            RateKind::Rice => &mut self.rice,
            RateKind::DalVeg => &mut self.dal_veg,
            RateKind::OilCond => &mut self.oil_cond,
            RateKind::Salt => &mut self.salt,
            RateKind::Fuel => &mut self.fuel,
        }
    }

    /// Total cash cost per student per day for a cohort (rice excluded).
    pub fn cost_per_student(&self, category: Category) -> f64 {
        self.dal_veg.get(category)
            + self.oil_cond.get(category)
            + self.salt.get(category)
            + self.fuel.get(category)
    }

    /// Every rate across every kind is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        RateKind::ALL.iter().all(|&kind| self.get(kind).is_non_negative())
    }
}

impl Default for RateTable {
    /// Scheme norms: 100 g rice for balvatika/primary, 150 g for middle,
    /// with the cash components split accordingly.
    fn default() -> Self {
        Self {
            rice: PerCategory::new(100.0, 100.0, 150.0),
            dal_veg: PerCategory::new(2.50, 2.50, 3.75),
            oil_cond: PerCategory::new(1.20, 1.20, 1.80),
            salt: PerCategory::new(0.30, 0.30, 0.45),
            fuel: PerCategory::new(1.00, 1.00, 1.50),
        }
    }
}
