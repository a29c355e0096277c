//! School configuration: identity, rolls, rates, staff, health record,
//! alert thresholds, and the ledger's initial opening balance.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::balance::MonthlyBalanceData;
use crate::domain::category::Category;
use crate::domain::rates::RateTable;
use crate::errors::{RegisterError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolProfile {
    pub name: String,
    /// 11-digit UDISE code; empty until configured.
    #[serde(default)]
    pub udise_code: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub incharge_name: String,
    #[serde(default)]
    pub incharge_contact: String,
    #[serde(default)]
    pub kitchen_type: KitchenType,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum KitchenType {
    #[default]
    SchoolKitchen,
    CentralizedKitchen,
    NgoSupplied,
}

impl fmt::Display for KitchenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KitchenType::SchoolKitchen => "School kitchen",
            KitchenType::CentralizedKitchen => "Centralized kitchen",
            KitchenType::NgoSupplied => "NGO supplied",
        };
        f.write_str(label)
    }
}

/// Boys/girls split used by the roll statement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenderCount {
    pub boys: u32,
    pub girls: u32,
}

impl GenderCount {
    pub fn new(boys: u32, girls: u32) -> Self {
        Self { boys, girls }
    }

    pub fn total(&self) -> u32 {
        self.boys + self.girls
    }
}

/// Enrollment row for one class, split general / ST-SC by gender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoll {
    pub class_label: String,
    pub category: Category,
    pub general: GenderCount,
    pub st_sc: GenderCount,
}

impl ClassRoll {
    pub fn on_roll(&self) -> u32 {
        self.general.total() + self.st_sc.total()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl StaffMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Health/inspection fields carried onto the official monthly forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub ifa_tablets_given: bool,
    pub deworming_done: bool,
    pub health_checkup_done: bool,
    pub mme_inspections: u32,
    pub smc_meetings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Low-stock alert thresholds for the live overall balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertThresholds {
    pub min_rice_kg: f64,
    pub min_cash: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            min_rice_kg: 50.0,
            min_cash: 500.0,
        }
    }
}

/// Aggregate root for everything the incharge configures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub school: SchoolProfile,
    #[serde(default)]
    pub class_rolls: Vec<ClassRoll>,
    #[serde(default)]
    pub rates: RateTable,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub health: HealthRecord,
    #[serde(default)]
    pub alerts: AlertThresholds,
    /// When enabled, saving over an existing entry replaces it without a
    /// confirmation round-trip.
    #[serde(default)]
    pub auto_overwrite_entries: bool,
    /// Ledger base case used when no prior month exists.
    #[serde(default)]
    pub initial_opening_balance: MonthlyBalanceData,
}

impl Settings {
    /// Total enrolled students for one cohort.
    pub fn on_roll(&self, category: Category) -> u32 {
        self.class_rolls
            .iter()
            .filter(|roll| roll.category == category)
            .map(ClassRoll::on_roll)
            .sum()
    }

    pub fn total_on_roll(&self) -> u32 {
        Category::ALL.iter().map(|&c| self.on_roll(c)).sum()
    }

    /// Validation run by the settings-save flow. Violations abort the save
    /// and leave state untouched.
    pub fn validate(&self) -> Result<()> {
        if self.school.name.trim().is_empty() {
            return Err(RegisterError::Validation(
                "school name must not be empty".into(),
            ));
        }
        let udise = self.school.udise_code.trim();
        if !udise.is_empty() && (udise.len() != 11 || !udise.bytes().all(|b| b.is_ascii_digit())) {
            return Err(RegisterError::Validation(
                "UDISE code must be exactly 11 digits".into(),
            ));
        }
        if !self.rates.is_valid() {
            return Err(RegisterError::Validation(
                "rates must be non-negative numbers".into(),
            ));
        }
        if self.alerts.min_rice_kg < 0.0 || self.alerts.min_cash < 0.0 {
            return Err(RegisterError::Validation(
                "alert thresholds must be non-negative".into(),
            ));
        }
        if !self.initial_opening_balance.rice.is_non_negative()
            || !self.initial_opening_balance.cash.is_non_negative()
        {
            return Err(RegisterError::Validation(
                "initial opening balance must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
