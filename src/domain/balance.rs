//! Month keys, the closing-balance ledger snapshot, and the monthly
//! summary types produced by the roll-up calculation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::category::{CategoryBalance, PerCategory};
use crate::domain::entry::DailyEntry;
use crate::errors::RegisterError;

/// Calendar month key, rendered as zero-padded `YYYY-MM`. Ordering follows
/// `(year, month)`, which coincides with the string order of the rendered
/// form; the ledger depends on that when finding the nearest prior month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, RegisterError> {
        if !(1..=12).contains(&month) || !(1900..=9999).contains(&year) {
            return Err(RegisterError::Validation(format!(
                "invalid month key {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        next.first_day()
            .signed_duration_since(self.first_day())
            .num_days() as u32
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = RegisterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse = || -> Option<MonthKey> {
            let (year, month) = value.split_once('-')?;
            if year.len() != 4 || month.len() != 2 {
                return None;
            }
            MonthKey::new(year.parse().ok()?, month.parse().ok()?).ok()
        };
        parse().ok_or_else(|| {
            RegisterError::Validation(format!("month key `{value}` is not of the form YYYY-MM"))
        })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct MonthKeyVisitor;

impl Visitor<'_> for MonthKeyVisitor {
    type Value = MonthKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a month key of the form YYYY-MM")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<MonthKey, E> {
        value.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(MonthKeyVisitor)
    }
}

/// A financial year running April through March, labelled `YYYY-YY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    /// The twelve month keys from April to the following March.
    pub fn months(&self) -> Vec<MonthKey> {
        (4..=12)
            .map(|m| MonthKey {
                year: self.start_year,
                month: m,
            })
            .chain((1..=3).map(|m| MonthKey {
                year: self.start_year + 1,
                month: m,
            }))
            .collect()
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}",
            self.start_year,
            (self.start_year + 1) % 100
        )
    }
}

impl FromStr for FinancialYear {
    type Err = RegisterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse = || -> Option<FinancialYear> {
            let (start, end) = value.split_once('-')?;
            if start.len() != 4 || end.len() != 2 {
                return None;
            }
            let start_year: i32 = start.parse().ok()?;
            let end_part: i32 = end.parse().ok()?;
            if (start_year + 1) % 100 != end_part {
                return None;
            }
            Some(FinancialYear { start_year })
        };
        parse().ok_or_else(|| {
            RegisterError::Validation(format!(
                "financial year `{value}` is not of the form YYYY-YY"
            ))
        })
    }
}

/// Closing-balance snapshot carried from one month to the next.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalanceData {
    pub rice: CategoryBalance,
    pub cash: CategoryBalance,
}

/// One opening/received/total/consumed/balance line of an abstract table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Abstract {
    pub opening: f64,
    pub received: f64,
    pub total: f64,
    pub consumed: f64,
    pub balance: f64,
}

/// Grand totals for a month, summed across the three cohorts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub present: u32,
    pub rice: f64,
    pub expenditure: f64,
}

/// Per-cohort attendance/consumption accumulators for a month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub present: PerCategory<u32>,
    pub rice: PerCategory<f64>,
    pub expenditure: PerCategory<f64>,
}

/// The month's cash expenditure split into its four components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenditureBreakdown {
    pub dal_veg: f64,
    pub oil_cond: f64,
    pub salt: f64,
    pub fuel: f64,
    pub total: f64,
}

/// Output of the monthly roll-up: a pure projection over entries, receipts,
/// the prior closing balance, and the settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub entries: Vec<DailyEntry>,
    pub rice_abstracts: PerCategory<Abstract>,
    pub cash_abstracts: PerCategory<Abstract>,
    pub totals: MonthTotals,
    pub category_totals: CategoryTotals,
    pub expenditure_breakdown: ExpenditureBreakdown,
    pub closing_balance: MonthlyBalanceData,
}

impl MonthlySummary {
    /// Days in the month on which a meal was actually served.
    pub fn serving_days(&self) -> usize {
        self.entries.iter().filter(|e| e.meal_served()).count()
    }
}
