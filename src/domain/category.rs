//! The three school-stage cohorts every rate, balance, and aggregate is
//! partitioned by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RegisterError;

/// School-stage cohort. Totals are always the sum across exactly these
/// three, no more, no fewer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Balvatika,
    Primary,
    Middle,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Balvatika, Category::Primary, Category::Middle];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Balvatika => "Balvatika",
            Category::Primary => "Primary",
            Category::Middle => "Middle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = RegisterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "balvatika" => Ok(Category::Balvatika),
            "primary" => Ok(Category::Primary),
            "middle" => Ok(Category::Middle),
            other => Err(RegisterError::Validation(format!(
                "unknown category `{other}` (expected balvatika, primary, or middle)"
            ))),
        }
    }
}

/// One value per cohort. The generic cell keeps attendance counts (`u32`)
/// and monetary/stock figures (`f64`) in the same shape the persisted JSON
/// uses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PerCategory<T> {
    pub balvatika: T,
    pub primary: T,
    pub middle: T,
}

pub type CategoryBalance = PerCategory<f64>;

impl<T> PerCategory<T> {
    pub fn new(balvatika: T, primary: T, middle: T) -> Self {
        Self {
            balvatika,
            primary,
            middle,
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Balvatika => &self.balvatika,
            Category::Primary => &self.primary,
            Category::Middle => &self.middle,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Balvatika => &mut self.balvatika,
            Category::Primary => &mut self.primary,
            Category::Middle => &mut self.middle,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            balvatika: f(Category::Balvatika),
            primary: f(Category::Primary),
            middle: f(Category::Middle),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerCategory<U> {
        PerCategory {
            balvatika: f(&self.balvatika),
            primary: f(&self.primary),
            middle: f(&self.middle),
        }
    }
}

impl<T: Copy> PerCategory<T> {
    pub fn splat(value: T) -> Self {
        Self {
            balvatika: value,
            primary: value,
            middle: value,
        }
    }
}

impl PerCategory<f64> {
    pub fn sum(&self) -> f64 {
        self.balvatika + self.primary + self.middle
    }

    /// True when every cell is finite and non-negative.
    pub fn is_non_negative(&self) -> bool {
        Category::ALL
            .iter()
            .all(|&c| self.get(c).is_finite() && *self.get(c) >= 0.0)
    }

    pub fn is_zero(&self) -> bool {
        Category::ALL.iter().all(|&c| *self.get(c) == 0.0)
    }
}

impl PerCategory<u32> {
    pub fn sum(&self) -> u32 {
        self.balvatika + self.primary + self.middle
    }
}
