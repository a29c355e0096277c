//! Official report documents, built as pure models and rendered to
//! formatted text tables. Page layout (PDF) is out of scope; each report
//! is one self-contained plain-text document.

pub mod consumption_register;
pub mod mdcf;
pub mod rice_requirement;
pub mod roll_statement;
pub mod yearly;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{RegisterError, Result};

/// The report types the shell can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Mdcf,
    RollStatement,
    ConsumptionRegister,
    RiceRequirement,
    Yearly,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Mdcf,
        ReportKind::RollStatement,
        ReportKind::ConsumptionRegister,
        ReportKind::RiceRequirement,
        ReportKind::Yearly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Mdcf => "mdcf",
            ReportKind::RollStatement => "roll-statement",
            ReportKind::ConsumptionRegister => "consumption-register",
            ReportKind::RiceRequirement => "rice-requirement",
            ReportKind::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = RegisterError;

    fn from_str(value: &str) -> Result<Self> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.name() == value.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                RegisterError::Report(format!(
                    "unknown report type `{value}` (expected one of: mdcf, roll-statement, \
                     consumption-register, rice-requirement, yearly)"
                ))
            })
    }
}

/// Writes a rendered report into `dir` as `<stem>.txt`.
pub fn write_document(dir: &Path, stem: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.txt"));
    fs::write(&path, content)?;
    Ok(path)
}

pub(crate) fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

pub(crate) fn fmt3(value: f64) -> String {
    format!("{value:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_parses_its_own_names() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.name().parse::<ReportKind>().unwrap(), kind);
        }
        assert!("bogus".parse::<ReportKind>().is_err());
    }
}
