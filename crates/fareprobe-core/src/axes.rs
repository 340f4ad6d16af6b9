use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::search::ResourceKind;
use crate::ConfigError;

/// A month of a specific year, sent to the search form as `"<month>^<year>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthYear {
    pub month: u8,
    pub year: u16,
}

impl MonthYear {
    #[must_use]
    pub fn new(month: u8, year: u16) -> Self {
        Self { month, year }
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}^{}", self.month, self.year)
    }
}

/// Party size submitted with every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub adults: u8,
    pub children: u8,
}

impl Default for Party {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
        }
    }
}

/// Enumerated domains for every search axis. Immutable once a grid is built
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAxes {
    /// Origin airport codes. Only the flights resource searches across them,
    /// so axes files for other resources may leave this out.
    #[serde(default)]
    pub airports: Vec<String>,
    pub days: Vec<u8>,
    pub months: Vec<MonthYear>,
    pub nights: Vec<u16>,
    #[serde(default)]
    pub party: Party,
}

impl SearchAxes {
    /// Small ranges for a quick functional check of the pipeline.
    #[must_use]
    pub fn debug_preset() -> Self {
        Self {
            airports: vec!["LON".to_string(), "MAN".to_string()],
            days: (10..14).collect(),
            months: vec![MonthYear::new(1, 2025)],
            nights: (12..15).collect(),
            party: Party::default(),
        }
    }

    /// Full date range. Summer school-holiday months are left out; most
    /// regional airports only book about eleven months ahead.
    #[must_use]
    pub fn full_preset() -> Self {
        Self {
            airports: vec!["LON".to_string(), "MAN".to_string()],
            days: (1..31).collect(),
            months: [1, 2, 3, 4, 5, 6, 9, 10, 11, 12]
                .into_iter()
                .map(|m| MonthYear::new(m, 2025))
                .collect(),
            nights: (7..13).collect(),
            party: Party::default(),
        }
    }

    /// Check every date axis is non-empty, and every axis is in range and
    /// free of duplicates. `airports` may be empty here; see
    /// [`SearchAxes::validate_for`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first offending axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("days", &self.days)?;
        non_empty("months", &self.months)?;
        non_empty("nights", &self.nights)?;

        if let Some(code) = self.airports.iter().find(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "airport code must be non-empty (got {code:?})"
            )));
        }
        if let Some(day) = self.days.iter().find(|d| !(1..=31).contains(*d)) {
            return Err(ConfigError::Validation(format!(
                "day {day} is outside 1..=31"
            )));
        }
        if let Some(m) = self.months.iter().find(|m| !(1..=12).contains(&m.month)) {
            return Err(ConfigError::Validation(format!(
                "month {} is outside 1..=12",
                m.month
            )));
        }
        if self.nights.contains(&0) {
            return Err(ConfigError::Validation(
                "stay length must be at least one night".to_string(),
            ));
        }

        unique("airports", &self.airports)?;
        unique("days", &self.days)?;
        unique("months", &self.months)?;
        unique("nights", &self.nights)?;
        Ok(())
    }

    /// [`SearchAxes::validate`], plus a non-empty `airports` axis when
    /// `resource` searches by origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first offending axis.
    pub fn validate_for(&self, resource: ResourceKind) -> Result<(), ConfigError> {
        self.validate()?;
        if resource.uses_origin() {
            non_empty("airports", &self.airports)?;
        }
        Ok(())
    }
}

fn non_empty<T>(axis: &str, values: &[T]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Validation(format!(
            "search axis '{axis}' must have at least one value"
        )));
    }
    Ok(())
}

fn unique<T: Eq + Hash + std::fmt::Debug>(axis: &str, values: &[T]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(ConfigError::Validation(format!(
                "duplicate value {value:?} in search axis '{axis}'"
            )));
        }
    }
    Ok(())
}

/// Load and validate search axes from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_search_axes(path: &Path) -> Result<SearchAxes, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AxesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let axes: SearchAxes = serde_yaml::from_str(&content)?;
    axes.validate()?;
    Ok(axes)
}
