use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

/// Whether matching instances are kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Inclusive,
    Exclusive,
}

impl FromStr for Mode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inclusive" | "include" => Ok(Mode::Inclusive),
            "exclusive" | "exclude" => Ok(Mode::Exclusive),
            other => Err(FilterError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Inclusive => "inclusive",
            Mode::Exclusive => "exclusive",
        })
    }
}

/// What to do when a filter raises an error on one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Drop the offending instance and carry on.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(FilterError::UnsupportedErrorPolicy(other.to_string())),
        }
    }
}

/// Options for a filter run. Defaults: inclusive, compound, abort on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub mode: Mode,
    /// All filters must match (true) or any one is enough (false).
    pub compound: bool,
    pub on_error: ErrorPolicy,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Inclusive,
            compound: true,
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl FilterOptions {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }
}
