//! Lifecycle stage and phase definitions shared by the host and the plugin ABI.

use std::ffi::CStr;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Enumeration of all lifecycle stages the host brackets with plugin calls.
///
/// This set is owned by the host. Plugins name a stage by its tag
/// (see [`LifecycleStage::as_str`]); a tag outside this set is rejected at
/// load time rather than silently never matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    /// The host reads the current time.
    GetTime,
    /// The host performs its print step.
    DoPrint,
    /// The host prints a single item inside the print step.
    PrintItem,
}

impl LifecycleStage {
    /// Every stage, in the order the host reaches them.
    pub const ALL: [Self; 3] = [Self::GetTime, Self::DoPrint, Self::PrintItem];

    /// Returns the tag of this stage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetTime => "get_time",
            Self::DoPrint => "do_print",
            Self::PrintItem => "print_item",
        }
    }

    /// Returns the tag as a nul-terminated string for the plugin ABI.
    pub const fn as_c_str(&self) -> &'static CStr {
        match self {
            Self::GetTime => c"get_time",
            Self::DoPrint => c"do_print",
            Self::PrintItem => c"print_item",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a stage tag is not part of the host's enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lifecycle stage '{0}'")]
pub struct UnknownStage(pub String);

impl FromStr for LifecycleStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

/// Whether a plugin runs before or after the host performs a stage's work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Immediately before the work (non-zero on the ABI).
    Before,
    /// Immediately after the work (zero on the ABI).
    After,
}

impl Phase {
    /// Decodes the ABI flag. Any non-zero byte means before.
    pub const fn from_flag(flag: u8) -> Self {
        if flag != 0 { Self::Before } else { Self::After }
    }

    /// Encodes this phase as the ABI flag.
    pub const fn as_flag(&self) -> u8 {
        match self {
            Self::Before => 1,
            Self::After => 0,
        }
    }

    /// Returns the string name of this phase.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The (stage, phase) pair a plugin declares interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LifecycleKey {
    /// Stage tag.
    pub stage: LifecycleStage,
    /// Before or after the stage's work.
    pub phase: Phase,
}

impl LifecycleKey {
    /// Creates a lifecycle key.
    pub const fn new(stage: LifecycleStage, phase: Phase) -> Self {
        Self { stage, phase }
    }
}

impl fmt::Display for LifecycleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stage, self.phase)
    }
}
