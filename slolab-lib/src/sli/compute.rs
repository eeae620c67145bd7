use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// How an indicator's value is derived from the start and end samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComputeMode {
    /// Use the start sample only.
    Single,

    /// Use the end sample only.
    End,

    /// End sample minus start sample.
    Delta,

    /// A mode name that was not recognized when the indicator was loaded.
    Unknown(String),
}

impl From<&str> for ComputeMode {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "start" => Self::Single,
            "end" => Self::End,
            "delta" => Self::Delta,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl From<String> for ComputeMode {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ComputeMode> for String {
    fn from(mode: ComputeMode) -> Self {
        mode.to_string()
    }
}

impl Display for ComputeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::End => write!(f, "end"),
            Self::Delta => write!(f, "delta"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Describes how to compute an indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputeSpec {
    pub mode: ComputeMode,
}

impl ComputeSpec {
    #[must_use]
    pub const fn single() -> Self {
        Self { mode: ComputeMode::Single }
    }

    #[must_use]
    pub const fn end() -> Self {
        Self { mode: ComputeMode::End }
    }

    #[must_use]
    pub const fn delta() -> Self {
        Self { mode: ComputeMode::Delta }
    }
}
