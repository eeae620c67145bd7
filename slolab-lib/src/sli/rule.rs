use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Comparison operator of a judge rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Op {
    Le,
    Ge,
    Lt,
    Gt,
    Eq,

    /// Operator text that did not normalize to a known operator. Never matches.
    Unknown(String),
}

impl Op {
    /// Evaluate `value <op> target`.
    #[must_use]
    #[expect(clippy::float_cmp, reason = "rules ask for exact equality")]
    pub fn compare(&self, value: f64, target: f64) -> bool {
        match self {
            Self::Le => value <= target,
            Self::Ge => value >= target,
            Self::Lt => value < target,
            Self::Gt => value > target,
            Self::Eq => value == target,
            Self::Unknown(_) => false,
        }
    }
}

impl From<&str> for Op {
    fn from(s: &str) -> Self {
        let normalized: String = s.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect();
        match normalized.as_str() {
            "<=" | "=<" | "le" | "lte" => Self::Le,
            ">=" | "=>" | "ge" | "gte" => Self::Ge,
            "<" | "lt" => Self::Lt,
            ">" | "gt" => Self::Gt,
            "==" | "=" | "eq" => Self::Eq,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl From<String> for Op {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Op> for String {
    fn from(op: Op) -> Self {
        op.to_string()
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Le => write!(f, "<="),
            Self::Ge => write!(f, ">="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::Eq => write!(f, "=="),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Severity attached to a judge rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Warn,
    Fail,

    /// Level text that was not recognized. Rules with this level are ignored.
    Unknown(String),
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Self::Warn,
            "fail" => Self::Fail,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.to_string()
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Warn => write!(f, "warn"),
            Self::Fail => write!(f, "fail"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// A threshold comparison applied to an indicator's computed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub op: Op,
    pub target: f64,
    pub level: Level,
}

impl Rule {
    #[must_use]
    pub fn new(op: impl Into<Op>, target: f64, level: Level) -> Self {
        Self {
            op: op.into(),
            target,
            level,
        }
    }

    #[must_use]
    pub fn warn(op: impl Into<Op>, target: f64) -> Self {
        Self::new(op, target, Level::Warn)
    }

    #[must_use]
    pub fn fail(op: impl Into<Op>, target: f64) -> Self {
        Self::new(op, target, Level::Fail)
    }

    /// Whether the rule holds for `value`.
    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        self.op.compare(value, self.target)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "value {} {}", self.op, self.target)
    }
}

/// Ordered list of judge rules. Order matters: see [`crate::engine::judge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JudgeSpec {
    pub rules: Vec<Rule>,
}

impl JudgeSpec {
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}
