use crate::Result;
use crate::promkey::{self, Labels};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};

/// Identifies one metric series used as an input to an indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MetricRefData")]
pub struct MetricRef {
    /// Canonical key of the series.
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl MetricRef {
    /// Reference a bare metric name.
    ///
    /// Samples built by [`crate::fetch::values_from_exposition`] carry a name-only entry summing
    /// every label set, so a bare name stands for "all series of this metric".
    ///
    /// Surrounding whitespace is trimmed and a name written with labels is canonicalized. Text
    /// that is not a valid metric token is kept trimmed and will never match a sample; use
    /// [`MetricRef::parse`] to reject it instead.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = promkey::canonicalize(&name).unwrap_or_else(|_| name.trim().to_string());
        Self { key, alias: None }
    }

    /// Reference a series by name and labels.
    #[must_use]
    pub fn with_labels<K, V>(name: &str, labels: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let labels: Labels = labels.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            key: promkey::format(name, &labels),
            alias: None,
        }
    }

    /// Reference a series by a raw token, canonicalizing it.
    pub fn parse(token: &str) -> Result<Self> {
        let key = promkey::canonicalize(token).into_app_err_with(|| format!("invalid metric reference {token:?}"))?;
        Ok(Self { key, alias: None })
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The alias if one is set, otherwise the key.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.key)
    }
}

/// Configuration form of a [`MetricRef`]: a bare token or a `{ key, alias }` table.
#[derive(Deserialize)]
#[serde(untagged)]
enum MetricRefData {
    Token(String),
    Table {
        key: String,
        #[serde(default)]
        alias: Option<String>,
    },
}

impl TryFrom<MetricRefData> for MetricRef {
    type Error = ohno::AppError;

    fn try_from(data: MetricRefData) -> Result<Self> {
        match data {
            MetricRefData::Token(token) => Self::parse(&token),
            MetricRefData::Table { key, alias } => {
                let mut r = Self::parse(&key)?;
                r.alias = alias;
                Ok(r)
            }
        }
    }
}
