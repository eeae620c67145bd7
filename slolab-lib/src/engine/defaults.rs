use crate::summary::{RunConfig, RunLocation, RunMode, RunTrigger};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Format hint written by [`apply_v4`].
pub const FORMAT_V4: &str = "v4";

/// How a measurement window was captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MeasurementMethod {
    /// Snapshots scraped from inside the cluster at window start and end.
    #[default]
    InsideSnapshot,

    /// Window boundaries marked by annotations, scraped from inside the cluster.
    InsideAnnotation,

    /// Snapshots scraped from outside the system under test.
    OutsideSnapshot,
}

impl MeasurementMethod {
    #[must_use]
    pub const fn run_mode(self) -> RunMode {
        match self {
            Self::InsideSnapshot => RunMode {
                location: RunLocation::Inside,
                trigger: RunTrigger::None,
            },
            Self::InsideAnnotation => RunMode {
                location: RunLocation::Inside,
                trigger: RunTrigger::Annotation,
            },
            Self::OutsideSnapshot => RunMode {
                location: RunLocation::Outside,
                trigger: RunTrigger::None,
            },
        }
    }
}

/// Fill the fields the v4 harness adds on top of the `slo.v3` summary.
///
/// An explicit format already set by the caller is kept.
pub fn apply_v4(config: &mut RunConfig, method: MeasurementMethod) {
    if config.format.is_empty() {
        config.format = FORMAT_V4.to_string();
    }
    config.mode = method.run_mode();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_modes() {
        assert_eq!(MeasurementMethod::default().run_mode(), RunMode::default());

        let mode = MeasurementMethod::InsideAnnotation.run_mode();
        assert_eq!(mode.location, RunLocation::Inside);
        assert_eq!(mode.trigger, RunTrigger::Annotation);

        let mode = MeasurementMethod::OutsideSnapshot.run_mode();
        assert_eq!(mode.location, RunLocation::Outside);
        assert_eq!(mode.trigger, RunTrigger::None);
    }

    #[test]
    fn test_apply_v4_sets_format_and_mode() {
        let mut config = RunConfig::default();
        apply_v4(&mut config, MeasurementMethod::OutsideSnapshot);
        assert_eq!(config.format, FORMAT_V4);
        assert_eq!(config.mode.location, RunLocation::Outside);
    }

    #[test]
    fn test_apply_v4_keeps_explicit_format() {
        let mut config = RunConfig {
            format: "custom".to_string(),
            ..RunConfig::default()
        };
        apply_v4(&mut config, MeasurementMethod::InsideSnapshot);
        assert_eq!(config.format, "custom");
    }

    #[test]
    fn test_display() {
        assert_eq!(MeasurementMethod::InsideAnnotation.to_string(), "inside-annotation");
    }
}
