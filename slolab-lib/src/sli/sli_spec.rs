use super::{ComputeSpec, JudgeSpec, MetricRef};
use serde::{Deserialize, Serialize};

/// A declarative service-level indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliSpec {
    /// Unique identifier within a registry or run.
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub unit: String,

    /// Free-form classification such as `delta_counter` or `gauge`.
    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,

    /// Input series. With more than one input the values are summed.
    pub inputs: Vec<MetricRef>,

    pub compute: ComputeSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge: Option<JudgeSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sli::{ComputeMode, Level, Op};

    #[test]
    fn test_deserialize_from_toml() {
        let text = r#"
id = "reconcile_error_delta"
title = "reconcile error delta"
unit = "count"
kind = "delta_counter"
inputs = ['controller_runtime_reconcile_total{result="error"}']
compute = "delta"

[[judge]]
op = ">"
target = 0
level = "warn"

[[judge]]
op = "gt"
target = 10
level = "fail"
"#;

        let spec: SliSpec = toml::from_str(text).unwrap();
        assert_eq!(spec.id, "reconcile_error_delta");
        assert_eq!(spec.inputs[0].key, r#"controller_runtime_reconcile_total{result="error"}"#);
        assert_eq!(spec.compute.mode, ComputeMode::Delta);
        assert!(spec.description.is_empty());

        let rules = &spec.judge.unwrap().rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].op, Op::Gt);
        assert_eq!(rules[0].level, Level::Warn);
        assert_eq!(rules[1].op, Op::Gt);
        assert!((rules[1].target - 10.0).abs() < f64::EPSILON);
        assert_eq!(rules[1].level, Level::Fail);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let text = r#"
id = "x"
inputs = ["x"]
compute = "delta"
thresold = 3
"#;
        let result: Result<SliSpec, _> = toml::from_str(text);
        assert!(result.is_err(), "misspelled field should be rejected");
    }

    #[test]
    fn test_judge_is_optional() {
        let spec: SliSpec = toml::from_str("id = \"x\"\ninputs = [\"x\"]\ncompute = \"single\"\n").unwrap();
        assert!(spec.judge.is_none());
    }
}
