use crate::fetch::Sample;
use crate::sli::{ComputeMode, Level, Op, Rule, SliSpec};
use crate::summary::{SliResult, Status};

pub const REASON_MISSING_INPUTS: &str = "missing input metrics";
pub const REASON_NEGATIVE_DELTA: &str = "delta < 0 (counter reset suspected)";
pub const REASON_UNKNOWN_MODE: &str = "unknown compute mode";

/// Evaluate one indicator against the start and end samples.
///
/// Inputs are summed on each side. An input absent from either side marks the indicator as
/// skipped. A negative delta is reported as a warning without consulting the judge rules.
#[must_use]
pub fn evaluate_sli(spec: &SliSpec, start: &Sample, end: &Sample) -> SliResult {
    let mut result = SliResult {
        id: spec.id.clone(),
        title: spec.title.clone(),
        unit: spec.unit.clone(),
        kind: spec.kind.clone(),
        description: spec.description.clone(),
        value: None,
        status: Status::Skip,
        reason: None,
        inputs_used: Vec::with_capacity(spec.inputs.len()),
        inputs_missing: Vec::new(),
    };

    let mut start_sum = 0.0;
    let mut end_sum = 0.0;
    for input in &spec.inputs {
        result.inputs_used.push(input.key.clone());
        match (start.values.get(&input.key), end.values.get(&input.key)) {
            (Some(s), Some(e)) => {
                start_sum += s;
                end_sum += e;
            }
            _ => result.inputs_missing.push(input.key.clone()),
        }
    }

    if !result.inputs_missing.is_empty() {
        result.reason = Some(REASON_MISSING_INPUTS.to_string());
        return result;
    }

    let value = match &spec.compute.mode {
        ComputeMode::Single => start_sum,
        ComputeMode::End => end_sum,
        ComputeMode::Delta => end_sum - start_sum,
        ComputeMode::Unknown(_) => {
            result.reason = Some(REASON_UNKNOWN_MODE.to_string());
            return result;
        }
    };
    result.value = Some(value);

    if spec.compute.mode == ComputeMode::Delta && value < 0.0 {
        result.status = Status::Warn;
        result.reason = Some(REASON_NEGATIVE_DELTA.to_string());
        return result;
    }

    let (status, reason) = spec.judge.as_ref().map_or((Status::Pass, None), |j| judge(value, &j.rules));
    result.status = status;
    result.reason = reason;
    result
}

/// Apply judge rules to a value.
///
/// The first matching fail rule wins immediately. Otherwise the last matching warn rule in
/// declared order sets the status. Rules with an unknown level never match.
#[must_use]
pub fn judge(value: f64, rules: &[Rule]) -> (Status, Option<String>) {
    let mut warn: Option<&Rule> = None;

    for rule in rules {
        if !rule.matches(value) {
            continue;
        }

        match rule.level {
            Level::Fail => return (Status::Fail, Some(format!("rule fail: {rule}"))),
            Level::Warn => warn = Some(rule),
            Level::Unknown(_) => {}
        }
    }

    warn.map_or((Status::Pass, None), |rule| (Status::Warn, Some(format!("rule warn: {rule}"))))
}

/// Describe rules the judge will ignore, one entry per rule with its 1-based position.
#[must_use]
pub fn ignored_rules(spec: &SliSpec) -> Vec<String> {
    let Some(judge) = &spec.judge else {
        return Vec::new();
    };

    judge
        .rules
        .iter()
        .enumerate()
        .filter_map(|(i, rule)| {
            let detail = match (&rule.op, &rule.level) {
                (Op::Unknown(op), _) => format!("unknown operator {op:?}"),
                (_, Level::Unknown(level)) => format!("unknown level {level:?}"),
                _ => return None,
            };
            Some(format!("sli {}: rule {} ignored ({detail})", spec.id, i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sli::{ComputeSpec, JudgeSpec, MetricRef};
    use chrono::Utc;

    fn sample(values: &[(&str, f64)]) -> Sample {
        Sample::new(Utc::now(), values.iter().map(|(k, v)| ((*k).to_string(), *v)).collect())
    }

    fn spec(inputs: &[&str], compute: ComputeSpec, rules: Option<Vec<Rule>>) -> SliSpec {
        SliSpec {
            id: "s".to_string(),
            title: "S".to_string(),
            unit: "count".to_string(),
            kind: "delta_counter".to_string(),
            description: String::new(),
            inputs: inputs.iter().map(|k| MetricRef::name(*k)).collect(),
            compute,
            judge: rules.map(JudgeSpec::new),
        }
    }

    #[test]
    fn test_delta_without_judge_passes() {
        let r = evaluate_sli(&spec(&["x"], ComputeSpec::delta(), None), &sample(&[("x", 10.0)]), &sample(&[("x", 25.0)]));
        assert_eq!(r.value, Some(15.0));
        assert_eq!(r.status, Status::Pass);
        assert_eq!(r.reason, None);
        assert_eq!(r.inputs_used, vec!["x"]);
        assert!(r.inputs_missing.is_empty());
    }

    #[test]
    fn test_negative_delta_bypasses_judge() {
        let s = spec(&["x"], ComputeSpec::delta(), Some(vec![Rule::fail("<", 0.0)]));
        let r = evaluate_sli(&s, &sample(&[("x", 20.0)]), &sample(&[("x", 5.0)]));
        assert_eq!(r.value, Some(-15.0));
        assert_eq!(r.status, Status::Warn);
        assert!(r.reason.unwrap().contains("counter reset"));
    }

    #[test]
    fn test_missing_input_skips() {
        let r = evaluate_sli(&spec(&["x", "y"], ComputeSpec::delta(), None), &sample(&[("x", 1.0), ("y", 1.0)]), &sample(&[("x", 2.0)]));
        assert_eq!(r.status, Status::Skip);
        assert_eq!(r.value, None);
        assert_eq!(r.reason.as_deref(), Some(REASON_MISSING_INPUTS));
        assert_eq!(r.inputs_missing, vec!["y"]);
        assert_eq!(r.inputs_used, vec!["x", "y"]);
    }

    #[test]
    fn test_inputs_are_summed() {
        let s = spec(&["a", "b"], ComputeSpec::delta(), None);
        let r = evaluate_sli(&s, &sample(&[("a", 1.0), ("b", 2.0)]), &sample(&[("a", 5.0), ("b", 8.0)]));
        assert_eq!(r.value, Some(10.0));
    }

    #[test]
    fn test_single_and_end_modes() {
        let start = sample(&[("g", 4.0)]);
        let end = sample(&[("g", 9.0)]);
        assert_eq!(evaluate_sli(&spec(&["g"], ComputeSpec::single(), None), &start, &end).value, Some(4.0));
        assert_eq!(evaluate_sli(&spec(&["g"], ComputeSpec::end(), None), &start, &end).value, Some(9.0));
    }

    #[test]
    fn test_negative_single_value_is_judged() {
        let s = spec(&["g"], ComputeSpec::single(), Some(vec![Rule::warn("<", 0.0)]));
        let r = evaluate_sli(&s, &sample(&[("g", -1.0)]), &sample(&[("g", -1.0)]));
        assert_eq!(r.status, Status::Warn);
        assert_eq!(r.reason.as_deref(), Some("rule warn: value < 0"));
    }

    #[test]
    fn test_unknown_mode_skips() {
        let s = spec(&["g"], ComputeSpec { mode: ComputeMode::from("ratio") }, None);
        let r = evaluate_sli(&s, &sample(&[("g", 1.0)]), &sample(&[("g", 2.0)]));
        assert_eq!(r.status, Status::Skip);
        assert_eq!(r.value, None);
        assert_eq!(r.reason.as_deref(), Some(REASON_UNKNOWN_MODE));
    }

    #[test]
    fn test_judge_fail_dominates() {
        let rules = vec![Rule::warn(">", 0.0), Rule::fail(">", 10.0)];
        assert_eq!(judge(15.0, &rules), (Status::Fail, Some("rule fail: value > 10".to_string())));
        assert_eq!(judge(5.0, &rules), (Status::Warn, Some("rule warn: value > 0".to_string())));
        assert_eq!(judge(0.0, &rules), (Status::Pass, None));
    }

    #[test]
    fn test_judge_first_fail_wins() {
        let rules = vec![Rule::fail(">", 1.0), Rule::fail(">", 2.0)];
        assert_eq!(judge(3.0, &rules).1.as_deref(), Some("rule fail: value > 1"));
    }

    #[test]
    fn test_judge_last_warn_wins() {
        let rules = vec![Rule::warn(">", 1.0), Rule::warn(">=", 2.0)];
        assert_eq!(judge(3.0, &rules).1.as_deref(), Some("rule warn: value >= 2"));
    }

    #[test]
    fn test_judge_ignores_unknown() {
        let rules = vec![
            Rule::new("~", 0.0, Level::Fail),
            Rule::new(Op::Gt, 0.0, Level::from("critical")),
        ];
        assert_eq!(judge(5.0, &rules), (Status::Pass, None));
    }

    #[test]
    fn test_ignored_rules_warnings() {
        let s = spec(
            &["x"],
            ComputeSpec::delta(),
            Some(vec![
                Rule::fail(">", 1.0),
                Rule::new("~", 0.0, Level::Fail),
                Rule::new(">", 0.0, Level::from("critical")),
            ]),
        );

        assert_eq!(
            ignored_rules(&s),
            vec![
                r#"sli s: rule 2 ignored (unknown operator "~")"#.to_string(),
                r#"sli s: rule 3 ignored (unknown level "critical")"#.to_string(),
            ]
        );
        assert!(ignored_rules(&spec(&["x"], ComputeSpec::delta(), None)).is_empty());
    }
}
