use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::Display;

/// Schema version written by this engine generation.
pub const SCHEMA_VERSION: &str = "slo.v3";

/// Where the measurement ran relative to the system under test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RunLocation {
    #[default]
    Inside,
    Outside,
}

/// What triggered the capture of the measurement window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RunTrigger {
    #[default]
    None,
    Annotation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMode {
    pub location: RunLocation,
    pub trigger: RunTrigger,
}

/// Description of one measurement window, echoed into the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default)]
    pub run_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub mode: RunMode,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Format hint for downstream tooling, empty when unset.
    #[serde(default)]
    pub format: String,

    /// Pointers to raw artifacts backing the run, such as the snapshot files.
    #[serde(default)]
    pub evidence_paths: BTreeMap<String, String>,
}

/// Outcome of judging one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliResult {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub kind: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    pub inputs_used: Vec<String>,
    pub inputs_missing: Vec<String>,
}

/// The result artifact of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub config: RunConfig,
    pub results: Vec<SliResult>,
    pub warnings: Vec<String>,
}

impl Summary {
    /// Whether any result failed its judge rules.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.status == Status::Fail)
    }

    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(status: Status, value: Option<f64>, reason: Option<&str>) -> SliResult {
        SliResult {
            id: "reconcile_error_delta".to_string(),
            title: "reconcile error delta".to_string(),
            unit: "count".to_string(),
            kind: "delta_counter".to_string(),
            description: String::new(),
            value,
            status,
            reason: reason.map(str::to_string),
            inputs_used: vec!["x".to_string()],
            inputs_missing: vec![],
        }
    }

    #[test]
    fn test_json_field_names() {
        let summary = Summary {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            config: RunConfig {
                run_id: "run-1".to_string(),
                started_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()),
                finished_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 5, 0).unwrap()),
                mode: RunMode {
                    location: RunLocation::Outside,
                    trigger: RunTrigger::Annotation,
                },
                tags: BTreeMap::from([("suite".to_string(), "e2e".to_string())]),
                format: "v4".to_string(),
                evidence_paths: BTreeMap::new(),
            },
            results: vec![result(Status::Fail, Some(3.0), Some("rule fail: value > 2"))],
            warnings: vec![],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["schemaVersion"], "slo.v3");
        assert_eq!(json["generatedAt"], "2024-01-15T10:30:00Z");
        assert_eq!(json["config"]["runId"], "run-1");
        assert_eq!(json["config"]["startedAt"], "2024-01-15T10:00:00Z");
        assert_eq!(json["config"]["finishedAt"], "2024-01-15T10:05:00Z");
        assert_eq!(json["config"]["mode"]["location"], "outside");
        assert_eq!(json["config"]["mode"]["trigger"], "annotation");
        assert_eq!(json["config"]["tags"]["suite"], "e2e");
        assert_eq!(json["config"]["format"], "v4");
        assert!(json["config"]["evidencePaths"].as_object().unwrap().is_empty());
        assert_eq!(json["results"][0]["status"], "fail");
        assert_eq!(json["results"][0]["value"], 3.0);
        assert_eq!(json["results"][0]["reason"], "rule fail: value > 2");
        assert_eq!(json["results"][0]["inputsUsed"][0], "x");
        assert!(json["results"][0]["inputsMissing"].as_array().unwrap().is_empty());
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(result(Status::Skip, None, None)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("value"));
        assert!(!obj.contains_key("reason"));
        assert_eq!(json["status"], "skip");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Pass.to_string(), "pass");
        assert_eq!(Status::Warn.to_string(), "warn");
        assert_eq!(Status::Fail.to_string(), "fail");
        assert_eq!(Status::Skip.to_string(), "skip");
    }

    #[test]
    fn test_counts() {
        let summary = Summary {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            config: RunConfig::default(),
            results: vec![
                result(Status::Pass, Some(1.0), None),
                result(Status::Fail, Some(1.0), None),
                result(Status::Fail, Some(1.0), None),
            ],
            warnings: vec![],
        };

        assert!(summary.has_failures());
        assert_eq!(summary.count(Status::Fail), 2);
        assert_eq!(summary.count(Status::Warn), 0);
    }
}
