use crate::sli::{ComputeSpec, JudgeSpec, MetricRef, Registry, Rule, SliSpec};

/// Register the controller-runtime indicators.
pub fn register(reg: &mut Registry) {
    reg.must_register(reconcile_success_delta());
    reg.must_register(reconcile_error_delta());
    reg.must_register(workqueue_adds_delta());
    reg.must_register(workqueue_retries_delta());
}

fn delta_counter(id: &str, title: &str, description: &str, input: MetricRef, judge: Option<JudgeSpec>) -> SliSpec {
    SliSpec {
        id: id.to_string(),
        title: title.to_string(),
        unit: "count".to_string(),
        kind: "delta_counter".to_string(),
        description: description.to_string(),
        inputs: vec![input],
        compute: ComputeSpec::delta(),
        judge,
    }
}

#[must_use]
pub fn reconcile_success_delta() -> SliSpec {
    delta_counter(
        "controller_runtime.reconcile_total_delta.success",
        "Reconcile total delta (success)",
        "Delta of successful reconciliations between start/end snapshots.",
        MetricRef::with_labels("controller_runtime_reconcile_total", [("result", "success")]),
        Some(JudgeSpec::new(vec![Rule::warn(">", 500.0), Rule::fail(">", 2000.0)])),
    )
}

#[must_use]
pub fn reconcile_error_delta() -> SliSpec {
    delta_counter(
        "controller_runtime.reconcile_total_delta.error",
        "Reconcile total delta (error)",
        "Delta of errored reconciliations between start/end snapshots.",
        MetricRef::with_labels("controller_runtime_reconcile_total", [("result", "error")]),
        Some(JudgeSpec::new(vec![Rule::warn(">", 0.0), Rule::fail(">", 10.0)])),
    )
}

#[must_use]
pub fn workqueue_adds_delta() -> SliSpec {
    delta_counter(
        "controller_runtime.workqueue_adds_delta",
        "Workqueue adds delta",
        "Delta of workqueue adds between start/end snapshots.",
        MetricRef::with_labels("workqueue_adds_total", [("name", "controller")]),
        None,
    )
}

#[must_use]
pub fn workqueue_retries_delta() -> SliSpec {
    delta_counter(
        "controller_runtime.workqueue_retries_delta",
        "Workqueue retries delta",
        "Delta of workqueue retries between start/end snapshots.",
        MetricRef::with_labels("workqueue_retries_total", [("name", "controller")]),
        None,
    )
}
