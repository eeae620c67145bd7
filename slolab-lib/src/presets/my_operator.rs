use super::controller_runtime;
use crate::sli::{ComputeSpec, MetricRef, Registry, SliSpec};

/// Register the controller-runtime indicators plus the operator's own queue and churn indicators.
pub fn register(reg: &mut Registry) {
    controller_runtime::register(reg);

    reg.must_register(workqueue_adds_delta());
    reg.must_register(workqueue_retries_delta());
    reg.must_register(cr_created_delta());
}

fn delta_counter(id: &str, title: &str, description: &str, input: MetricRef) -> SliSpec {
    SliSpec {
        id: id.to_string(),
        title: title.to_string(),
        unit: "count".to_string(),
        kind: "delta_counter".to_string(),
        description: description.to_string(),
        inputs: vec![input],
        compute: ComputeSpec::delta(),
        judge: None,
    }
}

/// Workqueue adds of the operator's own controller queue.
#[must_use]
pub fn workqueue_adds_delta() -> SliSpec {
    delta_counter(
        "my_operator.workqueue_adds_delta",
        "Workqueue adds delta (my-operator)",
        "Delta of workqueue adds on the my-operator controller queue.",
        MetricRef::with_labels("workqueue_adds_total", [("name", "my-operator-controller")]),
    )
}

#[must_use]
pub fn workqueue_retries_delta() -> SliSpec {
    delta_counter(
        "my_operator.workqueue_retries_delta",
        "Workqueue retries delta (my-operator)",
        "Delta of workqueue retries on the my-operator controller queue.",
        MetricRef::with_labels("workqueue_retries_total", [("name", "my-operator-controller")]),
    )
}

/// Custom resources created during the window, a churn signal.
#[must_use]
pub fn cr_created_delta() -> SliSpec {
    delta_counter(
        "my_operator.cr_created_delta",
        "CR created delta",
        "How many custom resources were created during the window.",
        MetricRef::with_labels("my_operator_cr_created_total", [("kind", "SloJob")]),
    )
}
