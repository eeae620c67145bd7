//! Declarative service-level indicator specs
//!
//! An [`SliSpec`] names the input series it reads, how its value is computed from the start and
//! end samples ([`ComputeSpec`]), and optionally the threshold rules that judge the value
//! ([`JudgeSpec`]). Specs are plain data: they are built once, either by the [`crate::presets`]
//! module or from a configuration file, and never mutated afterward.
//!
//! Operators, levels and compute modes are closed enums. Text that does not map to a known
//! variant is kept in an explicit `Unknown` variant rather than rejected, so a configuration
//! written for a newer generation still loads; the engine reports such rules as warnings.
//!
//! The [`Registry`] collects specs by id and is what preset modules register into.

mod compute;
mod metric_ref;
mod registry;
mod rule;
mod sli_spec;

pub use compute::{ComputeMode, ComputeSpec};
pub use metric_ref::MetricRef;
pub use registry::Registry;
pub use rule::{JudgeSpec, Level, Op, Rule};
pub use sli_spec::SliSpec;
