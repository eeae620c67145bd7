//! Reusable named sets of indicators
//!
//! A preset registers its indicators into a [`Registry`]. Presets are composed at startup, so a
//! preset that clashes with an already registered id is a programming error and panics.

mod baseline;
mod controller_runtime;
mod my_operator;

use crate::sli::{Registry, SliSpec};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A built-in indicator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    /// Reconcile and workqueue deltas of a controller-runtime manager, with judge rules.
    ControllerRuntime,

    /// Reconcile, workqueue, and rest client indicators without judge rules.
    Baseline,

    /// The controller-runtime set plus queue and churn indicators of one specific operator.
    MyOperator,
}

impl Preset {
    /// Register this preset's indicators into `reg`.
    ///
    /// # Panics
    ///
    /// Panics if one of the indicator ids is already registered.
    pub fn register(self, reg: &mut Registry) {
        match self {
            Self::ControllerRuntime => controller_runtime::register(reg),
            Self::Baseline => baseline::register(reg),
            Self::MyOperator => my_operator::register(reg),
        }
    }

    /// This preset's indicators in registration order.
    #[must_use]
    pub fn specs(self) -> Vec<SliSpec> {
        let mut reg = Registry::new();
        self.register(&mut reg);
        reg.into_specs()
    }
}

/// Resolve a preset by its kebab-case name.
#[must_use]
pub fn by_name(name: &str) -> Option<Preset> {
    name.trim().parse().ok()
}

/// Names of every built-in preset.
pub fn names() -> impl Iterator<Item = String> {
    Preset::iter().map(|p| p.to_string())
}

/// The indicators used when nothing else is configured.
#[must_use]
pub fn default_specs() -> Vec<SliSpec> {
    Preset::Baseline.specs()
}
