use super::SliSpec;
use crate::Result;
use ohno::bail;
use std::collections::HashMap;

/// In-memory store of indicator specs keyed by id.
///
/// Listing returns specs in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    items: HashMap<String, SliSpec>,
    order: Vec<String>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spec, rejecting an empty or already registered id.
    pub fn register(&mut self, spec: SliSpec) -> Result<()> {
        if spec.id.is_empty() {
            bail!("sli spec id is required");
        }

        if self.items.contains_key(&spec.id) {
            bail!("sli spec already registered: {}", spec.id);
        }

        self.order.push(spec.id.clone());
        let _ = self.items.insert(spec.id.clone(), spec);
        Ok(())
    }

    /// Add a spec during startup composition.
    ///
    /// # Panics
    ///
    /// Panics if the id is empty or already registered.
    #[expect(clippy::panic, reason = "a bad preset is a programming error")]
    pub fn must_register(&mut self, spec: SliSpec) {
        if let Err(e) = self.register(spec) {
            panic!("{e}");
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SliSpec> {
        self.items.get(id)
    }

    pub fn list(&self) -> impl Iterator<Item = &SliSpec> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consume the registry, returning its specs in registration order.
    #[must_use]
    pub fn into_specs(mut self) -> Vec<SliSpec> {
        self.order.iter().filter_map(|id| self.items.remove(id)).collect()
    }
}
