//! Immutable registry of provisioning steps.

use std::sync::Arc;

use crate::application::step::Step;
use crate::domain::plan::{self, StepNode};
use crate::domain::{SequencerError, Selection};

/// Steps in registration order. Built once at startup, then only read.
#[derive(Default)]
pub struct Catalog {
    steps: Vec<Arc<dyn Step>>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::DuplicateStep` if the name is already taken.
    pub fn register(&mut self, step: impl Step + 'static) -> Result<(), SequencerError> {
        self.register_arc(Arc::new(step))
    }

    /// Add a step (Arc version for shared ownership).
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::DuplicateStep` if the name is already taken.
    pub fn register_arc(&mut self, step: Arc<dyn Step>) -> Result<(), SequencerError> {
        if self.get(step.name()).is_some() {
            return Err(SequencerError::DuplicateStep(step.name().to_string()));
        }
        self.steps.push(step);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Step>> {
        self.steps.iter().find(|s| s.name() == name)
    }

    /// All steps in registration order.
    #[must_use]
    pub fn steps(&self) -> &[Arc<dyn Step>] {
        &self.steps
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolve `selection` into the steps to execute, in order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStep`, `UnknownDependency`, or `CyclicDependency`.
    pub fn plan(&self, selection: &Selection) -> Result<Vec<Arc<dyn Step>>, SequencerError> {
        let nodes: Vec<StepNode<'_>> = self
            .steps
            .iter()
            .map(|s| StepNode {
                name: s.name(),
                depends_on: s.depends_on(),
            })
            .collect();
        let order = plan::resolve(&nodes, selection)?;
        Ok(order.into_iter().map(|i| Arc::clone(&self.steps[i])).collect())
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").field("steps", &self.names()).finish()
    }
}
