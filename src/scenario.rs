//! Scenario runner for batch projections
//!
//! Holds one set of assumptions and projects many input sets against it,
//! or one input set against many assumption sets.

use rayon::prelude::*;

use crate::inputs::{InputSet, ProjectionInputs};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::Assumptions;

/// Pre-configured runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let results = runner.run_batch(&inputs);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the standard assumptions
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions),
        }
    }

    /// Run a single projection
    pub fn run(&self, inputs: &ProjectionInputs) -> ProjectionResult {
        self.engine.project(inputs)
    }

    /// Run projections for many input sets in parallel; output order matches input order
    pub fn run_batch(&self, inputs: &[ProjectionInputs]) -> Vec<ProjectionResult> {
        inputs.par_iter().map(|i| self.engine.project(i)).collect()
    }

    /// Like `run_batch`, keeping each result next to its identifier
    pub fn run_input_sets(&self, sets: &[InputSet]) -> Vec<(String, ProjectionResult)> {
        sets.par_iter()
            .map(|set| (set.id.clone(), self.engine.project(&set.inputs)))
            .collect()
    }

    /// Run one input set under several assumption sets
    pub fn run_scenarios(
        &self,
        inputs: &ProjectionInputs,
        assumptions: &[Assumptions],
    ) -> Vec<ProjectionResult> {
        assumptions
            .par_iter()
            .map(|a| ProjectionEngine::new(a.clone()).project(inputs))
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.engine.assumptions()
    }
}
