//! Fan-out/fan-in over named tasks with per-task tagged results.

use std::collections::BTreeMap;

use brierboard_core::errors::PipelineError;
use rayon::prelude::*;
use tracing::{error, info_span};

type Task<'a, T> = Box<dyn FnOnce() -> Result<T, PipelineError> + Send + 'a>;

/// How one task ended.
#[derive(Debug)]
pub enum TaskOutcome<T> {
    Succeeded(T),
    Failed(PipelineError),
}

impl<T> TaskOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded(_))
    }
}

/// Independent tasks run in parallel. Task names must be unique.
pub struct TaskGroup<'a, T> {
    tasks: Vec<(String, Task<'a, T>)>,
}

impl<T: Send> Default for TaskGroup<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Send> TaskGroup<'a, T> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        task: impl FnOnce() -> Result<T, PipelineError> + Send + 'a,
    ) {
        self.tasks.push((name.into(), Box::new(task)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task to completion and report each outcome.
    pub fn run(self) -> BTreeMap<String, TaskOutcome<T>> {
        self.tasks
            .into_par_iter()
            .map(|(name, task)| {
                let span = info_span!("brierboard.task", task = %name);
                let _guard = span.enter();
                let outcome = match task() {
                    Ok(value) => TaskOutcome::Succeeded(value),
                    Err(e) => {
                        error!(task = %name, error = %e, "task failed");
                        TaskOutcome::Failed(e)
                    }
                };
                (name, outcome)
            })
            .collect()
    }

    /// Run every task; fail if any task failed.
    pub fn join(self) -> Result<BTreeMap<String, T>, PipelineError> {
        let outcomes = self.run();
        let failed: Vec<String> = outcomes
            .iter()
            .filter(|(_, o)| !o.is_success())
            .map(|(name, _)| name.clone())
            .collect();
        if !failed.is_empty() {
            return Err(PipelineError::TasksFailed { failed });
        }
        Ok(outcomes
            .into_iter()
            .filter_map(|(name, o)| match o {
                TaskOutcome::Succeeded(v) => Some((name, v)),
                TaskOutcome::Failed(_) => None,
            })
            .collect())
    }
}
