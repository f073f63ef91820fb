//! Ordered command plans
//!
//! Every action is expressed as a `Plan`: a list of labelled commands run one
//! after another. The first failing step aborts the plan.

use tracing::info;

use super::{CommandSpec, Runner};
use crate::error::GomkError;
use crate::utils::terminal;

/// One labelled command of a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Verb this step belongs to (e.g. "lint")
    pub label: String,
    pub command: CommandSpec,
}

impl Step {
    pub fn new(label: impl Into<String>, command: CommandSpec) -> Self {
        Self {
            label: label.into(),
            command,
        }
    }
}

/// Commands executed strictly in order, stopping at the first failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(step: Step) -> Self {
        Self { steps: vec![step] }
    }

    /// Append a step
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run each step in order with `runner`
    ///
    /// A step that cannot start or exits non-zero stops the plan. When steps
    /// remain, the error is wrapped in `GomkError::SequenceAbort` naming them.
    pub fn execute(&self, runner: &mut dyn Runner) -> Result<(), GomkError> {
        for (index, step) in self.steps.iter().enumerate() {
            info!(step = %step.label, command = %step.command, "running");
            terminal::print_step(&step.label, &step.command.to_string());

            let outcome = match runner.run(&step.command) {
                Err(source) => Err(GomkError::ToolNotStarted {
                    step: step.label.clone(),
                    source,
                }),
                Ok(result) if !result.success => Err(GomkError::ToolFailed {
                    step: step.label.clone(),
                    program: step.command.program.clone(),
                    exit_code: result.exit_code,
                }),
                Ok(_) => Ok(()),
            };

            if let Err(err) = outcome {
                let skipped: Vec<String> = self.steps[index + 1..]
                    .iter()
                    .map(|s| s.label.clone())
                    .collect();

                if skipped.is_empty() {
                    return Err(err);
                }
                return Err(GomkError::SequenceAbort {
                    step: step.label.clone(),
                    skipped,
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }
}
