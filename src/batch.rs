//! Batch runner
//!
//! Reads test cases from the input as they close, runs each on a fresh
//! registry and writes its result block, followed by the separator line,
//! before reading the next case.

use crate::command::Vocabulary;
use crate::config::RegistryConfig;
use crate::dispatch::Dispatcher;
use crate::error::RegistryResult;
use crate::input::{TestCase, TestCaseReader};
use crate::render::Renderer;
use std::io::{BufRead, Write};
use tracing::info;

/// Rendered output of one test case
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseReport {
    pub lines: Vec<String>,
    /// Commands that produced an error marker
    pub errors: usize,
}

/// Totals over a whole batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub cases: usize,
    pub commands: usize,
    pub errors: usize,
}

pub struct BatchRunner {
    config: RegistryConfig,
    vocabulary: Vocabulary,
    renderer: Renderer,
}

impl BatchRunner {
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        let vocabulary = config.validate()?;
        let renderer = Renderer::from_config(&config);
        Ok(Self {
            config,
            vocabulary,
            renderer,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Run one test case against its own empty registry.
    pub fn run_case(&self, case: &TestCase) -> CaseReport {
        let mut dispatcher = Dispatcher::new(&self.vocabulary, self.config.remove_policy);
        let mut report = CaseReport::default();

        for line in &case.lines {
            let outcome = dispatcher.dispatch(line);
            if outcome.is_failure() {
                report.errors += 1;
            }
            self.renderer.render_into(&outcome, &mut report.lines);
        }

        report
    }

    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> RegistryResult<BatchSummary> {
        let mut cases = TestCaseReader::new(reader, self.config.sentinel.as_str());
        let mut summary = BatchSummary::default();

        while let Some(case) = cases.next_case()? {
            let report = self.run_case(&case);

            for line in &report.lines {
                writeln!(writer, "{}", line)?;
            }
            writeln!(writer, "{}", self.config.separator)?;

            info!(
                case = summary.cases + 1,
                commands = case.len(),
                output_lines = report.lines.len(),
                errors = report.errors,
                "Test case completed"
            );

            summary.cases += 1;
            summary.commands += case.len();
            summary.errors += report.errors;
        }

        writer.flush()?;
        Ok(summary)
    }
}
