//! Command dispatch for a single test case

use crate::command::{tokenize, CommandKind, Vocabulary};
use crate::config::RemovePolicy;
use crate::error::{ErrorKind, RegistryError};
use crate::registry::{RegistryEngine, Reply};
use tracing::{debug, warn};

/// What happened to one input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Command ran
    Reply(Reply),
    /// Command failed; the test case goes on
    Failed(RegistryError),
    /// Nothing to run or report (blank line, ignored removal)
    Skipped,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Feeds lines of one test case into its own registry, in order.
pub struct Dispatcher<'a> {
    engine: RegistryEngine,
    vocabulary: &'a Vocabulary,
    remove_policy: RemovePolicy,
}

impl<'a> Dispatcher<'a> {
    pub fn new(vocabulary: &'a Vocabulary, remove_policy: RemovePolicy) -> Self {
        Self {
            engine: RegistryEngine::new(),
            vocabulary,
            remove_policy,
        }
    }

    pub fn dispatch(&mut self, line: &str) -> Outcome {
        let fields = tokenize(line);
        if fields.is_empty() {
            return Outcome::Skipped;
        }

        let command = match self.vocabulary.parse(&fields) {
            Ok(command) => command,
            Err(err) => {
                warn!(line = %line, kind = ?err.kind(), "Rejected command: {}", err);
                return Outcome::Failed(err);
            }
        };

        match self.engine.execute(&command) {
            Ok(reply) => Outcome::Reply(reply),
            Err(err)
                if command.kind() == CommandKind::Remove
                    && err.kind() == ErrorKind::NotFound
                    && self.remove_policy == RemovePolicy::Ignore =>
            {
                debug!(line = %line, "Ignoring removal of unknown learner");
                Outcome::Skipped
            }
            Err(err) => {
                warn!(line = %line, kind = ?err.kind(), "Command failed: {}", err);
                Outcome::Failed(err)
            }
        }
    }

    pub fn engine(&self) -> &RegistryEngine {
        &self.engine
    }

    pub fn into_engine(self) -> RegistryEngine {
        self.engine
    }
}
