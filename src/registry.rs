//! Registry engine
//!
//! Tracks which supervisor each learner is enrolled under, the reverse
//! supervisor -> learners index, and a score per learner. Both maps are
//! updated together so a learner is listed under exactly the supervisor its
//! assignment points to.

use crate::command::Command;
use crate::error::{RegistryError, RegistryResult};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// State kept for an enrolled learner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearnerRecord {
    /// Supervisor the learner is currently assigned to
    pub supervisor: String,
    /// Cumulative score, unclamped
    pub score: i64,
}

/// Result of a successfully executed command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Command has no output
    Silent,
    Membership {
        learner: String,
        supervisor: String,
        enrolled: bool,
    },
    Score {
        learner: String,
        score: i64,
    },
    /// Qualifying learners in identifier order
    ExamList {
        supervisor: String,
        learners: Vec<String>,
    },
}

/// A violation of the learner <-> roster consistency rule
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// Learner points at a supervisor that has no roster
    DanglingAssignment { learner: String, supervisor: String },
    /// Learner points at a supervisor whose roster does not list it
    MissingFromRoster { learner: String, supervisor: String },
    /// Roster lists a learner assigned elsewhere
    AssignedElsewhere {
        learner: String,
        listed_under: String,
        assigned_to: String,
    },
    /// Roster lists a learner with no record
    UnknownInRoster { learner: String, supervisor: String },
}

/// In-memory registry for one test case
#[derive(Debug, Default, Clone)]
pub struct RegistryEngine {
    /// Learner records by identifier
    learners: HashMap<String, LearnerRecord>,
    /// Supervisor rosters; created on first reference and never collected
    rosters: HashMap<String, BTreeSet<String>>,
}

impl RegistryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `learner` to `supervisor`.
    ///
    /// New learners start at score 0. A learner already under another
    /// supervisor is moved and keeps its score. Re-enrolling under the current
    /// supervisor changes nothing.
    pub fn enroll(&mut self, learner: &str, supervisor: &str) {
        self.rosters.entry(supervisor.to_string()).or_default();

        match self.learners.get_mut(learner) {
            Some(record) if record.supervisor == supervisor => {
                debug!(learner = %learner, supervisor = %supervisor, "Already enrolled");
            }
            Some(record) => {
                let previous = std::mem::replace(&mut record.supervisor, supervisor.to_string());
                if let Some(roster) = self.rosters.get_mut(&previous) {
                    roster.remove(learner);
                }
                if let Some(roster) = self.rosters.get_mut(supervisor) {
                    roster.insert(learner.to_string());
                }
                debug!(
                    learner = %learner,
                    from = %previous,
                    to = %supervisor,
                    score = record.score,
                    "Learner reassigned"
                );
            }
            None => {
                self.learners.insert(
                    learner.to_string(),
                    LearnerRecord {
                        supervisor: supervisor.to_string(),
                        score: 0,
                    },
                );
                if let Some(roster) = self.rosters.get_mut(supervisor) {
                    roster.insert(learner.to_string());
                }
                debug!(learner = %learner, supervisor = %supervisor, "Learner enrolled");
            }
        }
    }

    /// Whether `learner` is currently enrolled under `supervisor`
    pub fn is_enrolled_under(&self, learner: &str, supervisor: &str) -> bool {
        self.learners
            .get(learner)
            .is_some_and(|record| record.supervisor == supervisor)
            && self
                .rosters
                .get(supervisor)
                .is_some_and(|roster| roster.contains(learner))
    }

    pub fn score_of(&self, learner: &str) -> RegistryResult<i64> {
        self.learners
            .get(learner)
            .map(|record| record.score)
            .ok_or_else(|| RegistryError::NotFound(learner.to_string()))
    }

    /// Add `delta` to the learner's score and return the new score.
    pub fn adjust_score(&mut self, learner: &str, delta: i64) -> RegistryResult<i64> {
        let record = self
            .learners
            .get_mut(learner)
            .ok_or_else(|| RegistryError::NotFound(learner.to_string()))?;

        record.score = record
            .score
            .checked_add(delta)
            .ok_or_else(|| RegistryError::ScoreOverflow {
                learner: learner.to_string(),
                delta,
            })?;

        debug!(learner = %learner, delta, score = record.score, "Score adjusted");
        Ok(record.score)
    }

    /// Learners under `supervisor` scoring at least `threshold`, sorted by
    /// identifier. Unknown supervisors yield an empty list.
    pub fn exam_list(&self, supervisor: &str, threshold: i64) -> Vec<String> {
        let Some(roster) = self.rosters.get(supervisor) else {
            return Vec::new();
        };

        roster
            .iter()
            .filter(|learner| {
                self.learners
                    .get(learner.as_str())
                    .is_some_and(|record| record.score >= threshold)
            })
            .cloned()
            .collect()
    }

    /// Drop the learner, its assignment and its score.
    pub fn remove(&mut self, learner: &str) -> RegistryResult<LearnerRecord> {
        let record = self
            .learners
            .remove(learner)
            .ok_or_else(|| RegistryError::NotFound(learner.to_string()))?;

        if let Some(roster) = self.rosters.get_mut(&record.supervisor) {
            roster.remove(learner);
        }

        debug!(
            learner = %learner,
            supervisor = %record.supervisor,
            score = record.score,
            "Learner removed"
        );
        Ok(record)
    }

    /// Apply one command
    pub fn execute(&mut self, command: &Command) -> RegistryResult<Reply> {
        match command {
            Command::Enroll {
                learner,
                supervisor,
            } => {
                self.enroll(learner, supervisor);
                Ok(Reply::Silent)
            }
            Command::IsEnrolledUnder {
                learner,
                supervisor,
            } => Ok(Reply::Membership {
                learner: learner.clone(),
                supervisor: supervisor.clone(),
                enrolled: self.is_enrolled_under(learner, supervisor),
            }),
            Command::ScoreOf { learner } => Ok(Reply::Score {
                learner: learner.clone(),
                score: self.score_of(learner)?,
            }),
            Command::AdjustScore { learner, delta } => {
                self.adjust_score(learner, *delta)?;
                Ok(Reply::Silent)
            }
            Command::ExamList {
                supervisor,
                threshold,
            } => Ok(Reply::ExamList {
                supervisor: supervisor.clone(),
                learners: self.exam_list(supervisor, *threshold),
            }),
            Command::Remove { learner } => {
                self.remove(learner)?;
                Ok(Reply::Silent)
            }
        }
    }

    pub fn supervisor_of(&self, learner: &str) -> Option<&str> {
        self.learners
            .get(learner)
            .map(|record| record.supervisor.as_str())
    }

    /// The supervisor's current learner set, if the supervisor is known
    pub fn roster(&self, supervisor: &str) -> Option<&BTreeSet<String>> {
        self.rosters.get(supervisor)
    }

    pub fn learner_count(&self) -> usize {
        self.learners.len()
    }

    pub fn supervisor_count(&self) -> usize {
        self.rosters.len()
    }

    /// Check both maps against each other and report every mismatch.
    pub fn find_inconsistencies(&self) -> Vec<Inconsistency> {
        let mut found = Vec::new();

        for (learner, record) in &self.learners {
            match self.rosters.get(&record.supervisor) {
                None => found.push(Inconsistency::DanglingAssignment {
                    learner: learner.clone(),
                    supervisor: record.supervisor.clone(),
                }),
                Some(roster) if !roster.contains(learner) => {
                    found.push(Inconsistency::MissingFromRoster {
                        learner: learner.clone(),
                        supervisor: record.supervisor.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        for (supervisor, roster) in &self.rosters {
            for learner in roster {
                match self.learners.get(learner) {
                    None => found.push(Inconsistency::UnknownInRoster {
                        learner: learner.clone(),
                        supervisor: supervisor.clone(),
                    }),
                    Some(record) if &record.supervisor != supervisor => {
                        found.push(Inconsistency::AssignedElsewhere {
                            learner: learner.clone(),
                            listed_under: supervisor.clone(),
                            assigned_to: record.supervisor.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        found
    }
}
