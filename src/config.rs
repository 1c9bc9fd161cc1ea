//! Registry Configuration
//!
//! Defines how a batch run reads and prints test cases:
//! - Sentinel and separator lines
//! - Command vocabulary (localized tokens)
//! - Output message templates
//! - Policy for removing unknown learners

use crate::command::{CommandKind, Vocabulary};
use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Complete registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Line that ends a test case
    pub sentinel: String,
    /// Line printed after each test case block
    pub separator: String,
    /// Single marker line printed for any failed command
    pub error_marker: String,
    /// What to do when `remove` names an unknown learner
    pub remove_policy: RemovePolicy,
    /// Output templates
    pub messages: Messages,
    /// Command tokens accepted for each operation
    pub commands: CommandTokens,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            sentinel: "FIN".to_string(),
            separator: "---".to_string(),
            error_marker: "ERROR".to_string(),
            remove_policy: RemovePolicy::default(),
            messages: Messages::default(),
            commands: CommandTokens::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse a config file. Values are checked later by [`Self::validate`],
    /// after command-line overrides have been applied.
    pub fn from_toml_str(contents: &str) -> RegistryResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> RegistryResult<Self> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            RegistryError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Replace the fields given on the command line or in the environment.
    pub fn apply_overrides(
        &mut self,
        remove_policy: Option<RemovePolicy>,
        sentinel: Option<String>,
    ) {
        if let Some(policy) = remove_policy {
            self.remove_policy = policy;
        }
        if let Some(sentinel) = sentinel {
            self.sentinel = sentinel;
        }
    }

    /// Check the config and build the command vocabulary it describes.
    pub fn validate(&self) -> RegistryResult<Vocabulary> {
        if self.sentinel.trim().is_empty() {
            return Err(RegistryError::Config("sentinel must not be empty".into()));
        }
        if self.sentinel.trim() != self.sentinel {
            return Err(RegistryError::Config(
                "sentinel must not carry surrounding whitespace".into(),
            ));
        }
        Vocabulary::from_tokens(&self.commands)
    }
}

/// Handling of `remove` for a learner with no registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovePolicy {
    /// Surface NotFound as an error marker line
    #[default]
    Report,
    /// Drop the command without output
    Ignore,
}

impl FromStr for RemovePolicy {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "report" => Ok(RemovePolicy::Report),
            "ignore" => Ok(RemovePolicy::Ignore),
            other => Err(RegistryError::Config(format!(
                "unknown remove policy '{}' (expected report or ignore)",
                other
            ))),
        }
    }
}

/// Output line templates.
///
/// Placeholders: `{learner}`, `{supervisor}`, `{score}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub enrolled: String,
    pub not_enrolled: String,
    pub score: String,
    pub exam_header: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            enrolled: "{learner} es alumno de {supervisor}".to_string(),
            not_enrolled: "{learner} no es alumno de {supervisor}".to_string(),
            score: "Puntuacion de {learner}: {score}".to_string(),
            exam_header: "Alumnos de {supervisor} a examen:".to_string(),
        }
    }
}

/// Tokens accepted for each operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTokens {
    pub enroll: Vec<String>,
    pub is_enrolled_under: Vec<String>,
    pub score_of: Vec<String>,
    pub adjust_score: Vec<String>,
    pub exam_list: Vec<String>,
    pub remove: Vec<String>,
}

impl Default for CommandTokens {
    fn default() -> Self {
        let tokens = |localized: &str, english: &str| {
            vec![localized.to_string(), english.to_string()]
        };
        Self {
            enroll: tokens("alta", "enroll"),
            is_enrolled_under: tokens("es_alumno", "isEnrolledUnder"),
            score_of: tokens("puntuacion", "scoreOf"),
            adjust_score: tokens("actualizar", "adjustScore"),
            exam_list: tokens("examen", "examList"),
            remove: tokens("aprobar", "remove"),
        }
    }
}

impl CommandTokens {
    pub fn aliases(&self, kind: CommandKind) -> &[String] {
        match kind {
            CommandKind::Enroll => &self.enroll,
            CommandKind::IsEnrolledUnder => &self.is_enrolled_under,
            CommandKind::ScoreOf => &self.score_of,
            CommandKind::AdjustScore => &self.adjust_score,
            CommandKind::ExamList => &self.exam_list,
            CommandKind::Remove => &self.remove,
        }
    }
}
