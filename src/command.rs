//! Command tokenizing and argument coercion
//!
//! Turns a raw command line into a typed [`Command`] before the engine sees it.
//! Arity and integer fields are checked here; the engine only ever receives
//! well-formed commands.

use crate::config::CommandTokens;
use crate::error::{RegistryError, RegistryResult};
use std::collections::HashMap;
use std::fmt;

/// The six registry operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Enroll,
    IsEnrolledUnder,
    ScoreOf,
    AdjustScore,
    ExamList,
    Remove,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Enroll,
        CommandKind::IsEnrolledUnder,
        CommandKind::ScoreOf,
        CommandKind::AdjustScore,
        CommandKind::ExamList,
        CommandKind::Remove,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Enroll => "enroll",
            CommandKind::IsEnrolledUnder => "isEnrolledUnder",
            CommandKind::ScoreOf => "scoreOf",
            CommandKind::AdjustScore => "adjustScore",
            CommandKind::ExamList => "examList",
            CommandKind::Remove => "remove",
        }
    }

    /// Number of argument fields after the command token
    pub fn arity(self) -> usize {
        match self {
            CommandKind::Enroll
            | CommandKind::IsEnrolledUnder
            | CommandKind::AdjustScore
            | CommandKind::ExamList => 2,
            CommandKind::ScoreOf | CommandKind::Remove => 1,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully tokenized, arity-checked command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Enroll { learner: String, supervisor: String },
    IsEnrolledUnder { learner: String, supervisor: String },
    ScoreOf { learner: String },
    AdjustScore { learner: String, delta: i64 },
    ExamList { supervisor: String, threshold: i64 },
    Remove { learner: String },
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Enroll { .. } => CommandKind::Enroll,
            Command::IsEnrolledUnder { .. } => CommandKind::IsEnrolledUnder,
            Command::ScoreOf { .. } => CommandKind::ScoreOf,
            Command::AdjustScore { .. } => CommandKind::AdjustScore,
            Command::ExamList { .. } => CommandKind::ExamList,
            Command::Remove { .. } => CommandKind::Remove,
        }
    }
}

/// Split a command line into fields
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Maps command tokens to operations
#[derive(Clone, Debug)]
pub struct Vocabulary {
    tokens: HashMap<String, CommandKind>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting tokens bound to more than one operation
    /// and operations left without any token.
    pub fn from_tokens(tokens: &CommandTokens) -> RegistryResult<Self> {
        let mut map = HashMap::new();
        for kind in CommandKind::ALL {
            let aliases = tokens.aliases(kind);
            if aliases.is_empty() {
                return Err(RegistryError::Config(format!(
                    "no command token configured for {}",
                    kind
                )));
            }
            for alias in aliases {
                if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                    return Err(RegistryError::Config(format!(
                        "invalid command token {:?} for {}",
                        alias, kind
                    )));
                }
                if let Some(previous) = map.insert(alias.clone(), kind) {
                    if previous != kind {
                        return Err(RegistryError::Config(format!(
                            "command token '{}' bound to both {} and {}",
                            alias, previous, kind
                        )));
                    }
                }
            }
        }
        Ok(Self { tokens: map })
    }

    pub fn lookup(&self, token: &str) -> Option<CommandKind> {
        self.tokens.get(token).copied()
    }

    /// Parse tokenized fields into a typed command.
    pub fn parse(&self, fields: &[&str]) -> RegistryResult<Command> {
        let (&token, args) = fields
            .split_first()
            .ok_or_else(|| RegistryError::malformed("", "empty command"))?;

        let kind = self
            .lookup(token)
            .ok_or_else(|| RegistryError::UnknownCommand(token.to_string()))?;

        if args.len() != kind.arity() {
            return Err(RegistryError::malformed(
                fields.join(" "),
                format!(
                    "{} expects {} argument(s), got {}",
                    kind,
                    kind.arity(),
                    args.len()
                ),
            ));
        }

        let integer = |field: &str, name: &str| -> RegistryResult<i64> {
            field.parse::<i64>().map_err(|_| {
                RegistryError::malformed(
                    fields.join(" "),
                    format!("{} must be an integer, got '{}'", name, field),
                )
            })
        };

        let command = match kind {
            CommandKind::Enroll => Command::Enroll {
                learner: args[0].to_string(),
                supervisor: args[1].to_string(),
            },
            CommandKind::IsEnrolledUnder => Command::IsEnrolledUnder {
                learner: args[0].to_string(),
                supervisor: args[1].to_string(),
            },
            CommandKind::ScoreOf => Command::ScoreOf {
                learner: args[0].to_string(),
            },
            CommandKind::AdjustScore => Command::AdjustScore {
                learner: args[0].to_string(),
                delta: integer(args[1], "delta")?,
            },
            CommandKind::ExamList => Command::ExamList {
                supervisor: args[0].to_string(),
                threshold: integer(args[1], "threshold")?,
            },
            CommandKind::Remove => Command::Remove {
                learner: args[0].to_string(),
            },
        };

        Ok(command)
    }

    /// Tokenize and parse a raw line
    pub fn parse_line(&self, line: &str) -> RegistryResult<Command> {
        self.parse(&tokenize(line))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let defaults = CommandTokens::default();
        let tokens = CommandKind::ALL
            .into_iter()
            .flat_map(|kind| {
                defaults
                    .aliases(kind)
                    .iter()
                    .map(move |alias| (alias.clone(), kind))
            })
            .collect();
        Self { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  alta   ana\tluis "), vec!["alta", "ana", "luis"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_parse_localized_and_english_tokens() {
        let vocab = Vocabulary::default();
        let expected = Command::Enroll {
            learner: "ana".to_string(),
            supervisor: "luis".to_string(),
        };
        assert_eq!(vocab.parse_line("alta ana luis").unwrap(), expected);
        assert_eq!(vocab.parse_line("enroll ana luis").unwrap(), expected);
    }

    #[test]
    fn test_parse_integer_fields() {
        let vocab = Vocabulary::default();
        assert_eq!(
            vocab.parse_line("actualizar ana -7").unwrap(),
            Command::AdjustScore {
                learner: "ana".to_string(),
                delta: -7
            }
        );
        assert_eq!(
            vocab.parse_line("examen luis +3").unwrap(),
            Command::ExamList {
                supervisor: "luis".to_string(),
                threshold: 3
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_integer() {
        let vocab = Vocabulary::default();
        let err = vocab.parse_line("actualizar ana diez").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCommand);
        assert!(err.to_string().contains("delta must be an integer"));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        let vocab = Vocabulary::default();
        for line in ["alta ana", "puntuacion", "aprobar ana extra", "examen luis"] {
            let err = vocab.parse_line(line).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedCommand, "line: {}", line);
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        let vocab = Vocabulary::default();
        let err = vocab.parse_line("matricular ana luis").unwrap_err();
        assert_eq!(err, RegistryError::UnknownCommand("matricular".to_string()));
    }

    #[test]
    fn test_parse_empty_fields() {
        let vocab = Vocabulary::default();
        let err = vocab.parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCommand);
    }

    #[test]
    fn test_from_tokens_rejects_ambiguous_alias() {
        let mut tokens = CommandTokens::default();
        tokens.remove.push("alta".to_string());
        let err = Vocabulary::from_tokens(&tokens).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_from_tokens_rejects_missing_kind() {
        let tokens = CommandTokens {
            score_of: Vec::new(),
            ..CommandTokens::default()
        };
        assert!(Vocabulary::from_tokens(&tokens).is_err());
    }

    #[test]
    fn test_command_kind_roundtrip() {
        let vocab = Vocabulary::default();
        for kind in CommandKind::ALL {
            assert_eq!(vocab.lookup(kind.name()), Some(kind));
        }
    }
}
