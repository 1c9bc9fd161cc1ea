//! Output rendering

use crate::config::{Messages, RegistryConfig};
use crate::dispatch::Outcome;
use crate::registry::Reply;

/// Turns outcomes into output lines
#[derive(Clone, Debug)]
pub struct Renderer {
    messages: Messages,
    error_marker: String,
}

impl Renderer {
    pub fn new(messages: Messages, error_marker: impl Into<String>) -> Self {
        Self {
            messages,
            error_marker: error_marker.into(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.messages.clone(), config.error_marker.clone())
    }

    /// Append the lines for `outcome` to `out`
    pub fn render_into(&self, outcome: &Outcome, out: &mut Vec<String>) {
        match outcome {
            Outcome::Skipped | Outcome::Reply(Reply::Silent) => {}
            Outcome::Failed(_) => out.push(self.error_marker.clone()),
            Outcome::Reply(Reply::Membership {
                learner,
                supervisor,
                enrolled,
            }) => {
                let template = if *enrolled {
                    &self.messages.enrolled
                } else {
                    &self.messages.not_enrolled
                };
                out.push(fill(
                    template,
                    Some(learner.as_str()),
                    Some(supervisor.as_str()),
                    None,
                ));
            }
            Outcome::Reply(Reply::Score { learner, score }) => {
                out.push(fill(
                    &self.messages.score,
                    Some(learner.as_str()),
                    None,
                    Some(*score),
                ));
            }
            Outcome::Reply(Reply::ExamList {
                supervisor,
                learners,
            }) => {
                out.push(fill(
                    &self.messages.exam_header,
                    None,
                    Some(supervisor.as_str()),
                    None,
                ));
                out.extend(learners.iter().cloned());
            }
        }
    }

    pub fn render(&self, outcome: &Outcome) -> Vec<String> {
        let mut out = Vec::new();
        self.render_into(outcome, &mut out);
        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

/// Substitute placeholders in one pass, so identifiers that happen to look
/// like placeholders are copied verbatim.
fn fill(
    template: &str,
    learner: Option<&str>,
    supervisor: Option<&str>,
    score: Option<i64>,
) -> String {
    let score = score.map(|score| score.to_string());
    let values = [
        ("{learner}", learner),
        ("{supervisor}", supervisor),
        ("{score}", score.as_deref()),
    ];

    let mut line = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        line.push_str(&rest[..start]);
        rest = &rest[start..];
        match values
            .iter()
            .find(|(key, value)| value.is_some() && rest.starts_with(key))
        {
            Some((key, Some(value))) => {
                line.push_str(value);
                rest = &rest[key.len()..];
            }
            _ => {
                line.push('{');
                rest = &rest[1..];
            }
        }
    }
    line.push_str(rest);
    line
}
