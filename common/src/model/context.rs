//! Mount-time context handed to the widget by the host page.
//!
//! The context is fetched once when the widget is mounted. It is not a sync:
//! learner snapshots are rendered straight from it, and staff snapshots are
//! always reloaded from the `load_submissions` handler.

use serde::{Deserialize, Serialize};

use super::submission::LearnerSubmission;

/// Which sub-view and actions the widget offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Learner,
    Staff,
}

/// Prompt texts shown to learners, one per submission state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessages {
    pub prompt: String,
    pub waiting: String,
    pub completed: String,
}

impl Default for PromptMessages {
    fn default() -> Self {
        Self {
            prompt: "Coloca aqui o link para a tua tarefa no fórum para que um instrutor te atribua 1 ponto (poderá demorar algum tempo).".to_string(),
            waiting: "Um instrutor irá verificar a tua submissão brevemente.".to_string(),
            completed: "Parabéns! Conseguiste realizar esta tarefa!".to_string(),
        }
    }
}

impl PromptMessages {
    pub fn for_submission(&self, submission: &LearnerSubmission) -> &str {
        match submission {
            LearnerSubmission::Unsubmitted => &self.prompt,
            LearnerSubmission::Submitted { .. } => &self.waiting,
            LearnerSubmission::Validated { .. } => &self.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetContext {
    /// Trailing part of the block location, used to scope DOM ids.
    pub xblock_id: String,
    /// Base URL under which the widget handlers are mounted.
    pub handler_base: String,
    pub role: Role,
    #[serde(default)]
    pub is_course_cohorted: bool,
    #[serde(default)]
    pub cohort: Option<String>,
    #[serde(default)]
    pub messages: PromptMessages,
    /// The learner's own submission. Always `Unsubmitted` for staff.
    #[serde(default)]
    pub submission: LearnerSubmission,
}

impl WidgetContext {
    pub fn handler_url(&self, handler: &str) -> String {
        format!("{}/{}", self.handler_base.trim_end_matches('/'), handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_url_joins_without_double_slash() {
        let context: WidgetContext = serde_json::from_str(
            r#"{"xblock_id":"abc","handler_base":"/api/forum_task/abc/users/u1/handler/","role":"staff"}"#,
        )
        .unwrap();
        assert_eq!(
            context.handler_url("load_submissions"),
            "/api/forum_task/abc/users/u1/handler/load_submissions"
        );
        assert_eq!(context.role, Role::Staff);
        assert!(!context.is_course_cohorted);
        assert_eq!(context.submission, LearnerSubmission::Unsubmitted);
    }

    #[test]
    fn prompt_follows_submission_state() {
        let messages = PromptMessages::default();
        let link = "https://discord.com/x".to_string();
        assert_eq!(messages.for_submission(&LearnerSubmission::Unsubmitted), messages.prompt);
        assert_eq!(
            messages.for_submission(&LearnerSubmission::Submitted { link: link.clone() }),
            messages.waiting
        );
        assert_eq!(
            messages.for_submission(&LearnerSubmission::Validated { link }),
            messages.completed
        );
    }
}
