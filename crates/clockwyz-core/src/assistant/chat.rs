//! Chat widget submission flow.

use super::service::{AssistantRequest, AssistantService, AssistantTool};
use crate::error::ServiceError;
use crate::store::assistant::{AssistantStore, MessageRole};

/// Shown in place of a reply whenever the responder fails.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input, or a submission is already running.
    Ignored,
    Replied,
    Failed,
}

/// The chat widget: the selected tool plus the submit flow.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    tool: AssistantTool,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self {
            tool: AssistantTool::Optimize,
        }
    }
}

impl ChatWidget {
    pub fn new(tool: AssistantTool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> AssistantTool {
        self.tool
    }

    pub fn select_tool(&mut self, tool: AssistantTool) {
        self.tool = tool;
    }

    /// `Ask Optimize Schedule...`
    pub fn placeholder(&self) -> String {
        format!("Ask {}...", self.tool.label())
    }

    /// Send the store's input to `service` and append the reply.
    ///
    /// The input is trimmed, appended as a user message and cleared before
    /// the call. Failures are logged, recorded as the store error and shown
    /// as [`ERROR_REPLY`].
    pub fn submit(&self, store: &mut AssistantStore, service: &dyn AssistantService) -> SubmitOutcome {
        let message = store.input_value().trim().to_string();
        if message.is_empty() || store.is_loading() {
            return SubmitOutcome::Ignored;
        }

        store.add_message(MessageRole::User, message.clone(), Vec::new());
        store.set_input_value("");
        store.set_loading(true);
        store.set_typing(true);

        let result = if store.preferences().enabled {
            let request = AssistantRequest {
                tool: self.tool.id().to_string(),
                message,
                context: store.context().clone(),
            };
            service.respond(&request)
        } else {
            Err(ServiceError::Disabled {
                service: service.name().to_string(),
            })
        };

        let outcome = match result {
            Ok(reply) => {
                store.set_error(None);
                store.add_message(MessageRole::Assistant, reply.content, reply.suggestions);
                SubmitOutcome::Replied
            }
            Err(err) => {
                tracing::warn!(service = service.name(), error = %err, "assistant request failed");
                store.set_error(Some(err.to_string()));
                store.add_message(MessageRole::Assistant, ERROR_REPLY, Vec::new());
                SubmitOutcome::Failed
            }
        };
        store.set_loading(false);
        store.set_typing(false);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::service::{AssistantReply, CannedAssistant};
    use crate::store::assistant::PreferencesUpdate;

    struct Broken;

    impl AssistantService for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn respond(&self, _request: &AssistantRequest) -> Result<AssistantReply, ServiceError> {
            Err(ServiceError::Failed {
                service: "broken".into(),
                message: "timeout".into(),
            })
        }
    }

    #[test]
    fn submit_appends_user_and_reply() {
        let mut store = AssistantStore::new();
        store.set_input_value("  find me time  ");
        let widget = ChatWidget::default();
        assert_eq!(widget.submit(&mut store, &CannedAssistant::new()), SubmitOutcome::Replied);

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "find me time");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].suggestions.len(), 3);
        assert_eq!(store.input_value(), "");
        assert!(!store.is_loading());
    }

    #[test]
    fn blank_input_and_reentry_are_ignored() {
        let mut store = AssistantStore::new();
        store.set_input_value("   ");
        let widget = ChatWidget::default();
        assert_eq!(widget.submit(&mut store, &CannedAssistant::new()), SubmitOutcome::Ignored);

        store.set_input_value("hello");
        store.set_loading(true);
        assert_eq!(widget.submit(&mut store, &CannedAssistant::new()), SubmitOutcome::Ignored);
        assert!(store.messages().is_empty());
    }

    #[test]
    fn failures_become_generic_reply() {
        let mut store = AssistantStore::new();
        store.set_input_value("hello");
        assert_eq!(ChatWidget::default().submit(&mut store, &Broken), SubmitOutcome::Failed);
        assert_eq!(store.messages()[1].content, ERROR_REPLY);
        assert!(store.error().unwrap().contains("timeout"));
    }

    #[test]
    fn disabled_assistant_fails_without_calling() {
        let mut store = AssistantStore::new();
        store.update_preferences(PreferencesUpdate {
            enabled: Some(false),
            ..PreferencesUpdate::default()
        });
        store.set_input_value("hello");
        assert_eq!(
            ChatWidget::new(AssistantTool::Plan).submit(&mut store, &CannedAssistant::new()),
            SubmitOutcome::Failed
        );
        assert_eq!(store.error(), Some("canned-assistant is disabled"));
    }
}
