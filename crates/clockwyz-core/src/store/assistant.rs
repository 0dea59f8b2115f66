//! Assistant widget store: chat UI flags, messages, context and suggestions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::schedule::ViewMode;

/// Recent actions kept in the context, newest first.
pub const MAX_RECENT_ACTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// A follow-up button offered under an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub id: String,
    pub label: String,
    pub action: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl QuickAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            action: action.into(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub suggestions: Vec<QuickAction>,
    #[serde(default)]
    pub is_loading: bool,
}

/// Fields of a message that can be edited after it was added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageUpdate {
    pub content: Option<String>,
    pub suggestions: Option<Vec<QuickAction>>,
    pub is_loading: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleContext {
    pub current_week: NaiveDate,
    pub upcoming_events: usize,
    pub conflicts: usize,
    pub today_events: usize,
    pub selected_event: Option<String>,
    pub view_mode: ViewMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitContext {
    pub today_progress: f64,
    pub streaks: u32,
    pub suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicContext {
    pub assignments_due: usize,
    pub upcoming_exams: usize,
    pub gpa: Option<f64>,
}

/// What the assistant knows about the user's current activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantContext {
    pub current_section: String,
    pub selected_items: Vec<String>,
    pub user_preferences: BTreeMap<String, serde_json::Value>,
    pub recent_actions: Vec<String>,
    pub schedule: Option<ScheduleContext>,
    pub habits: Option<HabitContext>,
    pub academic: Option<AcademicContext>,
}

impl Default for AssistantContext {
    fn default() -> Self {
        Self {
            current_section: "dashboard".to_string(),
            selected_items: Vec::new(),
            user_preferences: BTreeMap::new(),
            recent_actions: Vec::new(),
            schedule: None,
            habits: None,
            academic: None,
        }
    }
}

/// Partial context; set fields replace the stored ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub current_section: Option<String>,
    pub selected_items: Option<Vec<String>>,
    pub user_preferences: Option<BTreeMap<String, serde_json::Value>>,
    pub schedule: Option<ScheduleContext>,
    pub habits: Option<HabitContext>,
    pub academic: Option<AcademicContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub user_id: String,
    pub messages: Vec<Message>,
    pub context: AssistantContext,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Schedule,
    Habit,
    Academic,
    Productivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub confidence: f64,
    pub actionable: bool,
    pub priority: SuggestionPriority,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Professional,
    #[default]
    Friendly,
    Casual,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Minimal,
    #[default]
    Normal,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSharing {
    pub schedule: bool,
    pub habits: bool,
    pub academic: bool,
    pub personal: bool,
}

impl Default for ContextSharing {
    fn default() -> Self {
        Self {
            schedule: true,
            habits: true,
            academic: true,
            personal: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub enabled: bool,
    pub personality: Personality,
    pub notification_level: NotificationLevel,
    pub auto_suggestions: bool,
    pub voice_enabled: bool,
    pub context_sharing: ContextSharing,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enabled: true,
            personality: Personality::Friendly,
            notification_level: NotificationLevel::Normal,
            auto_suggestions: true,
            voice_enabled: false,
            context_sharing: ContextSharing::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    pub enabled: Option<bool>,
    pub personality: Option<Personality>,
    pub notification_level: Option<NotificationLevel>,
    pub auto_suggestions: Option<bool>,
    pub voice_enabled: Option<bool>,
    pub context_sharing: Option<ContextSharing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantStore {
    is_open: bool,
    is_minimized: bool,
    is_loading: bool,
    is_typing: bool,
    session: Option<ChatSession>,
    messages: Vec<Message>,
    input_value: String,
    context: AssistantContext,
    suggestions: Vec<Suggestion>,
    unread_suggestions: usize,
    preferences: Preferences,
    error: Option<String>,
}

impl AssistantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn context(&self) -> &AssistantContext {
        &self.context
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn unread_suggestions(&self) -> usize {
        self.unread_suggestions
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── Widget ───────────────────────────────────────────────────────

    pub fn toggle_chat(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn minimize_chat(&mut self) {
        self.is_minimized = true;
    }

    pub fn open_chat(&mut self) {
        self.is_open = true;
        self.is_minimized = false;
    }

    pub fn close_chat(&mut self) {
        self.is_open = false;
        self.is_minimized = false;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.is_typing = typing;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    // ── Messages ─────────────────────────────────────────────────────

    /// Append a message with a generated id and the current timestamp.
    pub fn add_message(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
        suggestions: Vec<QuickAction>,
    ) -> &Message {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            suggestions,
            is_loading: false,
        };
        tracing::debug!(id = %message.id, role = ?role, "add_message");
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn update_message(&mut self, id: &str, update: MessageUpdate) -> bool {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        if let Some(content) = update.content {
            message.content = content;
        }
        if let Some(suggestions) = update.suggestions {
            message.suggestions = suggestions;
        }
        if let Some(loading) = update.is_loading {
            message.is_loading = loading;
        }
        true
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Start a session with a snapshot of the current context. Clears the
    /// visible messages.
    pub fn create_session(&mut self, user_id: impl Into<String>) -> &ChatSession {
        let now = Utc::now();
        self.messages.clear();
        self.session.insert(ChatSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            messages: Vec::new(),
            context: self.context.clone(),
            created_at: now,
            updated_at: now,
            is_active: true,
        })
    }

    pub fn end_session(&mut self) {
        self.session = None;
    }

    // ── Context ──────────────────────────────────────────────────────

    pub fn update_context(&mut self, update: ContextUpdate) {
        if let Some(section) = update.current_section {
            self.context.current_section = section;
        }
        if let Some(items) = update.selected_items {
            self.context.selected_items = items;
        }
        if let Some(prefs) = update.user_preferences {
            self.context.user_preferences = prefs;
        }
        if let Some(schedule) = update.schedule {
            self.context.schedule = Some(schedule);
        }
        if let Some(habits) = update.habits {
            self.context.habits = Some(habits);
        }
        if let Some(academic) = update.academic {
            self.context.academic = Some(academic);
        }
    }

    pub fn set_current_section(&mut self, section: impl Into<String>) {
        self.context.current_section = section.into();
    }

    /// Push to the front of the recent actions, dropping the oldest past the cap.
    pub fn add_recent_action(&mut self, action: impl Into<String>) {
        self.context.recent_actions.insert(0, action.into());
        self.context.recent_actions.truncate(MAX_RECENT_ACTIONS);
    }

    // ── Suggestions ──────────────────────────────────────────────────

    pub fn add_suggestion(&mut self, suggestion: Suggestion) {
        self.suggestions.insert(0, suggestion);
        self.unread_suggestions += 1;
    }

    pub fn remove_suggestion(&mut self, id: &str) {
        self.suggestions.retain(|s| s.id != id);
    }

    /// Decrement the unread count if `id` exists and something is unread.
    pub fn mark_suggestion_read(&mut self, id: &str) {
        if self.suggestions.iter().any(|s| s.id == id) && self.unread_suggestions > 0 {
            self.unread_suggestions -= 1;
        }
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.unread_suggestions = 0;
    }

    // ── Preferences ──────────────────────────────────────────────────

    pub fn update_preferences(&mut self, update: PreferencesUpdate) {
        let prefs = &mut self.preferences;
        if let Some(v) = update.enabled {
            prefs.enabled = v;
        }
        if let Some(v) = update.personality {
            prefs.personality = v;
        }
        if let Some(v) = update.notification_level {
            prefs.notification_level = v;
        }
        if let Some(v) = update.auto_suggestions {
            prefs.auto_suggestions = v;
        }
        if let Some(v) = update.voice_enabled {
            prefs.voice_enabled = v;
        }
        if let Some(v) = update.context_sharing {
            prefs.context_sharing = v;
        }
    }
}
