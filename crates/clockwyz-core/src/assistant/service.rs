//! Pluggable assistant responders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::ServiceError;
use crate::store::assistant::{AssistantContext, QuickAction};

/// Topic picker of the chat widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantTool {
    Optimize,
    Insights,
    Focus,
    Habits,
    Plan,
    Tasks,
    Meetings,
    Courses,
}

impl AssistantTool {
    pub const ALL: [AssistantTool; 8] = [
        AssistantTool::Optimize,
        AssistantTool::Insights,
        AssistantTool::Focus,
        AssistantTool::Habits,
        AssistantTool::Plan,
        AssistantTool::Tasks,
        AssistantTool::Meetings,
        AssistantTool::Courses,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Optimize => "optimize",
            Self::Insights => "insights",
            Self::Focus => "focus",
            Self::Habits => "habits",
            Self::Plan => "plan",
            Self::Tasks => "tasks",
            Self::Meetings => "meetings",
            Self::Courses => "courses",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Optimize => "Optimize Schedule",
            Self::Insights => "Get Insights",
            Self::Focus => "Focus Helper",
            Self::Habits => "Build Habits",
            Self::Plan => "Plan Time",
            Self::Tasks => "Organize Tasks",
            Self::Meetings => "Meeting Help",
            Self::Courses => "Course Help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Optimize => "Optimize your schedule and find conflicts",
            Self::Insights => "Analyze your productivity patterns",
            Self::Focus => "Improve focus and eliminate distractions",
            Self::Habits => "Build better habits and routines",
            Self::Plan => "Plan your time more effectively",
            Self::Tasks => "Organize and prioritize tasks",
            Self::Meetings => "Schedule and manage meetings",
            Self::Courses => "Academic planning and course management",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id.trim().to_ascii_lowercase())
    }
}

impl fmt::Display for AssistantTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantRequest {
    /// Tool id as picked in the widget. Unknown ids are allowed.
    pub tool: String,
    pub message: String,
    pub context: AssistantContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub content: String,
    pub suggestions: Vec<QuickAction>,
}

/// Something that can answer a chat message.
pub trait AssistantService: Send + Sync {
    /// Identifier used in logs and errors.
    fn name(&self) -> &str;

    fn respond(&self, request: &AssistantRequest) -> Result<AssistantReply, ServiceError>;
}

/// Fixed replies keyed by tool, with an optional artificial delay.
#[derive(Debug, Clone, Default)]
pub struct CannedAssistant {
    latency: Duration,
}

impl CannedAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// The reply for `tool`, or the generic help reply.
    pub fn reply_for(tool: Option<AssistantTool>) -> AssistantReply {
        let (content, suggestions): (&str, &[(&str, &str, &str)]) = match tool {
            Some(AssistantTool::Optimize) => (
                "I found some 2-hour free slots for your shopping trip! Based on your current schedule, here are the best available times:",
                &[
                    ("fri3pm", "Friday 3:00 PM", "schedule_friday_3pm"),
                    ("sat12pm", "Saturday 12:30 PM", "schedule_saturday_12pm"),
                    ("sun10am", "Sunday 10:00 AM", "schedule_sunday_10am"),
                ],
            ),
            Some(AssistantTool::Insights) => (
                "Let me analyze your productivity patterns! I'll examine your schedule data, completed tasks, and time allocation to provide actionable insights.",
                &[("report", "Weekly Report", "weekly_report"), ("trends", "Show Trends", "show_trends")],
            ),
            Some(AssistantTool::Focus) => (
                "I'll help you improve your focus! Let me suggest techniques and schedule adjustments to minimize distractions and maximize your deep work sessions.",
                &[
                    ("blocks", "Focus Blocks", "focus_blocks"),
                    ("distractions", "Eliminate Distractions", "eliminate_distractions"),
                ],
            ),
            Some(AssistantTool::Habits) => (
                "Great choice for building better habits! I can help you create sustainable routines that stick. Based on your schedule, I'll suggest habits that fit your lifestyle.",
                &[("morning", "Morning Routine", "morning_routine"), ("evening", "Evening Routine", "evening_routine")],
            ),
            Some(AssistantTool::Plan) => (
                "Time planning made easy! I'll help you allocate your time more effectively and create realistic schedules that you can actually follow.",
                &[("weekly", "Weekly Plan", "weekly_plan"), ("daily", "Daily Schedule", "daily_schedule")],
            ),
            Some(AssistantTool::Tasks) => (
                "Task organization assistance! I'll help you prioritize, organize, and track your tasks more effectively for better productivity.",
                &[
                    ("prioritize", "Prioritize Tasks", "prioritize_tasks"),
                    ("organize", "Organize Projects", "organize_projects"),
                ],
            ),
            Some(AssistantTool::Meetings) => (
                "Meeting management help! I can assist with scheduling meetings efficiently, preparing agendas, and optimizing your meeting time.",
                &[("schedule", "Schedule Meeting", "schedule_meeting"), ("agenda", "Create Agenda", "create_agenda")],
            ),
            Some(AssistantTool::Courses) => (
                "Academic planning support! I'll help you manage your courses, assignments, and study schedule more effectively for better academic performance.",
                &[("study", "Study Plan", "study_plan"), ("assignments", "Track Assignments", "track_assignments")],
            ),
            None => (
                "I'm here to help! Let me provide some suggestions based on what you're looking for.",
                &[("help", "Get Help", "get_help")],
            ),
        };
        AssistantReply {
            content: content.to_string(),
            suggestions: suggestions
                .iter()
                .map(|(id, label, action)| QuickAction::new(*id, *label, *action))
                .collect(),
        }
    }
}

impl AssistantService for CannedAssistant {
    fn name(&self) -> &str {
        "canned-assistant"
    }

    fn respond(&self, request: &AssistantRequest) -> Result<AssistantReply, ServiceError> {
        if request.message.trim().is_empty() {
            return Err(ServiceError::InvalidInput {
                service: self.name().to_string(),
                message: "empty message".to_string(),
            });
        }
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        Ok(Self::reply_for(AssistantTool::from_id(&request.tool)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tool: &str) -> AssistantRequest {
        AssistantRequest {
            tool: tool.into(),
            message: "help me".into(),
            context: AssistantContext::default(),
        }
    }

    #[test]
    fn every_tool_has_suggestions() {
        for tool in AssistantTool::ALL {
            let reply = CannedAssistant::new().respond(&request(tool.id())).unwrap();
            assert!(!reply.suggestions.is_empty(), "{tool}");
        }
    }

    #[test]
    fn optimize_offers_three_slots() {
        let reply = CannedAssistant::new().respond(&request("optimize")).unwrap();
        assert_eq!(reply.suggestions.len(), 3);
        assert_eq!(reply.suggestions[0].action, "schedule_friday_3pm");
    }

    #[test]
    fn unknown_tool_gets_help() {
        let reply = CannedAssistant::new().respond(&request("weather")).unwrap();
        assert!(reply.content.starts_with("I'm here to help!"));
        assert_eq!(reply.suggestions.len(), 1);
        assert_eq!(reply.suggestions[0].label, "Get Help");
    }

    #[test]
    fn tool_ids_parse() {
        assert_eq!(AssistantTool::from_id("Courses"), Some(AssistantTool::Courses));
        assert_eq!(AssistantTool::from_id("nope"), None);
    }
}
