//! The assistant chat widget and the responder it talks to.

pub mod chat;
pub mod service;

pub use chat::{ChatWidget, SubmitOutcome, ERROR_REPLY};
pub use service::{AssistantReply, AssistantRequest, AssistantService, AssistantTool, CannedAssistant};
