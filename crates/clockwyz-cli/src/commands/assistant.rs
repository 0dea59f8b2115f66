use chrono::Local;
use clap::Subcommand;
use clockwyz_core::assistant::{AssistantTool, SubmitOutcome};
use clockwyz_core::store::sync_schedule_context;
use clockwyz_core::{AssistantStore, CannedAssistant, ChatWidget, Config};
use std::time::Duration;

use crate::sample::sample_store;

#[derive(Subcommand)]
pub enum AssistantAction {
    /// Send one message and print the reply
    Ask {
        message: String,
        /// Tool id (see `assistant tools`)
        #[arg(long, default_value = "optimize")]
        tool: String,
        /// Output the full conversation as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the tools the chat widget offers
    Tools,
}

pub fn run(action: AssistantAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AssistantAction::Ask { message, tool, json } => {
            let tool = AssistantTool::from_id(&tool).ok_or_else(|| format!("unknown tool: {tool}"))?;
            let config = Config::load_or_default();
            let service = CannedAssistant::with_latency(Duration::from_millis(config.assistant.simulated_latency_ms));

            let now = Local::now().naive_local();
            let schedule = sample_store(now.date());
            let mut store = AssistantStore::with_preferences(config.assistant_preferences());
            store.create_session("user1");
            sync_schedule_context(&mut store, &schedule, now);
            store.set_input_value(message);

            let outcome = ChatWidget::new(tool).submit(&mut store, &service);
            if json {
                println!("{}", serde_json::to_string_pretty(store.messages())?);
            } else if let Some(reply) = store.messages().last() {
                println!("{}", reply.content);
                for s in &reply.suggestions {
                    println!("  > {} ({})", s.label, s.action);
                }
            }
            if outcome == SubmitOutcome::Failed {
                return Err(store.error().unwrap_or("assistant failed").to_string().into());
            }
        }
        AssistantAction::Tools => {
            for tool in AssistantTool::ALL {
                println!("{:<10} {:<18} {}", tool.id(), tool.label(), tool.description());
            }
        }
    }
    Ok(())
}
