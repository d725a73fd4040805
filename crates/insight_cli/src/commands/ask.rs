//! Ask command - Submit queries and print the resulting conversation.

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use insight_chat::{Assistant, ChatConfig};

use crate::render::{render_message, render_status};

#[derive(Args)]
pub struct AskArgs {
    /// Queries to submit, in order
    #[arg(required = true)]
    queries: Vec<String>,

    /// Print the final conversation state as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: AskArgs, config: ChatConfig) -> Result<()> {
    info!("Submitting {} queries", args.queries.len());

    let assistant = Assistant::new(config);
    for query in &args.queries {
        if assistant.submit(query)?.is_none() {
            warn!("Skipping blank query");
        }
    }
    assistant.wait_idle().await?;

    let state = assistant.snapshot();
    if args.json {
        let json = serde_json::to_string_pretty(&state).context("Failed to serialize conversation")?;
        println!("{}", json);
        return Ok(());
    }

    for message in &state.messages {
        println!("{}", render_message(message));
    }
    if let Some(line) = render_status(&state.status) {
        println!("{}", line);
    }
    Ok(())
}
