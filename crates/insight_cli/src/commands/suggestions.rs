//! Suggestions command - List the quick suggestion prompts.

use anyhow::Result;
use clap::Args;

use insight_chat::QUICK_SUGGESTIONS;

use crate::render::render_suggestions;

#[derive(Args)]
pub struct SuggestionsArgs {
    /// Print the suggestions as JSON
    #[arg(long)]
    json: bool,
}

pub fn execute(args: SuggestionsArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&QUICK_SUGGESTIONS)?);
    } else {
        println!("{}", render_suggestions(&QUICK_SUGGESTIONS));
    }
    Ok(())
}
