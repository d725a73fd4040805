//! Chat command - Interactive conversation on stdin/stdout.

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info};

use insight_chat::{Assistant, ChatConfig, ConversationState, MessageRole, QUICK_SUGGESTIONS};

use crate::render::{render_detail, render_message, render_status, render_suggestions};

#[derive(Args)]
pub struct ChatArgs {
    /// Do not list the quick suggestions at start
    #[arg(long)]
    no_suggestions: bool,
}

/// A line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Text(String),
    Dismiss,
    Why(usize),
    Close,
    Suggest(usize),
    Reset,
    Help,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Text(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let position = parts.next().and_then(|n| n.parse::<usize>().ok()).filter(|n| *n > 0);

    match (name, position) {
        ("quit" | "exit", _) => Input::Quit,
        ("dismiss", _) => Input::Dismiss,
        ("close", _) => Input::Close,
        ("reset", _) => Input::Reset,
        ("help", _) => Input::Help,
        ("why", Some(n)) => Input::Why(n),
        ("suggest", Some(n)) => Input::Suggest(n),
        ("why" | "suggest", None) => Input::Invalid(format!("/{} needs a number, e.g. /{} 1", name, name)),
        _ => Input::Invalid(format!("Unknown command: /{}", name)),
    }
}

const HELP: &str = "Komutlar: /why <n>  /close  /dismiss  /suggest <n>  /reset  /quit";

pub async fn execute(args: ChatArgs, config: ChatConfig) -> Result<()> {
    info!("Starting interactive chat");

    let assistant = Assistant::new(config);
    let rx = assistant.subscribe();
    let initial = assistant.snapshot();

    for message in &initial.messages {
        println!("{}", render_message(message));
    }
    if !args.no_suggestions && initial.quick_suggestions_visible() {
        println!("{}", render_suggestions(&QUICK_SUGGESTIONS));
    }
    println!("{}", HELP);

    let renderer = tokio::spawn(render_changes(rx, initial));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Quit => {
                quit = true;
                break;
            }
            Input::Text(text) => {
                assistant.submit(&text)?;
            }
            Input::Dismiss => assistant.dismiss_status()?,
            Input::Close => assistant.clear_selection()?,
            Input::Reset => assistant.reset()?,
            Input::Help => println!("{}", HELP),
            Input::Suggest(n) => {
                if let Err(e) = assistant.submit_suggestion(n - 1) {
                    eprintln!("⚠️  {}", e);
                }
            }
            Input::Why(n) => {
                let selected = assistant
                    .snapshot()
                    .latest_recommendations()
                    .and_then(|recs| recs.get(n - 1).cloned());
                match selected {
                    Some(rec) => assistant.select_recommendation(rec)?,
                    None => eprintln!("⚠️  No recommendation #{}", n),
                }
            }
            Input::Invalid(reason) => eprintln!("⚠️  {}", reason),
        }
    }

    // Piped input: let outstanding replies arrive before exiting
    if !quit {
        assistant.wait_idle().await?;
    }

    // Dropping the assistant closes the channel and ends the renderer
    drop(assistant);
    renderer.await?;
    Ok(())
}

/// Print whatever changed between consecutive states.
async fn render_changes(mut rx: watch::Receiver<ConversationState>, mut previous: ConversationState) {
    while rx.changed().await.is_ok() {
        let current = rx.borrow_and_update().clone();

        if current.messages.len() < previous.messages.len() {
            println!("── Sohbet sıfırlandı ──");
            for message in &current.messages {
                println!("{}", render_message(message));
            }
        } else {
            for message in &current.messages[previous.messages.len()..] {
                if message.role == MessageRole::Assistant {
                    println!("{}", render_message(message));
                }
            }
        }

        if current.is_analyzing() && !previous.is_analyzing() {
            println!("⏳ Analiz ediyorum...");
        }

        if current.status != previous.status {
            if let Some(line) = render_status(&current.status) {
                println!("{}", line);
            }
        }

        if current.selected != previous.selected {
            if let Some(rec) = &current.selected {
                println!("{}", render_detail(rec));
            }
        }

        previous = current;
    }
    debug!("Conversation closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_input("Merhaba"), Input::Text("Merhaba".to_string()));
        assert_eq!(parse_input("  "), Input::Text("  ".to_string()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input(" /dismiss "), Input::Dismiss);
        assert_eq!(parse_input("/why 2"), Input::Why(2));
        assert_eq!(parse_input("/suggest 4"), Input::Suggest(4));
        assert_eq!(parse_input("/reset"), Input::Reset);
        assert_eq!(parse_input("/close"), Input::Close);
    }

    #[test]
    fn test_parse_invalid_commands() {
        assert!(matches!(parse_input("/why"), Input::Invalid(_)));
        assert!(matches!(parse_input("/why 0"), Input::Invalid(_)));
        assert!(matches!(parse_input("/suggest x"), Input::Invalid(_)));
        assert!(matches!(parse_input("/dance"), Input::Invalid(_)));
    }
}
