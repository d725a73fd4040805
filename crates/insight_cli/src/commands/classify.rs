//! Classify command - Show which reply a query would receive.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use insight_chat::{ChatConfig, ReplyPath};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Query text (multiple words are joined with spaces)
    #[arg(required = true)]
    text: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Classification {
    path: ReplyPath,
    #[serde(rename = "matchedKeywords")]
    matched_keywords: Vec<String>,
}

fn classify(text: &str, config: &ChatConfig) -> Classification {
    let classifier = config.classifier();
    let lower = text.to_lowercase();
    let matched_keywords = classifier
        .keywords()
        .iter()
        .filter(|k| lower.contains(&k.to_lowercase()))
        .cloned()
        .collect();

    Classification {
        path: classifier.classify(text),
        matched_keywords,
    }
}

pub fn execute(args: ClassifyArgs, config: ChatConfig) -> Result<()> {
    let text = args.text.join(" ");
    let result = classify(&text, &config);

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
        return Ok(());
    }

    match result.path {
        ReplyPath::Recommendations => println!(
            "📊 recommendations (matched: {})",
            result.matched_keywords.join(", ")
        ),
        ReplyPath::Plain => println!("💬 plain reply"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_reports_matches() {
        let result = classify("Analiz et ve optimize et", &ChatConfig::default());
        assert_eq!(result.path, ReplyPath::Recommendations);
        assert_eq!(result.matched_keywords, ["analiz", "optimize"]);
    }

    #[test]
    fn test_classify_plain() {
        let result = classify("Merhaba", &ChatConfig::default());
        assert_eq!(result.path, ReplyPath::Plain);
        assert!(result.matched_keywords.is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["path"], "plain");
    }
}
