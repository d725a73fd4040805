//! Plain-text rendering of conversation state.

use chrono::Local;

use insight_chat::{Message, MessageRole, Metric, QuickSuggestion, Recommendation, StatusBanner, StatusKind};

const BAR_WIDTH: usize = 20;

/// Render one message with its recommendation cards.
pub fn render_message(message: &Message) -> String {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    let speaker = match message.role {
        MessageRole::User => "Siz",
        MessageRole::Assistant => "Asistan",
    };

    let mut out = format!("[{}] {}: {}", time, speaker, message.content);
    for (i, rec) in message.recommendations.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_card(i + 1, rec));
    }
    out
}

/// Compact recommendation card
pub fn render_card(position: usize, rec: &Recommendation) -> String {
    let mut out = format!(
        "  {}. {} (%{} uyum)\n     {}",
        position, rec.title, rec.score, rec.description
    );
    for metric in &rec.metrics {
        out.push_str("\n     ");
        out.push_str(&render_metric(metric));
    }
    out
}

/// Detail view opened with `/why`
pub fn render_detail(rec: &Recommendation) -> String {
    format!(
        "🔎 Neden {}?\n   Uyum skoru: %{}\n   {}",
        rec.title, rec.score, rec.reasoning
    )
}

pub fn render_metric(metric: &Metric) -> String {
    let filled = usize::from(metric.value) * BAR_WIDTH / 100;
    format!(
        "{:<11} {}{} {:>3}",
        metric.label,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        metric.value
    )
}

/// Banner line, or `None` when the banner is hidden
pub fn render_status(status: &StatusBanner) -> Option<String> {
    let icon = match status.kind? {
        StatusKind::Success => "✅",
        StatusKind::Error => "❌",
        StatusKind::Warning => "⚠️ ",
    };
    Some(format!("{} {}", icon, status.message))
}

pub fn render_suggestions(suggestions: &[QuickSuggestion]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("  /suggest {}  {} - {}", i + 1, s.label, s.query))
        .collect::<Vec<_>>()
        .join("\n")
}
