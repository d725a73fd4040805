//! Quick suggestion prompts offered before the first user message.

use serde::Serialize;

/// A one-click prompt
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct QuickSuggestion {
    pub label: &'static str,
    pub query: &'static str,
}

pub const QUICK_SUGGESTIONS: [QuickSuggestion; 4] = [
    QuickSuggestion {
        label: "Sezgisel Analiz",
        query: "Verilerimi analiz et ve optimize edilebilecek alanları göster.",
    },
    QuickSuggestion {
        label: "Performans Raporu",
        query: "Sistem performansını değerlendir ve önerilerde bulun.",
    },
    QuickSuggestion {
        label: "Hızlı Öneriler",
        query: "En yüksek uyumlu çözümleri listele.",
    },
    QuickSuggestion {
        label: "Detaylı Araştırma",
        query: "Tüm parametreleri incele ve derinlemesine analiz yap.",
    },
];

/// Look up a suggestion by zero-based index.
pub fn quick_suggestion(index: usize) -> Option<&'static QuickSuggestion> {
    QUICK_SUGGESTIONS.get(index)
}
