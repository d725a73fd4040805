//! Keyword classification of user queries.
//!
//! A query is an "analysis" query when its lowercased text contains any of
//! the configured keywords. Everything else takes the plain reply path.

use serde::{Deserialize, Serialize};

/// Keywords that route a query to the recommendation reply
pub const ANALYSIS_KEYWORDS: [&str; 3] = ["analiz", "öneri", "optimize"];

/// Which canned reply a query receives
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplyPath {
    Recommendations,
    Plain,
}

/// Check a query against the default keyword set.
pub fn is_analysis_query(text: &str) -> bool {
    contains_any(text, ANALYSIS_KEYWORDS.iter().copied())
}

fn contains_any<'a>(text: &str, keywords: impl IntoIterator<Item = &'a str>) -> bool {
    let lower = text.to_lowercase();
    keywords
        .into_iter()
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
}

/// Keyword classifier with a configurable keyword set
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ANALYSIS_KEYWORDS)
    }
}

impl Classifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_analysis_query(&self, text: &str) -> bool {
        contains_any(text, self.keywords.iter().map(String::as_str))
    }

    pub fn classify(&self, text: &str) -> ReplyPath {
        if self.is_analysis_query(text) {
            ReplyPath::Recommendations
        } else {
            ReplyPath::Plain
        }
    }
}
