//! Book content and catalog models.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Difficulty rating of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    /// Easy.
    #[serde(alias = "Easy", alias = "easy")]
    Easy,
    /// Medium.
    #[serde(alias = "Medium", alias = "medium")]
    Medium,
    /// Hard.
    #[serde(alias = "Hard", alias = "hard")]
    Hard,
}

/// Catalog entry describing an available book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Resource filename of the book content (e.g. "the-prisoner.json").
    pub path: String,

    /// Book title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Difficulty rating.
    pub difficulty: Difficulty,

    /// Genre (e.g. "Adventure", "Fantasy").
    #[serde(rename = "type")]
    pub kind: String,

    /// Free-text reading time range (e.g. "40-60 min").
    pub duration: String,

    /// Number of chapters.
    pub chapters: u32,

    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Back-cover summary.
    pub summary: String,
}

/// A complete adventure book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Book title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Difficulty rating, passed through as written in the content file.
    #[serde(default)]
    pub difficulty: String,

    /// Genre.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Ordered narrative sections.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Book {
    /// Parse a book document.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a section by its ID.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Section the reader starts on: the one typed `BEGIN`, else the first.
    pub fn initial_section(&self) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.kind.eq_ignore_ascii_case("begin"))
            .or_else(|| self.sections.first())
    }

    /// Whether some ending can be reached from the initial section by
    /// following choices. Links to unknown sections are ignored.
    pub fn has_reachable_ending(&self) -> bool {
        let Some(start) = self.initial_section() else {
            return false;
        };

        let mut visited = HashSet::new();
        let mut pending = vec![start];
        while let Some(section) = pending.pop() {
            if !visited.insert(section.id.as_str()) {
                continue;
            }
            if section.is_ending() {
                return true;
            }
            pending.extend(
                section
                    .options
                    .iter()
                    .filter_map(|choice| self.section(&choice.goto_id)),
            );
        }
        false
    }
}

/// One narrative unit of a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Identifier, unique within the book.
    pub id: String,

    /// Narrative text.
    pub text: String,

    /// Section type (e.g. "BEGIN", "NODE", "END").
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Choices offered to the reader. Empty for terminal sections.
    #[serde(default)]
    pub options: Vec<Choice>,
}

impl Section {
    /// Whether the story stops here.
    pub fn is_ending(&self) -> bool {
        self.kind.eq_ignore_ascii_case("end")
            || self.kind.eq_ignore_ascii_case("ending")
            || self.options.is_empty()
    }
}

/// A reader choice within a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Choice text.
    pub description: String,

    /// ID of the section this choice leads to.
    pub goto_id: String,

    /// Effect triggered by taking this choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<Consequence>,
}

/// Gameplay effect of a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consequence {
    /// Effect category (e.g. "LOSE_HEALTH", "GAIN_HEALTH", "health").
    #[serde(rename = "type")]
    pub kind: String,

    /// Effect value, kept as text. Numbers in the source are accepted and
    /// `null` stays `null`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: Option<String>,

    /// Human-readable description of the effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Consequence {
    /// Whether this consequence changes the reader's health.
    pub fn affects_health(&self) -> bool {
        ["LOSE_HEALTH", "GAIN_HEALTH", "HEALTH"]
            .iter()
            .any(|k| self.kind.eq_ignore_ascii_case(k))
    }

    /// Signed health change, or `None` when the consequence is not a health
    /// effect or its value is not an integer.
    pub fn health_delta(&self) -> Option<i32> {
        let value: i32 = self.value.as_deref()?.trim().parse().ok()?;

        if self.kind.eq_ignore_ascii_case("LOSE_HEALTH") {
            Some(-value)
        } else if self.kind.eq_ignore_ascii_case("GAIN_HEALTH")
            || self.kind.eq_ignore_ascii_case("HEALTH")
        {
            Some(value)
        } else {
            None
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Null => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}
