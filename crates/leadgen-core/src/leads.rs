//! Lead data model.
//!
//! [`UserInteraction`] is what the extraction service returns for a single
//! question or answer. Every field is optional on the wire because the
//! service fills in only what it can find on the page. [`flatten`] expands
//! per-page extractions into one [`FlatLeadRecord`] per interaction, which
//! is the only shape that gets exported.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Separator used when joining an interaction's links into one cell.
pub const LINK_DELIMITER: &str = ", ";

/// Kind of forum post an interaction came from.
///
/// Parsing is case-insensitive. Values other than `question` and `answer`
/// are kept verbatim in [`PostType::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostType {
    Question,
    Answer,
    Other(String),
}

impl PostType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PostType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "question" => Self::Question,
            "answer" => Self::Answer,
            _ => Self::Other(raw),
        }
    }
}

impl From<PostType> for String {
    fn from(post_type: PostType) -> Self {
        post_type.as_str().to_owned()
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single question or answer post by a user, as extracted from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInteraction {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "postType")]
    pub post_type: Option<PostType>,
    /// Free-form, as shown on the source page.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Unreadable counts become `None` rather than failing the interaction.
    #[serde(default, deserialize_with = "lenient_upvotes")]
    pub upvotes: Option<u64>,
    #[serde(default, deserialize_with = "lenient_links")]
    pub links: Option<Vec<String>>,
}

fn lenient_upvotes<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().and_then(count_from_f64)),
        Some(Value::String(text)) => parse_upvote_count(&text),
        _ => None,
    })
}

/// Reads an upvote count as forum pages display it.
///
/// Accepts plain numbers, thousands separators, and `K`/`M`/`B` suffixes,
/// with an optional trailing word: `"1,204"`, `"1.2K"`, `"35 upvotes"`.
/// Negative or non-numeric text yields `None`.
fn parse_upvote_count(text: &str) -> Option<u64> {
    let compact = text.trim().replace(',', "");
    let token = compact.split_whitespace().next()?;
    let (index, last) = token.char_indices().last()?;
    let (digits, scale) = match last {
        'k' | 'K' => (&token[..index], 1e3),
        'm' | 'M' => (&token[..index], 1e6),
        'b' | 'B' => (&token[..index], 1e9),
        _ => (token, 1.0),
    };
    let n: f64 = digits.parse().ok()?;
    count_from_f64(n * scale)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_f64(n: f64) -> Option<u64> {
    (n.is_finite() && n >= 0.0).then(|| n.round() as u64)
}

/// Keeps the string entries of a links list; `null` and other values are skipped.
fn lenient_links<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(link) if !link.trim().is_empty() => Some(link),
                    _ => None,
                })
                .collect(),
        ),
        Some(Value::String(link)) if !link.trim().is_empty() => Some(vec![link]),
        _ => None,
    })
}

/// All interactions extracted from one discovered URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtraction {
    pub source_url: String,
    pub interactions: Vec<UserInteraction>,
}

impl PageExtraction {
    /// Builds a page extraction, or `None` when the page yielded nothing.
    ///
    /// Pages without interactions never reach the flattener.
    #[must_use]
    pub fn new(source_url: impl Into<String>, interactions: Vec<UserInteraction>) -> Option<Self> {
        if interactions.is_empty() {
            return None;
        }
        Some(Self {
            source_url: source_url.into(),
            interactions,
        })
    }
}

/// One exported row: a single interaction tagged with the page it came from.
///
/// Serde names match the CSV header and JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatLeadRecord {
    #[serde(rename = "Website URL")]
    pub website_url: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Bio")]
    pub bio: String,
    #[serde(rename = "Post Type")]
    pub post_type: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Upvotes")]
    pub upvotes: u64,
    #[serde(rename = "Links")]
    pub links: String,
}

impl FlatLeadRecord {
    fn from_interaction(website_url: &str, interaction: &UserInteraction) -> Self {
        Self {
            website_url: website_url.to_owned(),
            username: interaction.username.clone().unwrap_or_default(),
            bio: interaction.bio.clone().unwrap_or_default(),
            post_type: interaction
                .post_type
                .as_ref()
                .map(|p| p.as_str().to_owned())
                .unwrap_or_default(),
            timestamp: interaction.timestamp.clone().unwrap_or_default(),
            upvotes: interaction.upvotes.unwrap_or(0),
            links: interaction
                .links
                .as_deref()
                .map(|links| links.join(LINK_DELIMITER))
                .unwrap_or_default(),
        }
    }
}

/// Expands page extractions into one record per interaction.
///
/// Output order follows page order, then interaction order within a page.
/// The number of records always equals the total interaction count.
#[must_use]
pub fn flatten(pages: &[PageExtraction]) -> Vec<FlatLeadRecord> {
    pages
        .iter()
        .flat_map(|page| {
            page.interactions
                .iter()
                .map(|interaction| FlatLeadRecord::from_interaction(&page.source_url, interaction))
        })
        .collect()
}

#[cfg(test)]
#[path = "leads_test.rs"]
mod tests;
