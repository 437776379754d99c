//! Output records
//!
//! One [`PageRecord`] is emitted per extraction attempt. Successful records
//! carry `content`, failed ones carry `error`; never both.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use url::Url;

/// Layout of `scraped_at`: local wall-clock time, second precision
pub const SCRAPED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of page a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    AboutPage,
}

/// Either the extracted text or the reason extraction failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageOutcome {
    Content { content: String },
    Error { error: String },
}

/// A single entry of the output feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,

    #[serde(flatten)]
    pub outcome: PageOutcome,

    pub page_type: PageType,

    #[serde(with = "scraped_at_format")]
    pub scraped_at: NaiveDateTime,
}

impl PageRecord {
    /// Builds a successful record stamped with the current local time
    pub fn extracted(url: &Url, page_title: Option<&str>, content: String) -> Self {
        Self::with_outcome(url, page_title, PageOutcome::Content { content })
    }

    /// Builds an error record stamped with the current local time
    pub fn failed(url: &Url, page_title: Option<&str>, error: impl Into<String>) -> Self {
        Self::with_outcome(
            url,
            page_title,
            PageOutcome::Error {
                error: error.into(),
            },
        )
    }

    fn with_outcome(url: &Url, page_title: Option<&str>, outcome: PageOutcome) -> Self {
        Self {
            url: url.to_string(),
            page_title: page_title.map(str::to_string),
            outcome,
            page_type: PageType::AboutPage,
            scraped_at: Local::now().naive_local().trunc_subsecs(0),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Content { content } => Some(content),
            PageOutcome::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Error { error } => Some(error),
            PageOutcome::Content { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, PageOutcome::Error { .. })
    }
}

mod scraped_at_format {
    use super::SCRAPED_AT_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(SCRAPED_AT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, SCRAPED_AT_FORMAT).map_err(serde::de::Error::custom)
    }
}
