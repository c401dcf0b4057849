use crate::error::IndexerError;
use crate::registry::ItemRegistry;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InvalidFormat,
}

/// Answer to an ingestion source for one candidate string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub accepted: bool,
    /// Canonical text of the stored item.
    pub item: Option<String>,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
}

impl Submission {
    fn accepted(item: &str, created: bool) -> Self {
        Self {
            accepted: true,
            item: Some(item.to_string()),
            created,
            reason: None,
        }
    }

    fn rejected(reason: RejectReason) -> Self {
        Self {
            accepted: false,
            item: None,
            created: false,
            reason: Some(reason),
        }
    }
}

impl ItemRegistry {
    /// Ingestion entry point: never fails, rejections carry a reason.
    pub fn submit(&mut self, raw_text: &str, origin: &str) -> Submission {
        match self.add(raw_text, origin) {
            Ok((item, created)) => Submission::accepted(item.text(), created),
            Err(IndexerError::Validation { text, reason }) => {
                log::warn!("Rejected {text:?} from {origin}: {reason}");
                Submission::rejected(RejectReason::InvalidFormat)
            }
            Err(err) => {
                log::warn!("Rejected {raw_text:?} from {origin}: {err}");
                Submission::rejected(RejectReason::InvalidFormat)
            }
        }
    }
}

/// Split a bulk word list (commas, semicolons, whitespace, punctuation) into
/// candidate words. Tokens are not validated here.
pub fn tokenize_word_list(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// Split a phrase list: one candidate per line or per comma/semicolon entry.
pub fn tokenize_phrase_list(text: &str) -> Vec<&str> {
    text.split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
