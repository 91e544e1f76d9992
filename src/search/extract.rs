//! Response decoding: raw body bytes → ordered `Book` records.
//!
//! Field handling is deliberately forgiving: a single broken entry is skipped,
//! only an empty or structurally broken document is a hard failure.

use serde_json::Value;
use tracing::debug;

use crate::base_system::json_extract::{pick_string, pick_string_list};
use crate::search::models::{Book, UNKNOWN_AUTHOR};

const KEY_ITEMS: &str = "items";
const KEY_VOLUME_INFO: &str = "volumeInfo";
const KEY_TITLE: &str = "title";
const KEY_AUTHORS: &str = "authors";
const KEY_INFO_LINK: &str = "infoLink";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty response body")]
    EmptyResponse,
    #[error("malformed response json")]
    MalformedJson,
}

/// Decode a volumes response. A missing `items` array is zero results, not an
/// error: the API omits the key entirely when nothing matches.
pub fn extract(body: &[u8]) -> Result<Vec<Book>, ParseError> {
    let text = std::str::from_utf8(body).map_err(|_| ParseError::MalformedJson)?;
    if text.trim().is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let root: Value = serde_json::from_str(text).map_err(|_| ParseError::MalformedJson)?;
    let root = root.as_object().ok_or(ParseError::MalformedJson)?;

    let mut books = Vec::new();
    let Some(items) = root.get(KEY_ITEMS).and_then(Value::as_array) else {
        return Ok(books);
    };

    for (idx, item) in items.iter().enumerate() {
        let Some(info) = item.get(KEY_VOLUME_INFO).and_then(Value::as_object) else {
            debug!("items[{idx}]: missing volumeInfo, entry skipped");
            continue;
        };
        let Some(title) = pick_string(info, &[KEY_TITLE]) else {
            debug!("items[{idx}]: missing title, entry skipped");
            continue;
        };
        let Some(info_url) = pick_string(info, &[KEY_INFO_LINK]) else {
            debug!("items[{idx}]: missing infoLink, entry skipped");
            continue;
        };

        // Absent or empty authors both mean the sentinel; the list keeps the
        // source order when present.
        let authors = pick_string_list(info, KEY_AUTHORS);
        let author = if authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            authors.join(", ")
        };

        books.push(Book {
            title,
            author,
            info_url,
        });
    }

    Ok(books)
}
