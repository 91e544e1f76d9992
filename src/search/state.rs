//! Projection of loader events into the presentation vocabulary.
//!
//! No logic of its own; it exists so the renderer never touches
//! `SearchResult` or raw errors.

use crate::search::loader::SearchEvent;
use crate::search::models::{Book, ErrorKind, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchUiState {
    ShowLoading,
    ShowResults(Vec<Book>),
    ShowEmptyMessage,
    ShowNoConnectionMessage,
    ShowErrorMessage(ErrorKind),
}

pub fn project(event: SearchEvent) -> SearchUiState {
    match event {
        SearchEvent::Started { .. } => SearchUiState::ShowLoading,
        SearchEvent::Finished { result, .. } => match result {
            SearchResult::Success(books) => SearchUiState::ShowResults(books),
            SearchResult::Empty => SearchUiState::ShowEmptyMessage,
            SearchResult::NoConnection => SearchUiState::ShowNoConnectionMessage,
            SearchResult::Failure(kind) => SearchUiState::ShowErrorMessage(kind),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_to_one_mapping() {
        let book = Book {
            title: "T".to_string(),
            author: "A".to_string(),
            info_url: "https://books.example/t".to_string(),
        };

        assert_eq!(
            project(SearchEvent::Started { token: 1 }),
            SearchUiState::ShowLoading
        );
        assert_eq!(
            project(SearchEvent::Finished {
                token: 1,
                result: SearchResult::Success(vec![book.clone()]),
            }),
            SearchUiState::ShowResults(vec![book])
        );
        assert_eq!(
            project(SearchEvent::Finished {
                token: 1,
                result: SearchResult::Empty,
            }),
            SearchUiState::ShowEmptyMessage
        );
        assert_eq!(
            project(SearchEvent::Finished {
                token: 1,
                result: SearchResult::NoConnection,
            }),
            SearchUiState::ShowNoConnectionMessage
        );
        assert_eq!(
            project(SearchEvent::Finished {
                token: 1,
                result: SearchResult::Failure(ErrorKind::Parse),
            }),
            SearchUiState::ShowErrorMessage(ErrorKind::Parse)
        );
    }
}
