//! Plain stdin/stdout front-end.
//!
//! Presentation glue only: read a query, dispatch it, drain loader events for
//! the current request and print the projected states. All decisions about
//! what a result means live in the pipeline.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel as channel;

use crate::base_system::context::Config;
use crate::search::connectivity::TcpProbe;
use crate::search::fetch::HttpFetcher;
use crate::search::loader::{SearchEvent, SearchLoader};
use crate::search::models::ErrorKind;
use crate::search::query::QueryBuilder;
use crate::search::state::{SearchUiState, project};

// Generous upper bound over the fetcher's own connect+read timeouts.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

pub fn run(config: &Config, one_shot: Option<&str>) -> Result<()> {
    let (loader, events) = build_loader(config)?;

    if let Some(query) = one_shot {
        let query = query.trim();
        if query.is_empty() {
            println!("Nothing to search for.");
            return Ok(());
        }
        run_query(&loader, &events, query);
        return Ok(());
    }

    println!(
        "booksearch v{} - type a query and press Enter (q to quit).",
        env!("CARGO_PKG_VERSION")
    );

    loop {
        let Some(input) = read_line("search> ")? else {
            break;
        };
        let text = input.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("q") {
            break;
        }
        run_query(&loader, &events, text);
    }

    Ok(())
}

fn build_loader(config: &Config) -> Result<(SearchLoader, channel::Receiver<SearchEvent>)> {
    let builder = QueryBuilder::new(&config.api_endpoint);
    let gate = Arc::new(TcpProbe::new(
        &config.connectivity_probe,
        config.probe_timeout(),
    ));
    let fetcher = Arc::new(HttpFetcher::new()?);
    Ok(SearchLoader::new(builder, gate, fetcher))
}

/// Dispatch one query and render events until its terminal state.
fn run_query(loader: &SearchLoader, events: &channel::Receiver<SearchEvent>, query: &str) {
    let token = loader.dispatch(query);

    loop {
        let event = match events.recv_timeout(SETTLE_TIMEOUT) {
            Ok(event) => event,
            Err(_) => {
                println!("Search timed out. Try again.");
                return;
            }
        };
        // Anything from a superseded request is dropped unseen.
        if !loader.is_current(event.token()) {
            continue;
        }
        let terminal = matches!(event, SearchEvent::Finished { .. });
        render(project(event));
        if terminal && loader.current_token() == token {
            return;
        }
    }
}

fn render(state: SearchUiState) {
    match state {
        SearchUiState::ShowLoading => println!("Searching..."),
        SearchUiState::ShowResults(books) => {
            for (idx, book) in books.iter().enumerate() {
                println!("{:>2}. {} - {}", idx + 1, book.title, book.author);
                println!("    {}", book.info_url);
            }
        }
        SearchUiState::ShowEmptyMessage => println!("No books found."),
        SearchUiState::ShowNoConnectionMessage => println!("No internet connection."),
        SearchUiState::ShowErrorMessage(ErrorKind::Network) => {
            println!("Search failed: network problem. Try again.");
        }
        SearchUiState::ShowErrorMessage(ErrorKind::Parse) => {
            println!("Search failed: unexpected response from the server.");
        }
    }
}

/// `None` on EOF so a piped stdin terminates the loop cleanly.
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
