//! Interactive month browser.
//!
//! Commands are read line by line while month fetches run on tokio's
//! blocking pool. Fetch results come back over a channel and go through
//! [`JournalView::complete_fetch`], so a slow response for a month the user
//! has already left is discarded instead of overwriting the newer one.

use crate::calendar::YearMonth;
use crate::config::Config;
use crate::entry::JournalEntry;
use crate::errors::{AppResult, PersistenceError};
use crate::navigation::Direction;
use crate::render::render_view;
use crate::store::EntryStore;
use crate::view::{FetchOutcome, FetchTicket, JournalView};
use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, Span};

const HELP: &str = "\
Commands:
  n            next month
  p            previous month
  s DAY        select a day of this month (or s YYYY-MM-DD)
  /TEXT        search; a bare / clears the search
  m MOOD       filter by feeling; a bare m clears it
  c            toggle ranking by confidence
  a            show all entries of the month
  t            jump to today
  r            retry the last failed fetch
  h            this help
  q            quit";

type FetchResult = (FetchTicket, Result<Vec<JournalEntry>, PersistenceError>);

/// One line of browser input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    SelectDay(u32),
    SelectDate(NaiveDate),
    Search(String),
    ClearSearch,
    Mood(Option<String>),
    ToggleSort,
    ShowAll,
    Today,
    Retry,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parses one input line.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::ops::BrowseCommand;
    ///
    /// assert_eq!(BrowseCommand::parse("s 12"), Ok(BrowseCommand::SelectDay(12)));
    /// assert_eq!(BrowseCommand::parse("/rain"), Ok(BrowseCommand::Search("rain".to_string())));
    /// assert!(BrowseCommand::parse("x").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            let query = query.trim();
            return Ok(if query.is_empty() {
                BrowseCommand::ClearSearch
            } else {
                BrowseCommand::Search(query.to_string())
            });
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match (head, rest) {
            ("n", "") => Ok(BrowseCommand::Next),
            ("p", "") => Ok(BrowseCommand::Previous),
            ("s", "") => Err("Usage: s DAY".to_string()),
            ("s", arg) => match arg.parse::<u32>() {
                Ok(day) => Ok(BrowseCommand::SelectDay(day)),
                Err(_) => crate::cli::parse_date(arg)
                    .map(BrowseCommand::SelectDate)
                    .map_err(|e| e.to_string()),
            },
            ("m", "") => Ok(BrowseCommand::Mood(None)),
            ("m", mood) => Ok(BrowseCommand::Mood(Some(mood.to_string()))),
            ("c", "") => Ok(BrowseCommand::ToggleSort),
            ("a", "") => Ok(BrowseCommand::ShowAll),
            ("t", "") => Ok(BrowseCommand::Today),
            ("r", "") => Ok(BrowseCommand::Retry),
            ("h", "") | ("?", "") | ("help", "") => Ok(BrowseCommand::Help),
            ("q", "") | ("quit", "") => Ok(BrowseCommand::Quit),
            _ => Err(format!("Unknown command '{}' (h for help)", line)),
        }
    }

    /// Applies the command to `view`, returning the fetch it started, if any.
    pub fn apply(
        self,
        view: &mut JournalView,
        today: NaiveDate,
    ) -> Result<Option<FetchTicket>, String> {
        let ticket = match self {
            BrowseCommand::Next => Some(view.navigate_month(Direction::Next)),
            BrowseCommand::Previous => Some(view.navigate_month(Direction::Previous)),
            BrowseCommand::SelectDay(day) => {
                let month = view.reference_month();
                let date = month
                    .date(day)
                    .ok_or_else(|| format!("{} has no day {}", month, day))?;
                view.select_date(date)
            }
            BrowseCommand::SelectDate(date) => view.select_date(date),
            BrowseCommand::Search(query) => {
                view.set_query(query);
                None
            }
            BrowseCommand::ClearSearch => {
                view.clear_query();
                None
            }
            BrowseCommand::Mood(mood) => {
                view.select_mood(mood);
                None
            }
            BrowseCommand::ToggleSort => {
                view.toggle_confidence_sort();
                None
            }
            BrowseCommand::ShowAll => {
                view.show_all();
                None
            }
            BrowseCommand::Today => view.show_today(today),
            BrowseCommand::Retry => match view.retry() {
                Some(ticket) => Some(ticket),
                None => return Err("Nothing to retry".to_string()),
            },
            BrowseCommand::Help | BrowseCommand::Quit => None,
        };
        Ok(ticket)
    }
}

fn spawn_fetch(
    store: &Arc<dyn EntryStore>,
    results: &mpsc::UnboundedSender<FetchResult>,
    ticket: FetchTicket,
) {
    let store = Arc::clone(store);
    let results = results.clone();
    let span = Span::current();
    tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        debug!("Fetch #{} started for {}", ticket.token, ticket.month);
        let result = store.month_entries(ticket.month);
        // The browser may have quit already.
        let _ = results.send((ticket, result));
    });
}

fn render<W: Write>(out: &mut W, view: &JournalView, today: NaiveDate) -> AppResult<()> {
    writeln!(out, "\n{}", render_view(view, today))?;
    if view.is_loading() {
        writeln!(out, "Loading {}...", view.reference_month())?;
    }
    out.flush()?;
    Ok(())
}

/// Runs the browser until `q` or the end of `input`.
///
/// At the end of input the browser waits for the fetch in flight, so piped
/// command scripts see their final month.
pub async fn run_browser<R, W>(
    store: Arc<dyn EntryStore>,
    mut view: JournalView,
    input: R,
    out: &mut W,
    today: NaiveDate,
) -> AppResult<JournalView>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<FetchResult>();
    let mut lines = input.lines();
    let mut input_open = true;

    writeln!(out, "{}", HELP)?;
    spawn_fetch(&store, &results_tx, view.begin_fetch());
    render(out, &view, today)?;

    loop {
        if !input_open && !view.is_loading() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    input_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match BrowseCommand::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        writeln!(out, "{}", message)?;
                        continue;
                    }
                };
                debug!("Command: {:?}", command);

                match command {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Help => writeln!(out, "{}", HELP)?,
                    command => match command.apply(&mut view, today) {
                        Ok(ticket) => {
                            if let Some(ticket) = ticket {
                                spawn_fetch(&store, &results_tx, ticket);
                            }
                            render(out, &view, today)?;
                        }
                        Err(message) => writeln!(out, "{}", message)?,
                    },
                }
            }
            Some((ticket, result)) = results_rx.recv() => {
                if view.complete_fetch(ticket, result) != FetchOutcome::Stale {
                    render(out, &view, today)?;
                }
            }
            else => break,
        }
    }

    info!("Browser closed on {}", view.reference_month());
    Ok(view)
}

/// Opens the interactive browser on stdin and stdout.
pub fn browse_month(
    store: Arc<dyn EntryStore>,
    config: &Config,
    month: Option<YearMonth>,
    today: NaiveDate,
) -> AppResult<()> {
    let view = match month {
        Some(month) => JournalView::at_month(month, config.week_start, config.month_nav),
        None => JournalView::new(today, config.week_start, config.month_nav),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    runtime.block_on(run_browser(Arc::clone(&store), view, input, &mut stdout, today))?;
    // Blocking HTTP clients must not be dropped on a runtime thread.
    drop(runtime);
    drop(store);
    Ok(())
}
