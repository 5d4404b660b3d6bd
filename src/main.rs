/*!
# Daybook - A Mood Journal

Command-line front end for the daybook journal. It lists a month of entries
under a calendar, shows single entries, writes new ones, and offers an
interactive month browser.

## Usage

```
daybook [OPTIONS] <COMMAND>

Commands:
  month   Print the calendar and entries of a month
  show    Print every detail of one entry
  new     Write a new entry
  browse  Browse months interactively

Options:
  -v, --verbose                  Print debug logs
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
  -h, --help                     Print help
  -V, --version                  Print version
```

## Configuration

- `DAYBOOK_API_URL`, `DAYBOOK_API_KEY`: the journal service (required)
- `DAYBOOK_TABLE`: table name (defaults to "journals")
- `DAYBOOK_WEEK_START`: `sunday` or `monday`
- `DAYBOOK_MONTH_NAV`: `reset` or `keep`
- `RUST_LOG`: log filter, overridden by `--verbose`
*/

use chrono::Local;
use daybook::cli::{parse_date, parse_month, parse_mood, parse_time, CliArgs, Command};
use daybook::config::Config;
use daybook::constants::{DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, VERBOSE_LOG_LEVEL};
use daybook::errors::AppResult;
use daybook::ops::{self, MonthOptions};
use daybook::render::render_card;
use daybook::store::EntryStore;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
fn init_logging(args: &CliArgs) {
    let filter = if args.verbose {
        EnvFilter::new(VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let result = if args.json_logs() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    // Obtain current date/time once at the beginning
    let now = Local::now().naive_local();
    let today = now.date();

    info!("Loading configuration");
    let config = Config::load()?;
    debug!("Configuration: {:?}", config);

    match args.command {
        Command::Month(month) => {
            let options = MonthOptions {
                month: parse_month(month.month.as_deref())?,
                search: month.search,
                mood: month.mood,
                date: month.date.as_deref().map(parse_date).transpose()?,
                today_only: month.today,
                sort_confidence: month.sort_confidence,
            };
            let store = config.store();
            let report = ops::month_report(&store, &config, &options, today)?;
            print!("{}", report);
        }
        Command::Show(show) => {
            let store = config.store();
            print!("{}", ops::show_entry(&store, &show.id)?);
        }
        Command::New(new) => {
            let feeling = parse_mood(&new.mood)?;
            let date = new.date.as_deref().map(parse_date).transpose()?;
            let time = new.time.as_deref().map(parse_time).transpose()?;
            let store = config.store();
            let saved = ops::create_entry(&store, feeling, &new.text, date, time, now)?;
            println!("Saved entry #{}", saved.id);
            print!("{}", render_card(&saved));
        }
        Command::Browse(browse) => {
            let month = parse_month(browse.month.as_deref())?;
            let store: Arc<dyn EntryStore> = Arc::new(config.store());
            ops::browse_month(store, &config, month, today)?;
        }
    }

    Ok(())
}

/// The main entry point for the daybook application.
///
/// Parses arguments, sets up logging inside a root span carrying a fresh
/// correlation id, and runs the chosen command. Errors are reported once,
/// here, and turn into a non-zero exit code.
fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(TRACING_ROOT_SPAN_NAME, correlation_id = %correlation_id);
    let _enter = root_span.enter();

    debug!("CLI arguments: {:?}", args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
