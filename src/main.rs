//! hacker-stories CLI
//!
//! Interactive terminal UI by default, plus one-shot commands for scripting.

use clap::{Parser, Subcommand};
use console::style;
use hacker_stories::lifecycle::StoriesAction;
use hacker_stories::{
    logging, open_store, search_once, AppConfig, HttpFetcher, PersistentMirror, StoriesState,
    Story,
};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// hacker-stories - search Hacker News from the terminal
///
/// Remembers the last search term between runs.
#[derive(Parser)]
#[command(name = "hacker-stories")]
#[command(author = "Hacker Stories Contributors")]
#[command(version)]
#[command(about = "Search Hacker News stories", long_about = None)]
struct Cli {
    /// Search endpoint the encoded term is appended to
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Key-value store file holding the search term
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "5")]
    timeout_secs: u64,

    /// Log file for the interactive front-ends
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui {
        /// Do not focus the search input on start
        #[arg(long)]
        no_focus: bool,

        /// Start from the bundled demo stories instead of fetching
        #[arg(long)]
        demo: bool,
    },

    /// Fetch once and print the stories
    Search {
        /// Search term (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        term: String,

        /// Print the stories as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or reset the remembered search term
    Term {
        /// Reset to the initial term
        #[arg(long)]
        clear: bool,
    },

    /// Feed named actions through the story reducer, starting from the demo stories
    Replay {
        /// STORIES_FETCH_INIT, STORIES_FETCH_SUCCESS, STORIES_FETCH_FAILURE or REMOVE_STORY:<id>
        #[arg(required = true)]
        actions: Vec<String>,
    },

    /// Desktop window
    #[cfg(feature = "gui")]
    Gui {
        /// Do not focus the search input on start
        #[arg(long)]
        no_focus: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let mut config = AppConfig::default();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(log_file) = cli.log_file {
        config.log_path = log_file;
    }
    config.request_timeout = Duration::from_secs(cli.timeout_secs.max(1));

    let command = cli.command.unwrap_or(Commands::Tui {
        no_focus: false,
        demo: false,
    });

    let result = match command {
        Commands::Tui { no_focus, demo } => {
            config.auto_focus = !no_focus;
            config.demo = demo;
            cmd_tui(&config)
        }

        Commands::Search { term, json } => cmd_search(&config, &term, json),

        Commands::Term { clear } => cmd_term(&config, clear),

        Commands::Replay { actions } => cmd_replay(&actions),

        #[cfg(feature = "gui")]
        Commands::Gui { no_focus } => {
            config.auto_focus = !no_focus;
            cmd_gui(config)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Interactive terminal UI
fn cmd_tui(config: &AppConfig) -> hacker_stories::Result<()> {
    logging::init_file(&config.log_path)?;
    tracing::info!(
        endpoint = %config.endpoint,
        store = %config.store_path.display(),
        "starting TUI"
    );

    let store = open_store(config);
    let fetcher = Arc::new(HttpFetcher::new(config.request_timeout)?);
    hacker_stories::tui::run(store, config, fetcher)
}

#[cfg(feature = "gui")]
fn cmd_gui(config: AppConfig) -> hacker_stories::Result<()> {
    logging::init_file(&config.log_path)?;
    let fetcher = Arc::new(HttpFetcher::new(config.request_timeout)?);
    hacker_stories::gui::run(config, fetcher)
}

/// One-shot search
fn cmd_search(config: &AppConfig, term: &str, json: bool) -> hacker_stories::Result<()> {
    logging::init_stderr();

    let fetcher = Arc::new(HttpFetcher::new(config.request_timeout)?);
    let start = Instant::now();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Searching for '{}'...", term));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = search_once(
        config,
        fetcher,
        term,
        config.request_timeout + Duration::from_secs(1),
    );
    spinner.finish_and_clear();
    let stories = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stories)?);
        return Ok(());
    }

    println!(
        "{} {} stories for '{}' in {}",
        style("✓").green().bold(),
        style(stories.len()).green(),
        style(term).yellow(),
        style(HumanDuration(start.elapsed())).cyan()
    );
    println!();
    for (i, story) in stories.iter().enumerate() {
        print_story(i + 1, story);
    }

    Ok(())
}

fn print_story(position: usize, story: &Story) {
    println!("{:>3}. {}", position, style(&story.title).bold());
    if !story.link().is_empty() {
        println!("     {}", style(story.link()).dim().underlined());
    }
    println!(
        "     {} | {} comments | {} points",
        style(&story.author).cyan(),
        story.num_comments,
        style(story.points).yellow()
    );
}

/// Show or reset the remembered search term
fn cmd_term(config: &AppConfig, clear: bool) -> hacker_stories::Result<()> {
    logging::init_stderr();

    let store = hacker_stories::FileStore::open(&config.store_path)?;
    let mut mirror = PersistentMirror::new(
        store,
        config.storage_key.as_str(),
        config.initial_term.as_str(),
    );
    if clear {
        mirror.set(config.initial_term.as_str());
        mirror.store().flush()?;
        println!(
            "{} search term reset to '{}'",
            style("✓").green().bold(),
            style(mirror.value()).yellow()
        );
    } else {
        println!("{}", mirror.value());
    }
    Ok(())
}

/// Feed named actions through the reducer and print the final state
fn cmd_replay(actions: &[String]) -> hacker_stories::Result<()> {
    let mut state = StoriesState::with_stories(Story::seed());
    for name in actions {
        let action = StoriesAction::from_name(name)?;
        state.apply(action);
    }

    let out = serde_json::json!({
        "data": state.data,
        "isLoading": state.is_loading(),
        "isError": state.is_error(),
        "phase": state.phase,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
