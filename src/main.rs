//! Most Popular - Main Entry Point
//!
//! A terminal front end for the NYT Most Popular API. Renders every state
//! change to stdout and switches category/window from stdin commands.

use anyhow::{anyhow, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use most_popular::config::load_config;
use most_popular::{
    ArticlesSnapshot, ArticlesStore, Category, FetchStrategy, MostPopularClient, TimeWindow,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Category to start with (viewed, emailed, shared, shared:facebook)
    #[arg(long)]
    category: Option<Category>,

    /// Time window to start with in days (1, 7, 30)
    #[arg(long)]
    window: Option<TimeWindow>,

    /// Print the first settled result and exit
    #[arg(long)]
    once: bool,
}

/// What a line typed on stdin asks for
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Select(FetchStrategy),
    Open(usize),
    Help,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();
    let config = load_config(Some(&args.config))?;

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting most-popular");
    info!("Configuration file: {}", args.config);

    let mut strategy = config.settings.initial_strategy()?;
    if let Some(category) = args.category {
        strategy = FetchStrategy::new(category, strategy.window());
    }
    if let Some(window) = args.window {
        strategy = strategy.with_window(window);
    }

    let client = MostPopularClient::from_config(&config)?;
    let (store, _task) = ArticlesStore::spawn(client, strategy);
    let mut snapshots = store.subscribe()?;

    if args.once {
        while let Some(snapshot) = snapshots.recv().await {
            if !snapshot.is_loading {
                render(&snapshot);
                return match snapshot.error_message {
                    Some(message) => Err(anyhow!(message)),
                    None => Ok(()),
                };
            }
        }
        return Err(anyhow!("articles store stopped unexpectedly"));
    }

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut current: Option<ArticlesSnapshot> = None;

    loop {
        tokio::select! {
            snapshot = snapshots.recv() => {
                let Some(snapshot) = snapshot else { break };
                render(&snapshot);
                current = Some(snapshot);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let active = current
                    .as_ref()
                    .map(|snapshot| snapshot.strategy)
                    .unwrap_or(strategy);
                match parse_input(&line, active) {
                    Ok(None) => {}
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => print_help(),
                    Ok(Some(Input::Select(next))) if !should_fetch(next, current.as_ref()) => {
                        println!("Already showing {}", next);
                    }
                    Ok(Some(Input::Select(next))) => store.set_strategy_and_fetch(next)?,
                    Ok(Some(Input::Open(index))) => open_article(current.as_ref(), index),
                    Err(message) => println!("{}", message),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal, cleaning up...");
                break;
            }
        }
    }

    Ok(())
}

/// Parse one stdin line against the currently active strategy
///
/// Accepts a category, a window, or both in either order, plus
/// `open <n>`, `help` and `quit`.
fn parse_input(line: &str, active: FetchStrategy) -> std::result::Result<Option<Input>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(None),
        ["q" | "quit" | "exit"] => Ok(Some(Input::Quit)),
        ["h" | "help" | "?"] => Ok(Some(Input::Help)),
        ["open", index] => index
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| Some(Input::Open(n)))
            .ok_or_else(|| format!("not an article number: {}", index)),
        words if words.len() <= 2 => {
            let mut category = active.category();
            let mut window = active.window();
            for word in words {
                if let Ok(parsed) = word.parse::<TimeWindow>() {
                    window = parsed;
                } else {
                    category = word.parse::<Category>()?;
                }
            }
            Ok(Some(Input::Select(FetchStrategy::new(category, window))))
        }
        _ => Err(format!("unrecognised command: {}", line.trim())),
    }
}

/// Whether selecting `next` has to go to the network
///
/// Only a settled, error-free view of the same strategy is left as is. A
/// failed or still loading view is fetched again.
fn should_fetch(next: FetchStrategy, current: Option<&ArticlesSnapshot>) -> bool {
    match current {
        Some(snapshot) => {
            next != snapshot.strategy || snapshot.is_loading || snapshot.error_message.is_some()
        }
        None => true,
    }
}

fn print_help() {
    let categories: Vec<_> = Category::ALL_KINDS.iter().map(|c| c.to_string()).collect();
    let windows: Vec<_> = TimeWindow::ALL.iter().map(|w| w.to_string()).collect();
    println!(
        "Commands: <category> [window] | <window> | open <n> | help | quit\n  \
         categories: {}\n  windows: {}",
        categories.join(", "),
        windows.join(", ")
    );
}

fn render(snapshot: &ArticlesSnapshot) {
    println!();
    println!("== {} ==", snapshot.strategy);
    if snapshot.is_loading {
        println!("Loading...");
    }
    if let Some(message) = &snapshot.error_message {
        println!("{}", message);
    }
    if snapshot.is_loading {
        return;
    }

    for (index, article) in snapshot.articles.iter().enumerate() {
        println!("{:>3}. {}", index + 1, article.title);
        let details: Vec<&str> = [article.byline.as_deref(), article.published_date.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !details.is_empty() {
            println!("     {}", details.join(" | "));
        }
    }
    if let Some(updated_at) = snapshot.updated_at {
        println!("(updated {})", updated_at.format("%H:%M:%S UTC"));
    }
}

/// Hand a single article off to the detail view, here just its link
fn open_article(snapshot: Option<&ArticlesSnapshot>, index: usize) {
    let Some(article) = snapshot.and_then(|s| s.articles.get(index - 1)) else {
        println!("No article {}", index);
        return;
    };
    match article.link() {
        Ok(url) => println!("{}\n  {}", article.title, url),
        Err(err) => println!("Error: {}", err),
    }
}
