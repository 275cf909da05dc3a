//! fossnav CLI
//!
//! Command-line interface for the FOSS search navigator.
//! Runs the interactive terminal UI by default; the subcommands give
//! one-shot access to the same Search API.

use clap::{Parser, Subcommand};
use console::style;
use fossnav::api::auth;
use fossnav::{
    format_count, format_score, recommendations, AppConfig, HttpSearchApi, NavError, Repository,
    SearchApi, SearchController, SearchView, TrendingFeed,
};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// fossnav - discover open-source projects to contribute to
///
/// Searches repositories through the FOSS Search API, shows what is
/// trending and lists a curated set of recommendations.
#[derive(Parser)]
#[command(name = "fossnav")]
#[command(author = "fossnav Contributors")]
#[command(version)]
#[command(about = "FOSS search and contribution navigator", long_about = None)]
struct Cli {
    /// Search API base URL (overrides FOSSNAV_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,

    /// Search repositories once and print the results
    Search {
        /// Search text (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true, required = true)]
        query: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Maximum results to print
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show trending repositories
    Trending {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the curated recommendations
    Recommend {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in with GitHub through the backend
    Login {
        /// Ask the backend to start a fresh login
        #[arg(long)]
        force: bool,

        /// Print the login URL instead of opening a browser
        #[arg(long)]
        print: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = load_config(cli.api_url.as_deref()).and_then(|config| {
        // Logging goes to a file so it never fights the TUI for the terminal
        match fossnav::logging::init(&config) {
            Ok(_) => fossnav::logging::separator("fossnav starting"),
            Err(e) => eprintln!("{} logging disabled: {}", style("!").yellow().bold(), e),
        }

        match cli.command.unwrap_or(Commands::Tui) {
            Commands::Tui => cmd_tui(config),
            Commands::Search { query, json, limit } => {
                cmd_search(&config, &query.join(" "), json, limit)
            }
            Commands::Trending { json } => cmd_trending(&config, json),
            Commands::Recommend { json } => cmd_recommend(json),
            Commands::Login { force, print } => cmd_login(&config, force, print),
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "fossnav exiting with error");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn load_config(api_url: Option<&str>) -> fossnav::Result<AppConfig> {
    let config = AppConfig::from_env()?;
    match api_url {
        Some(url) => config.with_api_base(url),
        None => Ok(config),
    }
}

fn connect(config: &AppConfig) -> fossnav::Result<Arc<dyn SearchApi>> {
    Ok(Arc::new(HttpSearchApi::new(config)?))
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// TUI command implementation
fn cmd_tui(config: AppConfig) -> fossnav::Result<()> {
    let api = connect(&config)?;
    fossnav::tui::run(config, api)
}

/// Search command implementation
fn cmd_search(config: &AppConfig, query: &str, json: bool, limit: usize) -> fossnav::Result<()> {
    let api = connect(config)?;
    let mut controller = SearchController::from_config(api, config);
    let start = Instant::now();

    let pb = (!json).then(|| {
        spinner(format!(
            "Searching for {}",
            style(format!("'{}'", query)).yellow()
        ))
    });

    controller.submit(query);
    let timeout = config.request_timeout + Duration::from_secs(1);
    let finished = !controller.is_in_flight() || controller.wait_for_completion(timeout);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    if !finished {
        return Err(NavError::Timeout(timeout));
    }

    match controller.view() {
        SearchView::Failed(message) => Err(NavError::Reported(message.to_string())),
        SearchView::Idle => {
            println!("{} Nothing to search for", style("!").yellow().bold());
            Ok(())
        }
        SearchView::Loading => Err(NavError::Timeout(timeout)),
        SearchView::NoMatches => {
            if json {
                println!("[]");
            } else {
                println!("No projects found matching your search.");
            }
            Ok(())
        }
        SearchView::Results(repos) => {
            let shown = &repos[..repos.len().min(limit)];
            if json {
                print_json(shown)
            } else {
                println!(
                    "{} {} projects in {}",
                    style("✓").green().bold(),
                    style(repos.len()).green(),
                    style(HumanDuration(start.elapsed())).cyan()
                );
                print_repositories(shown);
                if shown.len() < repos.len() {
                    println!(
                        "  {}",
                        style(format!("... and {} more (use --limit)", repos.len() - shown.len()))
                            .dim()
                    );
                }
                Ok(())
            }
        }
    }
}

/// Trending command implementation
fn cmd_trending(config: &AppConfig, json: bool) -> fossnav::Result<()> {
    let api = connect(config)?;
    let mut feed = TrendingFeed::new(api);
    // The CLI reports failures itself; toasts only matter to the TUI
    let mut toasts = fossnav::search::Notifications::new(config.toast_ttl);

    let pb = (!json).then(|| spinner("Loading trending repositories".to_string()));
    feed.reload();
    let timeout = config.request_timeout + Duration::from_secs(1);
    let finished = feed.wait(&mut toasts, timeout);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    if !finished {
        return Err(NavError::Timeout(timeout));
    }
    if let Some(error) = feed.error {
        return Err(NavError::Reported(error));
    }

    if json {
        print_json(&feed.items)
    } else {
        println!(
            "{} {} trending repositories",
            style("→").cyan().bold(),
            style(feed.items.len()).green()
        );
        print_repositories(&feed.items);
        Ok(())
    }
}

/// Recommend command implementation
fn cmd_recommend(json: bool) -> fossnav::Result<()> {
    let repos = recommendations()?;
    if json {
        print_json(&repos)
    } else {
        println!(
            "{} Explore some recommended open-source projects",
            style("→").cyan().bold()
        );
        print_repositories(&repos);
        Ok(())
    }
}

/// Login command implementation
fn cmd_login(config: &AppConfig, force: bool, print: bool) -> fossnav::Result<()> {
    let url = if print {
        auth::login_url(&config.api_base, force)?
    } else {
        auth::open_login(&config.api_base, force)?
    };

    if print {
        println!("{}", url);
    } else {
        println!(
            "{} Opened {} in your browser",
            style("✓").green().bold(),
            style(&url).cyan()
        );
        println!(
            "  {} {}",
            style("Callback:").dim(),
            auth::callback_url(&config.api_base)?
        );
    }
    Ok(())
}

fn print_json(repos: &[Repository]) -> fossnav::Result<()> {
    println!("{}", serde_json::to_string_pretty(repos)?);
    Ok(())
}

fn print_repositories(repos: &[Repository]) {
    println!();
    for (i, repo) in repos.iter().enumerate() {
        println!(
            "{} {}  {}",
            style(format!("{:3}.", i + 1)).dim(),
            style(&repo.title).cyan().bold(),
            style(&repo.url).dim()
        );
        println!("     {}", repo.description_or_placeholder());

        let mut stats = format!(
            "{} {}  {} {}  {} {}",
            style("★").yellow(),
            format_count(repo.stars),
            style("forks").dim(),
            format_count(repo.forks),
            style("watchers").dim(),
            format_count(repo.watchers)
        );
        if repo.skill_match_score.is_some() {
            stats.push_str(&format!(
                "  {} {}",
                style("match").dim(),
                style(format_score(repo.skill_match_score)).green()
            ));
        }
        println!("     {}", stats);

        if !repo.tags.is_empty() {
            println!("     {}", style(repo.tag_line()).magenta());
        }
        println!();
    }
}
