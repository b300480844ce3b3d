//! `movieverse` command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use movieverse_browser::{
    Browser, BrowserState,
    cli::{Cli, Command},
    interactive, view,
};
use movieverse_client::{
    ApiClient, ClientConfig, ConfigOverrides, config::default_config_path,
};
use movieverse_model::MovieId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `--json` output stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| default_config_path().filter(|path| path.is_file()));
    let config = ClientConfig::load(
        config_path.as_deref(),
        ConfigOverrides {
            api_url: cli.api_url.clone(),
            timeout: cli.timeout,
        },
    )
    .context("failed to resolve client configuration")?;
    let client = ApiClient::new(&config)?;
    let mut browser = Browser::new(client);

    match cli.command {
        Command::Popular => {
            browser.load_popular().await;
            print_list(browser.state(), cli.json)?;
        }
        Command::Search { title } => {
            browser.search(&title.join(" ")).await;
            print_list(browser.state(), cli.json)?;
        }
        Command::Random => {
            browser.surprise().await;
            print_list(browser.state(), cli.json)?;
        }
        Command::Show { id } => {
            browser.open_details(MovieId(id)).await;
            print_details(browser.state(), cli.json)?;
        }
        Command::Browse => interactive::run(&mut browser).await?,
    }

    Ok(())
}

fn print_list(state: &BrowserState, json: bool) -> Result<()> {
    if json {
        print_notice(state);
        println!("{}", serde_json::to_string_pretty(&state.movies)?);
    } else {
        print!("{}", view::render(state));
    }
    Ok(())
}

fn print_details(state: &BrowserState, json: bool) -> Result<()> {
    match (&state.selected, json) {
        (Some(movie), true) => {
            println!("{}", serde_json::to_string_pretty(movie)?)
        }
        (Some(movie), false) => print!("{}", view::render_details(movie)),
        (None, _) => print_notice(state),
    }
    Ok(())
}

fn print_notice(state: &BrowserState) {
    if let Some(notice) = &state.notice {
        eprintln!("! {notice}");
    }
}
