//! Prompt loop behind `movieverse browse`.

use anyhow::Result;
use dialoguer::Input;
use movieverse_client::MovieBackend;

use crate::session::Browser;
use crate::view;

pub const HELP: &str = "\
Commands:
  search <title>   recommendations similar to <title>
  open <n>         details for card number <n>
  close            close the details overlay
  popular          back to popular movies
  random           a random pick
  help             this text
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Popular,
    Search(String),
    Open(usize),
    Close,
    Random,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "help" | "?" => Ok(BrowseCommand::Help),
        "popular" => Ok(BrowseCommand::Popular),
        "search" | "s" => Ok(BrowseCommand::Search(rest.to_string())),
        "open" | "o" => rest
            .parse()
            .map(BrowseCommand::Open)
            .map_err(|_| format!("'{rest}' is not a card number")),
        "close" | "c" => Ok(BrowseCommand::Close),
        "random" | "r" => Ok(BrowseCommand::Random),
        "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
        other => Err(format!("Unknown command '{other}'. Type 'help'.")),
    }
}

pub async fn run<B: MovieBackend>(browser: &mut Browser<B>) -> Result<()> {
    browser.load_popular().await;
    println!("{}", view::render(browser.state()));
    println!("{HELP}");

    loop {
        let line: String = Input::new()
            .with_prompt("movieverse")
            .allow_empty(true)
            .interact_text()?;

        match parse_command(&line) {
            Ok(BrowseCommand::Quit) => break,
            Ok(BrowseCommand::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(BrowseCommand::Popular) => browser.load_popular().await,
            Ok(BrowseCommand::Search(query)) => browser.search(&query).await,
            Ok(BrowseCommand::Open(position)) => {
                browser.open_card(position).await
            }
            Ok(BrowseCommand::Close) => browser.close_details(),
            Ok(BrowseCommand::Random) => browser.surprise().await,
            Err(message) => {
                println!("{message}");
                continue;
            }
        }
        println!("{}", view::render(browser.state()));
    }
    Ok(())
}
