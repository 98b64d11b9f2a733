//! Interactive terminal driver for a CineVision session.
//!
//! Plain lines edit the search query, with the real debounce running
//! underneath. Lines starting with ':' simulate the other inputs; type
//! `:help` for the list.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinevision_core::driver::Driver;
use cinevision_core::input::Key;
use cinevision_core::{Engine, EngineConfig, Message, Snapshot, TmdbProvider};

#[derive(Parser, Debug)]
#[command(
    name = "cvctl",
    version,
    about = "Drive a CineVision search session from the terminal"
)]
struct Cli {
    /// Simulated viewport width in px; picks the carousel span.
    #[arg(long, default_value_t = 1280.0)]
    viewport: f32,

    /// TMDB API key. Falls back to the TMDB_API_KEY environment variable.
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cvctl=info,cinevision_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let api_key = match cli.api_key {
        Some(key) => key,
        None => std::env::var("TMDB_API_KEY")
            .context("TMDB_API_KEY is not set and --api-key was not given")?,
    };

    let provider = Arc::new(TmdbProvider::new(api_key));
    let driver = Driver::spawn(Engine::new(EngineConfig::default()), provider, |key| {
        println!("-> would open the detail page for {key}");
    });
    driver.send(Message::ViewportResized {
        width: cli.viewport,
    });
    driver.send(Message::QueryFocusChanged(true));
    info!("Session started with a {}px viewport", cli.viewport);

    println!("Type to search; ':help' lists the input commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let settle = if let Some(command) = line.strip_prefix(':') {
            if !handle_command(&driver, command)? {
                break;
            }
            Duration::from_millis(150)
        } else {
            driver.send(Message::QueryEdited(line));
            // Wait out the debounce and a round-trip before rendering.
            Duration::from_millis(700)
        };
        tokio::time::sleep(settle).await;
        render(&driver.latest());
    }

    Ok(())
}

/// Apply one ':' command. Returns false when the session should end.
fn handle_command(driver: &Driver, command: &str) -> anyhow::Result<bool> {
    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or("") {
        "left" => {
            driver.send(Message::KeyPressed(Key::ArrowLeft));
        }
        "right" => {
            driver.send(Message::KeyPressed(Key::ArrowRight));
        }
        "enter" => {
            driver.send(Message::KeyPressed(Key::Enter));
        }
        "esc" => {
            driver.send(Message::KeyPressed(Key::Escape));
        }
        "wheel" => {
            let delta: f32 = parts.next().and_then(|v| v.parse().ok()).unwrap_or(120.0);
            driver.send(Message::Wheel {
                delta_x: 0.0,
                delta_y: delta,
            });
        }
        "drag" => {
            let travel: f32 = parts.next().and_then(|v| v.parse().ok()).unwrap_or(-80.0);
            driver.send(Message::PointerDown { x: 0.0 });
            driver.send(Message::PointerMoved { x: travel });
            driver.send(Message::PointerUp);
        }
        "more" => {
            driver.send(Message::LoadMore);
        }
        "fav" => {
            driver.send(Message::ToggleFavorite);
        }
        "open" => {
            let index = driver.latest().focus;
            driver.send(Message::ItemActivated { index });
        }
        "pick" => {
            if let Some(index) = parts.next().and_then(|v| v.parse().ok()) {
                driver.send(Message::ItemActivated { index });
            } else {
                println!("usage: :pick <index>");
            }
        }
        "view" => {
            if let Some(width) = parts.next().and_then(|v| v.parse().ok()) {
                driver.send(Message::ViewportResized { width });
            } else {
                println!("usage: :view <width-px>");
            }
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&driver.latest())?);
        }
        "help" => print_help(),
        "quit" | "q" => return Ok(false),
        other => println!("unknown command ':{other}'; try :help"),
    }
    Ok(true)
}

fn print_help() {
    println!("  <text>        edit the query (searches after the debounce)");
    println!("  :enter        commit the query immediately");
    println!("  :esc          clear the session");
    println!("  :left :right  step the carousel");
    println!("  :wheel [d]    scroll by a wheel delta (default 120)");
    println!("  :drag [dx]    swipe by dx px (default -80, leftward)");
    println!("  :more         load the next result page");
    println!("  :fav          toggle the focused item in favorites");
    println!("  :open         activate the focused item");
    println!("  :pick <i>     activate the item at index i");
    println!("  :view <w>     resize the viewport");
    println!("  :json         dump the current snapshot as JSON");
    println!("  :quit         exit");
}

fn render(snapshot: &Snapshot) {
    if let Some(error) = &snapshot.error {
        println!("! {error}");
    }
    if snapshot.is_searching {
        println!("searching...");
    }
    if snapshot.items.is_empty() {
        println!("(no results)");
        return;
    }
    if let Some(url) = &snapshot.backdrop_url {
        println!("backdrop {url} @ {:.2}", snapshot.backdrop_opacity);
    }
    for card in &snapshot.window {
        let item = &snapshot.items[card.index];
        let cursor = if card.is_focused() { '>' } else { ' ' };
        let star = if snapshot.favorites.contains(&item.key) {
            '*'
        } else {
            ' '
        };
        println!(
            "{cursor}{star} [{:+}] {} ({}) {:.1}",
            card.offset,
            item.title,
            item.year().unwrap_or("----"),
            item.rating,
        );
    }
    if let Some(details) = &snapshot.focused_details {
        if let Some(genres) = details.genre_line() {
            println!("   {genres}");
        }
        if let Some(minutes) = details.runtime_minutes {
            println!("   {minutes} min");
        }
        if !details.cast.is_empty() {
            let names: Vec<&str> = details
                .cast
                .iter()
                .map(|member| member.name.as_str())
                .collect();
            println!("   with {}", names.join(", "));
        }
    }
    println!(
        "page {}/{}, {} results",
        snapshot.page,
        snapshot.total_pages,
        snapshot.items.len()
    );
}
