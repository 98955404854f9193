//! `bitmap` -- command-line access to the Bitmap storefront.
//!
//! Lists and searches the game catalog (Hangul, Chosung and QWERTY-typed
//! Korean queries all work), shows a single game, prints the EULA and the
//! video listing.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                        | Description                 |
//! |------------------------|----------|--------------------------------|-----------------------------|
//! | `BITMAP_API_URL`       | no       | `https://api.prodbybitmap.com` | API origin                  |
//! | `BITMAP_API_TOKEN`     | no       | --                             | Bearer token                |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                           | Per-request timeout         |
//! | `BITMAP_LOCALE`        | no       | `ko`                           | Locale for localized text   |

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bitmap_client::api::BitmapApi;
use bitmap_client::config::ClientConfig;
use bitmap_client::flows::GameCatalog;
use bitmap_core::game::{self, Game};
use bitmap_core::locale::Locale;

#[derive(Parser, Debug)]
#[command(name = "bitmap", author, version, about, long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List games, optionally filtered by a search query
    Games {
        /// Title, developer or publisher; Chosung and QWERTY keystrokes work too
        query: Option<String>,
    },
    /// Show one game
    Game {
        id: i64,
    },
    /// Print the end-user license agreement
    Eula {
        /// ko or en (defaults to BITMAP_LOCALE)
        #[arg(long)]
        locale: Option<String>,
    },
    /// List storefront videos
    Videos,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "bitmap=debug,bitmap_client=debug"
    } else {
        "bitmap=info,bitmap_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    tracing::debug!(api_url = %config.api_url, locale = %config.locale, "Loaded configuration");
    let api = BitmapApi::from_config(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Games { query } => {
            let mut catalog = GameCatalog::new(Arc::new(api));
            catalog.refresh().await.context("Failed to fetch games")?;
            let games = catalog.search(query.as_deref().unwrap_or_default());
            if games.is_empty() {
                println!("No games found.");
            }
            for game in games {
                println!("{}", game_line(game, config.locale));
            }
        }
        Commands::Game { id } => {
            let game = api
                .get_game(id)
                .await
                .with_context(|| format!("Failed to fetch game {id}"))?;
            println!("{}", game_details(&game, config.locale));
        }
        Commands::Eula { locale } => {
            let locale = match locale {
                Some(raw) => Locale::parse(&raw)?,
                None => config.locale,
            };
            let eula = api.eula().await.context("Failed to fetch EULA")?;
            println!("{}", eula.get(locale));
        }
        Commands::Videos => {
            let videos = api.videos().await.context("Failed to fetch videos")?;
            for video in videos {
                println!("{}  {}", video.title, video.watch_url());
            }
        }
    }

    Ok(())
}

fn platforms(game: &Game) -> String {
    let content = &game.content;
    [
        (content.supports_windows, "Windows"),
        (content.supports_mac, "Mac"),
        (content.supports_mobile, "Mobile"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(", ")
}

fn game_line(game: &Game, locale: Locale) -> String {
    let content = &game.content;
    let mut line = format!("{:>5}  {}", game.id, content.title);
    if !content.developer.is_empty() {
        line.push_str(&format!(" / {}", content.developer));
    }
    let genre = content.genre.get(locale);
    if !genre.is_empty() {
        line.push_str(&format!("  [{genre}]"));
    }
    line
}

fn game_details(game: &Game, locale: Locale) -> String {
    let content = &game.content;
    let mut out = vec![format!("{} (#{}, {})", content.title, game.id, game.status.as_str())];
    for (label, value) in [
        ("Developer", content.developer.as_str()),
        ("Publisher", content.publisher.as_str()),
        ("Engine", content.engine.as_str()),
        ("Genre", content.genre.get(locale)),
        ("Headline", content.headline.get(locale)),
        ("Website", content.website.as_str()),
        ("Released", content.released_date.as_str()),
    ] {
        if !value.is_empty() {
            out.push(format!("{label}: {value}"));
        }
    }
    let platforms = platforms(game);
    if !platforms.is_empty() {
        out.push(format!("Platforms: {platforms}"));
    }
    if content.is_early_access {
        out.push("Early access".to_string());
    }
    let description = content.description.get(locale);
    if !description.is_empty() {
        out.push(String::new());
        out.push(description.to_string());
    }
    let gallery: Vec<&str> = game::gallery(&content.image_urls).collect();
    if !gallery.is_empty() {
        out.push(String::new());
        out.push(format!("Screenshots: {}", gallery.join(" ")));
    }
    out.join("\n")
}
