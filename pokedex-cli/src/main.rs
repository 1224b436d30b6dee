//! Pokédex CLI
//!
//! Browse PokeAPI with Japanese display names.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_core::constants::DEFAULT_PAGE_LIMIT;
use pokedex_core::types::ResourceId;
use pokedex_i18n::{format_pokemon_id, Localizer, LocalizerConfig, ResolutionSource};

/// Pokédex - PokeAPI browser with localized names
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// PokeAPI root URL
    #[arg(long, global = true, env = "POKEAPI_BASE_URL")]
    base_url: Option<String>,

    /// Target language code
    #[arg(long, global = true, env = "POKEDEX_LOCALE")]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of Pokémon
    List {
        /// Entries per page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
        /// Offset of the first entry
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },

    /// Show a Pokémon's details
    Show {
        /// Dex number or name
        id: String,
    },

    /// Print a Pokémon's localized name
    Name {
        /// Dex number or name
        id: String,
    },

    /// Print a type's localized name
    Type {
        /// Type slug (e.g. `fire`)
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pokedex=debug,info"
    } else {
        "pokedex=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = LocalizerConfig::from_env().context("Invalid environment configuration")?;
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale);
    }
    debug!(base_url = %config.client.base_url, locale = %config.locale, "Configuration loaded");

    let localizer = Localizer::with_config(config).context("Failed to create PokeAPI client")?;

    match cli.command {
        Commands::List { limit, offset } => cmd_list(&localizer, limit, offset).await,
        Commands::Show { id } => cmd_show(&localizer, &id).await,
        Commands::Name { id } => cmd_name(&localizer, &id).await,
        Commands::Type { name } => cmd_type(&localizer, &name).await,
    }
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn parse_id(raw: &str) -> Result<ResourceId> {
    raw.parse::<ResourceId>()
        .with_context(|| format!("Invalid id or name: '{}'", raw))
}

/// List one page
async fn cmd_list(localizer: &Localizer, limit: u32, offset: u32) -> Result<()> {
    let pb = spinner("Fetching Pokémon list...")?;
    let page = localizer.list_localized(limit, offset).await;
    pb.finish_and_clear();

    let page = page.context("Failed to fetch Pokémon list")?;

    println!(
        "{} {}/{} ({} Pokémon)",
        "📖 Page".cyan().bold(),
        page.page_number(),
        page.page_count,
        page.count
    );

    for entry in &page.entries {
        let number = entry
            .id
            .map(|id| format!("No.{}", format_pokemon_id(id)))
            .unwrap_or_else(|| "No.???".to_string());
        println!(
            "   {} {} {}",
            number.dimmed(),
            entry.localized_name.bold(),
            format!("({})", entry.name).dimmed()
        );
    }

    if page.entries.is_empty() {
        println!("\n{}", "No entries on this page.".yellow());
    }

    Ok(())
}

/// Show one Pokémon
async fn cmd_show(localizer: &Localizer, raw: &str) -> Result<()> {
    let id = parse_id(raw)?;

    let pb = spinner(&format!("Fetching {}...", id))?;
    let pokemon = localizer.pokemon_detail_localized(id).await;
    pb.finish_and_clear();

    let pokemon = pokemon.with_context(|| format!("Failed to fetch Pokémon '{}'", raw))?;
    let detail = &pokemon.detail;

    println!(
        "{} {}",
        format!("No.{}", format_pokemon_id(detail.id)).cyan().bold(),
        pokemon.localized_name.bold()
    );
    if let Some(genus) = &pokemon.genus {
        println!("   {}", genus.italic());
    }
    println!("   {} {}", "Name:".dimmed(), detail.name);

    let types: Vec<&str> = pokemon.types.iter().map(|(_, label)| label.as_str()).collect();
    println!("   {} {}", "Types:".dimmed(), types.join(" / ").yellow());
    println!(
        "   {} {:.1} m   {} {:.1} kg",
        "Height:".dimmed(),
        detail.height as f64 / 10.0,
        "Weight:".dimmed(),
        detail.weight as f64 / 10.0
    );

    let abilities: Vec<String> = detail
        .abilities
        .iter()
        .map(|a| {
            if a.is_hidden {
                format!("{} (hidden)", a.ability.name)
            } else {
                a.ability.name.clone()
            }
        })
        .collect();
    if !abilities.is_empty() {
        println!("   {} {}", "Abilities:".dimmed(), abilities.join(", "));
    }

    if let Some(url) = detail.sprites.artwork_url() {
        println!("   {} {}", "Artwork:".dimmed(), url);
    }

    if !pokemon.stats.is_empty() {
        println!("\n{}", "📊 Base stats:".green().bold());
        for stat in &pokemon.stats {
            println!("   {:<8} {:>3}", stat.label, stat.base_stat);
        }
        let total: u32 = pokemon.stats.iter().map(|s| s.base_stat).sum();
        println!("   {} {:>3}", format!("{:<8}", "Total").bold(), total);
    }

    if let Some(text) = &pokemon.flavor_text {
        println!("\n{}", "📝 Pokédex entry:".green().bold());
        println!("   {}", text);
    }

    Ok(())
}

/// Print a localized Pokémon name
async fn cmd_name(localizer: &Localizer, raw: &str) -> Result<()> {
    let id = parse_id(raw)?;

    let pb = spinner(&format!("Resolving {}...", id))?;
    let resolution = localizer.pokemon_name_detailed(id).await;
    pb.finish_and_clear();

    println!("{}", resolution.value.bold());
    report_source(resolution.source);

    Ok(())
}

/// Print a localized type name
async fn cmd_type(localizer: &Localizer, raw: &str) -> Result<()> {
    let name = parse_id(raw)?.to_string();

    let pb = spinner(&format!("Resolving type {}...", name))?;
    let resolution = localizer.type_name_detailed(&name).await;
    pb.finish_and_clear();

    println!("{}", resolution.value.bold());
    report_source(resolution.source);

    Ok(())
}

fn report_source(source: ResolutionSource) {
    match source {
        ResolutionSource::FetchFailed => {
            eprintln!("{}", "⚠️  PokeAPI unavailable, showing fallback".yellow());
        }
        ResolutionSource::ExtractionMiss => {
            eprintln!("{}", "ℹ️  No localized name published, showing fallback".dimmed());
        }
        ResolutionSource::Cache | ResolutionSource::Fetched => {}
    }
}
