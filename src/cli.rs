use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config;

/// Picks a random game deal you don't own (or have wishlisted) for a
/// dashboard widget and prints it as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select a deal from an already fetched payload document
    Transform {
        /// Payload document with IDX_0 (deals), IDX_1 (owned games),
        /// IDX_2 (wishlist) and trmnl plugin settings; `-` reads stdin
        input: PathBuf,
    },
    /// Fetch deals, owned games and wishlist live, then select a deal
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Steam Web API key
    #[arg(long, env = "STEAM_API_KEY", hide_env_values = true)]
    pub steam_api_key: String,

    /// 64-bit Steam ID whose library and wishlist are used
    #[arg(long, env = "STEAM_ID")]
    pub steam_id: String,

    /// Minimum savings percentage a deal must have
    #[arg(long, env = "MIN_SAVINGS", default_value_t = 0.0)]
    pub min_savings: f64,

    /// Minimum CheapShark deal rating a deal must have
    #[arg(long, env = "MIN_DEAL_RATING", default_value_t = 0.0)]
    pub min_deal_rating: f64,

    /// Only pick deals for wishlisted games instead of unowned ones
    #[arg(long, env = "WISHLIST_ONLY")]
    pub wishlist_only: bool,

    /// Number of deals to request from CheapShark
    #[arg(long, default_value_t = config::DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub page_size: u32,

    #[arg(long, default_value = config::CHEAPSHARK_API_BASE)]
    pub cheapshark_base: url::Url,

    #[arg(long, default_value = config::STEAM_API_BASE)]
    pub steam_api_base: url::Url,
}
