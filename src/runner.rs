//! This module provides [`run`], which gathers the payloads for the chosen
//! subcommand, selects a deal and writes it to stdout.

use std::{
    io::{self, Read, Write},
    path::Path,
};

use serde_json::{Value, json};
use tracing::{info, warn};

use crate::{
    Result, StdResult, cheapshark,
    cli::{Cli, Command, FetchArgs},
    models::{DealSelection, TransformInput},
    selector, steam,
    util::ResLog,
};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read payload document: {0}")]
    Io(#[from] io::Error),
    #[error("Payload document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub async fn run(cli: Cli) -> Result<()> {
    let input = match cli.command {
        Command::Transform { input } => read_input(&input)?,
        Command::Fetch(args) => fetch_input(&args).await?,
    };

    let selection = selector::select(&input, &mut rand::thread_rng());
    log_selection(&selection);
    write_selection(io::stdout().lock(), &selection, cli.pretty)?;

    Ok(())
}

/// Only the document's JSON syntax can fail here; its shape is read
/// leniently by the selector.
fn read_input(path: &Path) -> StdResult<TransformInput, InputError> {
    let mut raw = String::new();
    if path == Path::new("-") {
        io::stdin().read_to_string(&mut raw)?;
    } else {
        raw = std::fs::read_to_string(path)?;
    }

    let value: Value = serde_json::from_str(&raw)?;
    Ok(TransformInput::from_value(value))
}

#[tracing::instrument(level = "info", skip_all, fields(steam_id = %args.steam_id))]
async fn fetch_input(args: &FetchArgs) -> Result<TransformInput> {
    let shark = cheapshark::Client::new(args.cheapshark_base.clone());
    let steam = steam::Client::new(
        args.steam_api_base.clone(),
        &args.steam_api_key,
        &args.steam_id,
    );

    let (deals, owned, wishlist) = tokio::join!(
        shark.fetch_deals(args.page_size),
        steam.fetch_owned_games(),
        steam.fetch_wishlist(),
    );

    // Library lookups only narrow the pick, so losing them is survivable.
    let deals = deals.terror()?;
    let owned = owned.twarn().ok();
    let wishlist = wishlist.twarn().ok();
    if args.wishlist_only && wishlist.is_none() {
        warn!("Wishlist unavailable in wishlist-only mode; no deal will match");
    }

    Ok(TransformInput {
        deals: Some(deals),
        owned_games: owned,
        wishlist,
        settings: Some(json!({
            "min_savings": args.min_savings,
            "min_deal_rating": args.min_deal_rating,
            "wishlist_only": args.wishlist_only,
        })),
    })
}

fn log_selection(selection: &DealSelection) {
    match &selection.deal_info {
        Some(deal) => info!(
            title = %deal.title,
            store = %deal.store_name,
            filtered = selection.filtered_count,
            total = selection.total_deals,
            "Selected deal"
        ),
        None => info!(
            total = selection.total_deals,
            owned = selection.owned_count,
            wishlisted = selection.wishlist_count,
            "No deal matched"
        ),
    }
}

fn write_selection(mut out: impl Write, selection: &DealSelection, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut out, selection)?;
    } else {
        serde_json::to_writer(&mut out, selection)?;
    }
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use crate::{
        Result,
        models::{DealSelection, NormalizedDeal},
        runner::{InputError, read_input, write_selection},
    };

    fn temp_file(name: &str, contents: &str) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn reads_payload_document() -> Result<()> {
        let path = temp_file(
            "payload.json",
            r#"{"IDX_0": {"data": [{"dealID": "a"}]}, "IDX_2": {"response": {"foo": "bar"}}}"#,
        )?;

        let input = read_input(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(Some(json!({"data": [{"dealID": "a"}]})), input.deals);
        assert_eq!(None, input.owned_games);
        assert_eq!(Some(json!({"response": {"foo": "bar"}})), input.wishlist);
        Ok(())
    }

    #[test]
    fn rejects_invalid_json() -> Result<()> {
        let path = temp_file("broken.json", "{ not json")?;
        let res = read_input(&path);
        std::fs::remove_file(&path)?;

        assert!(matches!(res, Err(InputError::Json(_))));
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = read_input(&PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(res, Err(InputError::Io(_))));
    }

    #[test]
    fn writes_one_json_line() -> Result<()> {
        let selection = DealSelection {
            deal_info: Some(NormalizedDeal {
                deal_id: "a".to_string(),
                ..Default::default()
            }),
            total_deals: 3,
            filtered_count: 1,
            owned_count: 2,
            wishlist_count: 0,
        };

        let mut out = Vec::new();
        write_selection(&mut out, &selection, false)?;
        let text = String::from_utf8(out)?;

        assert_eq!(1, text.lines().count());
        let value: Value = serde_json::from_str(&text)?;
        assert_eq!(json!("a"), value["dealInfo"]["dealId"]);
        assert_eq!(json!(3), value["totalDeals"]);
        Ok(())
    }
}
