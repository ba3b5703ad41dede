//! This module provides [`select`], which picks the deal of the moment.

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::{
    cheapshark, library,
    models::{DealSelection, FilterSettings, NormalizedDeal, TransformInput},
};

/// Normalizes every deal in `input`, filters them by the user's settings
/// and picks one uniformly at random.
///
/// In wishlist-only mode a deal must be wishlisted; otherwise it must not
/// be owned. Malformed input never fails, it just filters down to fewer
/// (or no) deals.
#[tracing::instrument(level = "debug", skip_all)]
pub fn select<R: Rng + ?Sized>(input: &TransformInput, rng: &mut R) -> DealSelection {
    let deals: Vec<NormalizedDeal> = cheapshark::deals_from_payload(input.deals.as_ref())
        .into_iter()
        .map(NormalizedDeal::from)
        .collect();
    let owned = library::owned_app_ids(input.owned_games.as_ref());
    let wishlist = library::wishlist_app_ids(input.wishlist.as_ref());
    let settings = FilterSettings::from_value(input.settings.as_ref());

    let filtered: Vec<&NormalizedDeal> = deals
        .iter()
        .filter(|deal| {
            let passes_thresholds = deal.savings_percent() >= settings.min_savings
                && deal.rating() >= settings.min_deal_rating;
            let app_id = deal.app_id();
            let passes_library = if settings.wishlist_only {
                app_id.is_some_and(|id| wishlist.contains(&id))
            } else {
                !app_id.is_some_and(|id| owned.contains(&id))
            };
            passes_thresholds && passes_library
        })
        .collect();

    debug!(
        ?settings,
        total = deals.len(),
        filtered = filtered.len(),
        owned = owned.len(),
        wishlisted = wishlist.len(),
        "Filtered deals"
    );

    DealSelection {
        deal_info: filtered.choose(rng).map(|deal| (*deal).clone()),
        total_deals: deals.len(),
        filtered_count: filtered.len(),
        owned_count: owned.len(),
        wishlist_count: wishlist.len(),
    }
}
