//! This module turns Steam's owned-games and wishlist payloads into app id
//! sets. Both payloads are read loosely; an unexpected shape gives an
//! empty set, never an error.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

fn integral(value: &Value) -> Option<i64> {
    let n = value.as_number()?;
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn app_id_of(item: &Value) -> Option<i64> {
    item.get("appid").and_then(integral)
}

/// App ids from `IPlayerService/GetOwnedGames` (`response.games[].appid`).
pub fn owned_app_ids(payload: Option<&Value>) -> HashSet<i64> {
    payload
        .and_then(|p| p.pointer("/response/games"))
        .and_then(Value::as_array)
        .map(|games| games.iter().filter_map(app_id_of).collect())
        .unwrap_or_default()
}

/// App ids from `IWishlistService/GetWishlist`.
///
/// The wishlist has shipped in a few shapes over the years, so these are
/// tried in order under `response`:
/// 1. `items: [{ appid, priority, date_added }]`
/// 2. `rgWishlist: [appid]`
/// 3. the first field holding an array of nothing but numbers
pub fn wishlist_app_ids(payload: Option<&Value>) -> HashSet<i64> {
    let Some(response) = payload
        .and_then(|p| p.get("response"))
        .and_then(Value::as_object)
    else {
        return HashSet::new();
    };

    if let Some(items) = response.get("items").and_then(Value::as_array) {
        return items.iter().filter_map(app_id_of).collect();
    }

    if let Some(ids) = response.get("rgWishlist").and_then(Value::as_array) {
        return ids.iter().filter_map(integral).collect();
    }

    let fallback = response.iter().find_map(|(key, val)| {
        let arr = val.as_array()?;
        arr.iter().all(Value::is_number).then_some((key, arr))
    });
    match fallback {
        Some((key, arr)) => {
            debug!(%key, "Reading wishlist from first numeric array");
            arr.iter().filter_map(integral).collect()
        }
        None => HashSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{owned_app_ids, wishlist_app_ids};

    fn set(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn owned_reads_games() {
        let payload = json!({"response": {"game_count": 3, "games": [
            {"appid": 440, "playtime_forever": 10},
            {"appid": 570},
            {"name": "no appid"},
            {"appid": "730"}
        ]}});
        assert_eq!(set(&[440, 570]), owned_app_ids(Some(&payload)));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(json!({})))]
    #[case(Some(json!({"response": {}})))]
    #[case(Some(json!({"response": {"games": "nope"}})))]
    #[case(Some(json!([1, 2, 3])))]
    fn owned_degrades_to_empty(#[case] payload: Option<Value>) {
        assert!(owned_app_ids(payload.as_ref()).is_empty());
    }

    #[test]
    fn wishlist_prefers_items() {
        let payload = json!({"response": {
            "items": [{"appid": 10, "priority": 1}, {"appid": 20.0}, {"appid": 1.5}, "junk"],
            "rgWishlist": [99]
        }});
        assert_eq!(set(&[10, 20]), wishlist_app_ids(Some(&payload)));
    }

    #[test]
    fn wishlist_reads_rg_wishlist() {
        let payload = json!({"response": {"rgWishlist": [10, 20, "30"]}});
        assert_eq!(set(&[10, 20]), wishlist_app_ids(Some(&payload)));
    }

    #[test]
    fn wishlist_falls_back_to_first_numeric_array() {
        let payload = json!({"response": {
            "names": ["a", "b"],
            "zeta": [5, 6, 7],
            "mixed": [1, "2"],
            "alpha": [8]
        }});
        assert_eq!(set(&[5, 6, 7]), wishlist_app_ids(Some(&payload)));
    }

    #[test]
    fn wishlist_fallback_takes_leading_empty_array() {
        let payload = json!({"response": {
            "zeta": [],
            "alpha": [8, 9]
        }});
        assert!(wishlist_app_ids(Some(&payload)).is_empty());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(json!({"response": {"foo": "bar"}})))]
    #[case(Some(json!({"response": "bar"})))]
    #[case(Some(json!({"items": [{"appid": 1}]})))]
    #[case(Some(json!(null)))]
    fn wishlist_degrades_to_empty(#[case] payload: Option<Value>) {
        assert!(wishlist_app_ids(payload.as_ref()).is_empty());
    }
}
