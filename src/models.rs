use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{stores, util};

/// A deal as returned by CheapShark's `/api/1.0/deals`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawDeal {
    #[serde(rename = "dealID", deserialize_with = "util::lenient_string")]
    pub deal_id: String,
    #[serde(rename = "storeID", deserialize_with = "util::lenient_string")]
    pub store_id: String,
    #[serde(rename = "steamAppID", deserialize_with = "util::lenient_string")]
    pub steam_app_id: String,
    #[serde(rename = "gameID", deserialize_with = "util::lenient_string")]
    pub game_id: String,
    #[serde(deserialize_with = "util::lenient_string")]
    pub title: String,
    #[serde(rename = "salePrice", deserialize_with = "util::lenient_string")]
    pub sale_price: String,
    #[serde(rename = "normalPrice", deserialize_with = "util::lenient_string")]
    pub normal_price: String,
    #[serde(deserialize_with = "util::lenient_string")]
    pub savings: String,
    #[serde(rename = "dealRating", deserialize_with = "util::lenient_string")]
    pub deal_rating: String,
    #[serde(rename = "metacriticScore", deserialize_with = "util::lenient_string")]
    pub metacritic_score: String,
    #[serde(rename = "steamRatingPercent", deserialize_with = "util::lenient_string")]
    pub steam_rating_percent: String,
    #[serde(rename = "steamRatingCount", deserialize_with = "util::lenient_string")]
    pub steam_rating_count: String,
    #[serde(rename = "steamRatingText", deserialize_with = "util::lenient_string")]
    pub steam_rating_text: String,
    #[serde(rename = "releaseDate", deserialize_with = "util::lenient_timestamp")]
    pub release_date: i64,
    #[serde(rename = "lastChange", deserialize_with = "util::lenient_timestamp")]
    pub last_change: i64,
    #[serde(deserialize_with = "util::lenient_string")]
    pub thumb: String,
    #[serde(rename = "internalName", deserialize_with = "util::lenient_string")]
    pub internal_name: String,
}

/// A [`RawDeal`] with the store's display name and icon resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDeal {
    pub deal_id: String,
    pub store_id: String,
    pub store_name: String,
    pub store_icon_url: String,
    pub steam_app_id: String,
    pub game_id: String,
    pub title: String,
    pub sale_price: String,
    pub normal_price: String,
    pub savings: String,
    pub deal_rating: String,
    pub metacritic_score: String,
    pub steam_rating_percent: String,
    pub steam_rating_count: String,
    pub steam_rating_text: String,
    pub release_date: i64,
    pub last_change: i64,
    pub thumb: String,
    pub internal_name: String,
}

impl From<RawDeal> for NormalizedDeal {
    fn from(raw: RawDeal) -> Self {
        Self {
            store_name: stores::store_name(&raw.store_id),
            store_icon_url: stores::store_icon_url(&raw.store_id),
            deal_id: raw.deal_id,
            store_id: raw.store_id,
            steam_app_id: raw.steam_app_id,
            game_id: raw.game_id,
            title: raw.title,
            sale_price: raw.sale_price,
            normal_price: raw.normal_price,
            savings: raw.savings,
            deal_rating: raw.deal_rating,
            metacritic_score: raw.metacritic_score,
            steam_rating_percent: raw.steam_rating_percent,
            steam_rating_count: raw.steam_rating_count,
            steam_rating_text: raw.steam_rating_text,
            release_date: raw.release_date,
            last_change: raw.last_change,
            thumb: raw.thumb,
            internal_name: raw.internal_name,
        }
    }
}

impl NormalizedDeal {
    pub fn savings_percent(&self) -> f64 {
        util::parse_float_prefix(&self.savings)
            .filter(|n| !n.is_nan())
            .unwrap_or(0.0)
    }

    pub fn rating(&self) -> f64 {
        util::parse_float_prefix(&self.deal_rating)
            .filter(|n| !n.is_nan())
            .unwrap_or(0.0)
    }

    /// `None` when `steamAppID` is empty or not numeric; such a deal
    /// matches neither the owned nor the wishlist set.
    pub fn app_id(&self) -> Option<i64> {
        util::parse_int_prefix(&self.steam_app_id)
    }
}

/// Thresholds and mode picked by the user in the widget's settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterSettings {
    pub min_savings: f64,
    pub min_deal_rating: f64,
    pub wishlist_only: bool,
}

impl FilterSettings {
    /// Never fails; anything missing or unreadable keeps its default.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(vals) = value.filter(|v| v.is_object()) else {
            return Self::default();
        };

        Self {
            min_savings: vals.get("min_savings").map_or(0.0, threshold),
            min_deal_rating: vals.get("min_deal_rating").map_or(0.0, threshold),
            wishlist_only: vals.get("wishlist_only").is_some_and(flag),
        }
    }
}

fn threshold(value: &Value) -> f64 {
    number(value).filter(|n| !n.is_nan()).unwrap_or(0.0)
}

/// Reads a setting the way the widget's form values coerce to numbers:
/// `null` and `""` are 0, `[x]` is `x`, anything unreadable is `None`.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => util::parse_number_literal(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [Value::Bool(_) | Value::Object(_)] => None,
            [item] => number(item),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Falsy values are `null`, `false`, `0`, NaN and `""`; everything else,
/// including `"false"`, `{}` and `[]`, enables the flag.
fn flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The combined payload document the widget platform hands over:
/// `IDX_0` deals, `IDX_1` owned games, `IDX_2` wishlist and the plugin
/// settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformInput {
    pub deals: Option<Value>,
    pub owned_games: Option<Value>,
    pub wishlist: Option<Value>,
    pub settings: Option<Value>,
}

impl TransformInput {
    pub fn from_value(mut value: Value) -> Self {
        let mut take = |key: &str| value.get_mut(key).map(Value::take);

        let deals = take("IDX_0");
        let owned_games = take("IDX_1");
        let wishlist = take("IDX_2");
        let settings = match value.pointer_mut("/trmnl/plugin_settings/custom_fields_values") {
            Some(vals) => Some(vals.take()),
            None => value.get_mut("settings").map(Value::take),
        };

        Self {
            deals,
            owned_games,
            wishlist,
            settings,
        }
    }
}

/// What the widget template renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealSelection {
    pub deal_info: Option<NormalizedDeal>,
    pub total_deals: usize,
    pub filtered_count: usize,
    pub owned_count: usize,
    pub wishlist_count: usize,
}
