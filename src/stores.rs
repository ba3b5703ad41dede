//! This module provides the CheapShark store table and the store icon
//! URL builder.

use strum_macros::{Display, EnumIter, FromRepr};

use crate::{config, util};

/// Storefronts known to CheapShark, keyed by their `storeID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Store {
    Steam = 1,
    GamersGate = 2,
    GreenManGaming = 3,
    Amazon = 4,
    GameStop = 5,
    Direct2Drive = 6,
    #[strum(to_string = "GOG")]
    Gog = 7,
    Origin = 8,
    #[strum(to_string = "Get Games")]
    GetGames = 9,
    #[strum(to_string = "Shiny Loot")]
    ShinyLoot = 10,
    #[strum(to_string = "Humble Store")]
    HumbleStore = 11,
    Desura = 12,
    Uplay = 13,
    IndieGameStand = 14,
    Fanatical = 15,
    Gamesrocket = 16,
    #[strum(to_string = "Games Republic")]
    GamesRepublic = 17,
    SilaGames = 18,
    Playfield = 19,
    ImperialGames = 20,
    WinGameStore = 21,
    FunStockDigital = 22,
    GameBillet = 23,
    Voidu = 24,
    #[strum(to_string = "Epic Games Store")]
    EpicGamesStore = 25,
    #[strum(to_string = "Razer Game Store")]
    RazerGameStore = 26,
    Gamesplanet = 27,
    Gamesload = 28,
    #[strum(to_string = "2Game")]
    TwoGame = 29,
    IndieGala = 30,
    #[strum(to_string = "Blizzard Shop")]
    BlizzardShop = 31,
    AllYouPlay = 32,
    DLGamer = 33,
    Noctre = 34,
    DreamGame = 35,
}

impl Store {
    /// Looks up a store by its exact `storeID` text, so `"01"` or `" 1"`
    /// do not resolve to Steam.
    pub fn from_id(id: &str) -> Option<Self> {
        let repr: u8 = id.parse().ok()?;
        if repr.to_string() != id {
            return None;
        }
        Self::from_repr(repr)
    }
}

/// Display name for `store_id`, or `"Store {id}"` when unknown.
pub fn store_name(store_id: &str) -> String {
    match Store::from_id(store_id) {
        Some(store) => store.to_string(),
        None => format!("Store {store_id}"),
    }
}

/// Icon index is `storeID - 1`, clamped at 0; unparsable ids count as 0.
pub fn store_icon_url(store_id: &str) -> String {
    let id = util::parse_int_prefix(store_id).unwrap_or(0);
    let index = id.saturating_sub(1).max(0);
    format!("{}/{index}.png", config::STORE_ICON_BASE)
}
