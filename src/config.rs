//! This module provides general configurations.

/// Icons live at `{base}/{storeID - 1}.png`.
pub const STORE_ICON_BASE: &str = "https://www.cheapshark.com/img/stores/icons";

pub const CHEAPSHARK_API_BASE: &str = "https://www.cheapshark.com";

pub const STEAM_API_BASE: &str = "https://api.steampowered.com";

/// CheapShark's own default page size for `/deals`.
pub const DEFAULT_PAGE_SIZE: u32 = 60;
