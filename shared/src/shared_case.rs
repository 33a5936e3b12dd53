use serde::{Deserialize, Serialize};

/// Rarity tier of a droppable item, in ascending order of value.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// Immutable descriptor of a droppable item. Owned by the server-side
/// catalog; the client only reads it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub image_path: String,
    /// Unit price in credits.
    pub price: i64,
    /// Drop probability in percent, display-only on the client.
    pub drop_chance: f64,
    pub rarity: Rarity,
    /// Stack count carried by the catalog for stacked drops.
    #[serde(default = "default_amount")]
    pub amount: u32,
}

fn default_amount() -> u32 {
    1
}

/// Case listing entry for the landing page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaseSummary {
    pub id: i64,
    pub name: String,
    pub image_path: String,
    pub price: i64,
}

/// Full case description: metadata plus the catalog of possible drops.
/// The catalog is used only to synthesize reel filler; it never influences
/// the real outcome, which the server decides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaseDetail {
    pub id: i64,
    pub name: String,
    pub image_path: String,
    pub price: i64,
    pub items: Vec<CatalogItem>,
}

// === API Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CaseOpenRequest {
    /// Number of simultaneous lanes to open, 1..=MAX_CASE_LANES.
    pub count: u32,
}

/// One server-decided drop, ordered to match the requested lanes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WonItem {
    pub item: CatalogItem,
    /// Whether the drop can be withdrawn or only sold back.
    pub withdrawable: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaseOpenResponse {
    pub success: bool,
    pub items: Vec<WonItem>,
    pub new_balance: i64,
    pub message: Option<String>,
}
