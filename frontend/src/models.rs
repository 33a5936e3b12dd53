use serde::{Deserialize, Serialize};
use shared::shared_case::CatalogItem;

/// One item instance in the signed-in user's inventory, as the server
/// returns it. Instances wrap a catalog item: the same catalog entry can
/// be owned many times.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: i64,
    pub item: CatalogItem,
    #[serde(default)]
    pub acquired_at: Option<String>,
}
