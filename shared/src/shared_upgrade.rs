use serde::{Deserialize, Serialize};

use crate::shared_case::CatalogItem;

/// Server-provided upgrade configuration. `rtp` is the return-to-player
/// coefficient applied to the stake/target ratio when deriving the success
/// chance; the server uses the same formula to decide the outcome.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UpgradeConfig {
    pub rtp: f64,
}

// === API Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct UpgradeSpinRequest {
    /// Inventory items staked on the upgrade.
    pub item_ids: Vec<i64>,
    pub target_item_id: i64,
    pub timestamp: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpgradeSpinResponse {
    pub success: bool,
    pub is_win: bool,
    pub won_item: Option<CatalogItem>,
    pub new_balance: i64,
    pub message: Option<String>,
}

/// Success chance in percent for upgrading `stake_value` worth of items
/// into an item priced `target_price`, under the server's RTP coefficient.
///
/// Clamped to [0, 100]: staking more than the target is simply a sure
/// upgrade, and a non-positive target price has nothing to upgrade into.
pub fn upgrade_chance(stake_value: f64, target_price: f64, rtp: f64) -> f64 {
    if target_price <= 0.0 || stake_value <= 0.0 || rtp <= 0.0 {
        return 0.0;
    }
    (stake_value / target_price * rtp * 100.0).clamp(0.0, 100.0)
}
