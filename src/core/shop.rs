use log::info;

use super::config::{CustomerConfig, UpgradeConfig};
use super::errors::{StallError, StallResult};
use super::types::Upgrade;

/// Shop state that outlives a single day: coins, capacity, upgrades and the day counter.
///
/// Only checkout credits coins and only upgrade purchases spend them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopMeta {
    coins: u32,
    capacity: u32,
    auto_meat: bool,
    gold_plate: bool,
    expand: bool,
    day: u32,
}

impl ShopMeta {
    pub fn new(config: &CustomerConfig) -> Self {
        Self {
            coins: 0,
            capacity: config.initial_capacity,
            auto_meat: false,
            gold_plate: false,
            expand: false,
            day: 0,
        }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn has(&self, upgrade: Upgrade) -> bool {
        match upgrade {
            Upgrade::AutoMeat => self.auto_meat,
            Upgrade::GoldPlate => self.gold_plate,
            Upgrade::Expand => self.expand,
        }
    }

    pub fn credit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Start the next day, returning its number
    pub fn begin_day(&mut self) -> u32 {
        self.day += 1;
        self.day
    }

    /// Buy a one-off upgrade. Each can be bought once.
    pub fn purchase(&mut self, upgrade: Upgrade, config: &UpgradeConfig) -> StallResult<()> {
        if self.has(upgrade) {
            return Err(StallError::AlreadyPurchased(upgrade));
        }
        if self.coins < config.price {
            return Err(StallError::InsufficientCoins {
                needed: config.price,
                available: self.coins,
            });
        }
        self.coins -= config.price;
        match upgrade {
            Upgrade::AutoMeat => self.auto_meat = true,
            Upgrade::GoldPlate => self.gold_plate = true,
            Upgrade::Expand => {
                self.expand = true;
                self.capacity = self.capacity.saturating_add(config.expand_capacity);
            }
        }
        info!("[Shop] Purchased {} for {} coins ({} left)", upgrade, config.price, self.coins);
        Ok(())
    }
}

impl Default for ShopMeta {
    fn default() -> Self {
        Self::new(&CustomerConfig::default())
    }
}
