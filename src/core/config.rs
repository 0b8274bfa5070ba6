//! Configuration for the stall simulation.
//!
//! Every value has a default matching the shipped game balance, so a TOML file only
//! needs to name what it overrides.

use serde::{Deserialize, Serialize};

use super::errors::{StallError, StallResult};

/// Length and pacing of a single trading day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayConfig {
    /// Game-seconds in one day
    pub day_length_secs: u32,
    /// Render frames that make up one game-second
    pub frames_per_second: u32,
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            day_length_secs: 120,
            frames_per_second: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrillConfig {
    /// Game-seconds a wrap spends on the grill before it is done
    pub grill_secs: u32,
}

impl Default for GrillConfig {
    fn default() -> Self {
        Self { grill_secs: 10 }
    }
}

/// Arrival and patience behaviour of customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerConfig {
    /// Queue capacity of a shop without the expansion upgrade
    pub initial_capacity: u32,
    /// Percent chance per second that an arrival is rolled
    pub spawn_chance_percent: u32,
    /// Arrivals are only rolled while occupancy is below capacity plus this allowance
    pub spawn_overflow: u32,
    pub min_patience: u32,
    pub max_patience: u32,
    /// Percent of plain shawarma orders that ask for no sauce
    pub no_sauce_percent: u32,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 3,
            spawn_chance_percent: 10,
            spawn_overflow: 3,
            min_patience: 80,
            max_patience: 140,
            no_sauce_percent: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub bread_max: u32,
    pub item_max: u32,
    /// Amount added by a single restock of one resource
    pub restock_step: u32,
    pub starting_bread: u32,
    pub starting_meat: u32,
    /// Starting count of every other resource
    pub starting_other: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            bread_max: 5,
            item_max: 20,
            restock_step: 5,
            starting_bread: 5,
            starting_meat: 5,
            starting_other: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceList {
    pub base: u32,
    pub cucumber: u32,
    pub ketchup: u32,
    pub fries_topping: u32,
    pub meat: u32,
    /// Percent added to the shawarma price by the gold plate upgrade
    pub gold_plate_percent: u32,
    pub fries_side: u32,
    pub drink_side: u32,
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            base: 20,
            cucumber: 3,
            ketchup: 2,
            fries_topping: 8,
            meat: 10,
            gold_plate_percent: 20,
            fries_side: 8,
            drink_side: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    pub price: u32,
    /// Capacity added by the store expansion
    pub expand_capacity: u32,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            price: 50,
            expand_capacity: 3,
        }
    }
}

/// Top-level configuration for the stall
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StallConfig {
    pub day: DayConfig,
    pub grill: GrillConfig,
    pub customers: CustomerConfig,
    pub inventory: InventoryConfig,
    pub prices: PriceList,
    pub upgrades: UpgradeConfig,
    /// Seed for customer arrivals; `None` draws from entropy
    pub random_seed: Option<u64>,
}

impl StallConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document layered over the defaults and validate it
    pub fn from_toml_str(source: &str) -> StallResult<Self> {
        let config: StallConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_day_length(mut self, secs: u32) -> Self {
        self.day.day_length_secs = secs;
        self
    }

    pub fn with_frames_per_second(mut self, frames: u32) -> Self {
        self.day.frames_per_second = frames;
        self
    }

    pub fn with_random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_spawn_chance(mut self, percent: u32) -> Self {
        self.customers.spawn_chance_percent = percent;
        self
    }

    pub fn with_patience_range(mut self, min: u32, max: u32) -> Self {
        self.customers.min_patience = min;
        self.customers.max_patience = max;
        self
    }

    pub fn validate(&self) -> StallResult<()> {
        if self.day.day_length_secs == 0 {
            return Err(invalid("day length must be greater than 0"));
        }
        if self.day.frames_per_second == 0 {
            return Err(invalid("frames per second must be greater than 0"));
        }
        if self.grill.grill_secs == 0 {
            return Err(invalid("grill time must be greater than 0"));
        }
        if self.customers.spawn_chance_percent > 100 || self.customers.no_sauce_percent > 100 {
            return Err(invalid("percentages must be between 0 and 100"));
        }
        if self.customers.min_patience == 0 {
            return Err(invalid("patience must be at least 1"));
        }
        if self.customers.min_patience > self.customers.max_patience {
            return Err(invalid("min patience cannot be greater than max patience"));
        }
        let c = &self.customers;
        if c.initial_capacity > MAX_ALLOWANCE
            || c.spawn_overflow > MAX_ALLOWANCE
            || self.upgrades.expand_capacity > MAX_ALLOWANCE
        {
            return Err(invalid("capacity settings cannot exceed 1000"));
        }
        let p = &self.prices;
        let prices = [
            p.base,
            p.cucumber,
            p.ketchup,
            p.fries_topping,
            p.meat,
            p.fries_side,
            p.drink_side,
            self.upgrades.price,
        ];
        if prices.iter().any(|&price| price > MAX_PRICE) {
            return Err(invalid("prices cannot exceed 10000 coins"));
        }
        if p.gold_plate_percent > 100 {
            return Err(invalid("gold plate bonus cannot exceed 100 percent"));
        }
        let inv = &self.inventory;
        if inv.bread_max == 0 || inv.item_max == 0 {
            return Err(invalid("resource maximums must be greater than 0"));
        }
        if inv.starting_bread > inv.bread_max
            || inv.starting_meat > inv.item_max
            || inv.starting_other > inv.item_max
        {
            return Err(invalid("starting stock cannot exceed the resource maximum"));
        }
        Ok(())
    }
}

/// Upper bound for any single price or upgrade cost
pub const MAX_PRICE: u32 = 10_000;
/// Upper bound for capacities and arrival allowances
pub const MAX_ALLOWANCE: u32 = 1_000;

fn invalid(msg: &str) -> StallError {
    StallError::InvalidConfig(msg.to_string())
}
