use serde::{Deserialize, Serialize};
use std::fmt;

/// Arrival ticket number handed to each customer within a day
pub type CustomerId = u32;

/// Raw and packaging materials tracked by the resource pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Bread,
    Meat,
    Sauce,
    Cucumber,
    Ketchup,
    Potato,
    Fries,
    Drink,
    WrapPaper,
    FriesBox,
    DrinkCup,
}

impl Resource {
    pub const COUNT: usize = 11;

    pub const ALL: [Resource; Resource::COUNT] = [
        Resource::Bread,
        Resource::Meat,
        Resource::Sauce,
        Resource::Cucumber,
        Resource::Ketchup,
        Resource::Potato,
        Resource::Fries,
        Resource::Drink,
        Resource::WrapPaper,
        Resource::FriesBox,
        Resource::DrinkCup,
    ];

    /// Position of this resource in pool storage
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Bread => "bread",
            Resource::Meat => "meat",
            Resource::Sauce => "sauce",
            Resource::Cucumber => "cucumber",
            Resource::Ketchup => "ketchup",
            Resource::Potato => "potato",
            Resource::Fries => "fries",
            Resource::Drink => "drink",
            Resource::WrapPaper => "wrap paper",
            Resource::FriesBox => "fries box",
            Resource::DrinkCup => "drink cup",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Toppings that can go onto the open flatbread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topping {
    Meat,
    Cucumber,
    Fries,
    Ketchup,
    Sauce,
}

impl Topping {
    /// Order in which the topping command cycles through toppings
    pub const CYCLE: [Topping; 5] = [
        Topping::Meat,
        Topping::Cucumber,
        Topping::Fries,
        Topping::Ketchup,
        Topping::Sauce,
    ];

    /// Pool resource consumed when this topping is added
    pub fn resource(self) -> Resource {
        match self {
            Topping::Meat => Resource::Meat,
            Topping::Cucumber => Resource::Cucumber,
            Topping::Fries => Resource::Fries,
            Topping::Ketchup => Resource::Ketchup,
            Topping::Sauce => Resource::Sauce,
        }
    }
}

impl fmt::Display for Topping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource().name())
    }
}

/// Side items prepared through a shop-wide prep ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideItem {
    Fries,
    Drink,
}

impl SideItem {
    /// Container taken in the first prep step
    pub fn container(self) -> Resource {
        match self {
            SideItem::Fries => Resource::FriesBox,
            SideItem::Drink => Resource::DrinkCup,
        }
    }

    /// Contents poured into the container in the second prep step
    pub fn filling(self) -> Resource {
        match self {
            SideItem::Fries => Resource::Fries,
            SideItem::Drink => Resource::Drink,
        }
    }
}

impl fmt::Display for SideItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideItem::Fries => f.write_str("fries"),
            SideItem::Drink => f.write_str("drink"),
        }
    }
}

/// Holding areas of the production pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Wrap,
    Grill,
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Wrap => f.write_str("wrap area"),
            Area::Grill => f.write_str("grill"),
        }
    }
}

/// One-off shop upgrades bought between days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    AutoMeat,
    GoldPlate,
    Expand,
}

impl Upgrade {
    pub const ALL: [Upgrade; 3] = [Upgrade::AutoMeat, Upgrade::GoldPlate, Upgrade::Expand];
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upgrade::AutoMeat => f.write_str("auto meat slicer"),
            Upgrade::GoldPlate => f.write_str("gold plate"),
            Upgrade::Expand => f.write_str("store expansion"),
        }
    }
}
