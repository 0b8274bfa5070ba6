use log::debug;

use super::config::InventoryConfig;
use super::errors::{StallError, StallResult};
use super::types::Resource;

/// What a single press of the restock command refills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restock {
    /// Refill straight to the maximum
    Fill(Resource),
    /// Add the configured restock step, clamped to the maximum
    Step(Resource),
}

impl Restock {
    /// Restock rotation, one entry per press
    pub const CYCLE: [Restock; 8] = [
        Restock::Fill(Resource::Bread),
        Restock::Step(Resource::Cucumber),
        Restock::Step(Resource::Sauce),
        Restock::Step(Resource::Ketchup),
        Restock::Step(Resource::Drink),
        Restock::Step(Resource::WrapPaper),
        Restock::Step(Resource::FriesBox),
        Restock::Step(Resource::DrinkCup),
    ];

    pub fn resource(self) -> Resource {
        match self {
            Restock::Fill(resource) | Restock::Step(resource) => resource,
        }
    }
}

/// Counts of raw and packaging materials, each bounded by its own maximum.
///
/// `0 <= count <= max` holds for every resource after every call: consumption is
/// refused rather than going negative and resupply clamps at the maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePool {
    counts: [u32; Resource::COUNT],
    maxima: [u32; Resource::COUNT],
    restock_step: u32,
}

impl ResourcePool {
    pub fn new(config: &InventoryConfig) -> Self {
        let mut counts = [config.starting_other; Resource::COUNT];
        let mut maxima = [config.item_max; Resource::COUNT];
        counts[Resource::Bread.index()] = config.starting_bread;
        counts[Resource::Meat.index()] = config.starting_meat;
        maxima[Resource::Bread.index()] = config.bread_max;
        for (count, max) in counts.iter_mut().zip(maxima.iter()) {
            *count = (*count).min(*max);
        }
        Self {
            counts,
            maxima,
            restock_step: config.restock_step,
        }
    }

    pub fn count(&self, resource: Resource) -> u32 {
        self.counts[resource.index()]
    }

    pub fn max(&self, resource: Resource) -> u32 {
        self.maxima[resource.index()]
    }

    pub fn can_consume(&self, resource: Resource, n: u32) -> bool {
        self.count(resource) >= n
    }

    /// Take `n` units, leaving the count untouched when there are not enough
    pub fn consume(&mut self, resource: Resource, n: u32) -> StallResult<()> {
        if !self.can_consume(resource, n) {
            return Err(StallError::InsufficientResource(resource));
        }
        self.counts[resource.index()] -= n;
        Ok(())
    }

    /// Add `amount`, clamped to the maximum. Returns the amount actually added.
    pub fn resupply(&mut self, resource: Resource, amount: u32) -> u32 {
        let before = self.count(resource);
        let after = before.saturating_add(amount).min(self.max(resource));
        self.counts[resource.index()] = after;
        after - before
    }

    pub fn fill(&mut self, resource: Resource) -> u32 {
        self.resupply(resource, self.max(resource))
    }

    /// Apply one step of the restock rotation
    pub fn restock(&mut self, entry: Restock) -> u32 {
        let added = match entry {
            Restock::Fill(resource) => self.fill(resource),
            Restock::Step(resource) => self.resupply(resource, self.restock_step),
        };
        debug!(
            "[Pool] Restocked {} by {} ({}/{})",
            entry.resource(),
            added,
            self.count(entry.resource()),
            self.max(entry.resource())
        );
        added
    }

    pub fn restock_step(&self) -> u32 {
        self.restock_step
    }

    /// Every resource with its count and maximum, in declaration order
    pub fn levels(&self) -> impl Iterator<Item = (Resource, u32, u32)> + '_ {
        Resource::ALL
            .iter()
            .map(move |&resource| (resource, self.count(resource), self.max(resource)))
    }
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new(&InventoryConfig::default())
    }
}
