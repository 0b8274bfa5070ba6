//! Customer queue with patience decay and front-only eviction.

use log::{debug, info};
use std::collections::VecDeque;
use std::fmt;

use super::config::CustomerConfig;
use super::production::ShawarmaUnit;
use super::rng::RandomSource;
use super::types::{CustomerId, SideItem};

/// What a customer asked for. Fixed at arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub shawarma: bool,
    pub no_sauce: bool,
    pub fries: bool,
    pub drink: bool,
}

impl Order {
    pub fn plain() -> Self {
        Self {
            shawarma: true,
            no_sauce: false,
            fries: false,
            drink: false,
        }
    }

    pub fn no_sauce() -> Self {
        Self {
            no_sauce: true,
            ..Self::plain()
        }
    }

    pub fn with_fries() -> Self {
        Self {
            fries: true,
            ..Self::plain()
        }
    }

    pub fn with_drink() -> Self {
        Self {
            drink: true,
            ..Self::plain()
        }
    }

    /// Draw an order: four equal buckets, two of which are a plain shawarma
    pub fn generate(rng: &mut dyn RandomSource, config: &CustomerConfig) -> Self {
        match rng.range_inclusive(0, 3) {
            0 => {
                if rng.chance(config.no_sauce_percent) {
                    Self::no_sauce()
                } else {
                    Self::plain()
                }
            }
            1 => Self::with_fries(),
            _ => Self::with_drink(),
        }
    }

    pub fn wants(&self, side: SideItem) -> bool {
        match side {
            SideItem::Fries => self.fries,
            SideItem::Drink => self.drink,
        }
    }

    /// Whether `unit` satisfies the shawarma part of this order
    pub fn accepts(&self, unit: &ShawarmaUnit) -> bool {
        if !self.shawarma || !unit.is_servable() {
            return false;
        }
        !(self.no_sauce && unit.toppings().sauce)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shawarma {
            f.write_str("shawarma")?;
            if self.no_sauce {
                f.write_str(" (no sauce)")?;
            }
        }
        if self.fries {
            f.write_str(" + fries")?;
        }
        if self.drink {
            f.write_str(" + drink")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    order: Order,
    patience_max: u32,
    patience: u32,
    served: bool,
}

impl Customer {
    pub fn new(id: CustomerId, order: Order, patience: u32) -> Self {
        Self {
            id,
            order,
            patience_max: patience,
            patience,
            served: false,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn patience(&self) -> u32 {
        self.patience
    }

    pub fn patience_max(&self) -> u32 {
        self.patience_max
    }

    /// Remaining patience as a fraction of the starting patience
    pub fn patience_ratio(&self) -> f64 {
        if self.patience_max == 0 {
            return 0.0;
        }
        self.patience as f64 / self.patience_max as f64
    }

    pub fn is_served(&self) -> bool {
        self.served
    }

    /// Ready to leave the queue once it reaches the front
    pub fn is_finished(&self) -> bool {
        self.served || self.patience == 0
    }
}

/// Customers in arrival order.
///
/// Only the front customer is ever checked for removal: a served or timed-out
/// customer further back stays in the queue until everyone ahead of it has left.
#[derive(Debug, Clone, Default)]
pub struct CustomerQueue {
    customers: VecDeque<Customer>,
    next_id: CustomerId,
}

impl CustomerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Customer> {
        self.customers.get(index)
    }

    pub fn front(&self) -> Option<&Customer> {
        self.customers.front()
    }

    /// Append a customer with a known order and patience
    pub fn admit(&mut self, order: Order, patience: u32) -> CustomerId {
        let id = self.next_id;
        self.next_id += 1;
        self.customers.push_back(Customer::new(id, order, patience));
        info!("[Queue] Customer {} arrived wanting {} (patience {})", id, order, patience);
        id
    }

    /// Admit a randomly generated customer unless the queue already holds `capacity`
    pub fn spawn(
        &mut self,
        capacity: u32,
        rng: &mut dyn RandomSource,
        config: &CustomerConfig,
    ) -> Option<CustomerId> {
        if self.customers.len() >= capacity as usize {
            debug!("[Queue] Arrival turned away, {} of {} places taken", self.len(), capacity);
            return None;
        }
        let order = Order::generate(rng, config);
        let patience = rng.range_inclusive(config.min_patience, config.max_patience);
        Some(self.admit(order, patience))
    }

    /// One second of waiting for everyone not yet served
    pub fn decay_patience(&mut self) {
        for customer in self.customers.iter_mut().filter(|c| !c.served) {
            customer.patience = customer.patience.saturating_sub(1);
        }
    }

    /// Pop finished customers off the front, stopping at the first one still waiting
    pub fn evict_front(&mut self) -> Vec<Customer> {
        let mut evicted = Vec::new();
        while self.customers.front().map_or(false, Customer::is_finished) {
            if let Some(customer) = self.customers.pop_front() {
                if !customer.served {
                    info!("[Queue] Customer {} ran out of patience and left", customer.id);
                }
                evicted.push(customer);
            }
        }
        evicted
    }

    pub fn mark_served(&mut self, index: usize) {
        if let Some(customer) = self.customers.get_mut(index) {
            customer.served = true;
        }
    }
}
