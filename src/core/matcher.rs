//! Order matching and checkout.

use log::{debug, info};
use uuid::Uuid;

use super::config::PriceList;
use super::customers::{CustomerQueue, Order};
use super::errors::{StallError, StallResult};
use super::prep::SideStation;
use super::production::{ProductionPipeline, Toppings};
use super::shop::ShopMeta;
use super::types::{CustomerId, SideItem, Upgrade};

/// A completed checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub receipt: String,
    pub customer: CustomerId,
    pub order: Order,
    pub toppings: Toppings,
    pub amount: u32,
}

/// Customer index and wrap slot of the first servable pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub customer: usize,
    pub slot: usize,
}

pub struct OrderMatcher {
    prices: PriceList,
}

impl OrderMatcher {
    pub fn new(prices: PriceList) -> Self {
        Self { prices }
    }

    /// Price of the shawarma alone. Gold plate adds its percentage, truncated.
    pub fn shawarma_price(&self, toppings: &Toppings, gold_plate: bool) -> u32 {
        let p = &self.prices;
        let mut price = p.base;
        if toppings.cucumber {
            price = price.saturating_add(p.cucumber);
        }
        if toppings.ketchup {
            price = price.saturating_add(p.ketchup);
        }
        if toppings.fries {
            price = price.saturating_add(p.fries_topping);
        }
        if toppings.meat {
            price = price.saturating_add(p.meat);
        }
        if gold_plate {
            price = price.saturating_add(price.saturating_mul(p.gold_plate_percent) / 100);
        }
        price
    }

    pub fn side_price(&self, side: SideItem) -> u32 {
        match side {
            SideItem::Fries => self.prices.fries_side,
            SideItem::Drink => self.prices.drink_side,
        }
    }

    /// Walk customers in arrival order and pair the first unserved one that has an
    /// acceptable unit in the wrap area, checking slots in index order.
    pub fn find_match(
        &self,
        queue: &CustomerQueue,
        pipeline: &ProductionPipeline,
    ) -> Option<Match> {
        queue
            .iter()
            .enumerate()
            .filter(|(_, customer)| !customer.is_served())
            .find_map(|(index, customer)| {
                pipeline
                    .find_servable(|unit| customer.order().accepts(unit))
                    .map(|slot| Match {
                        customer: index,
                        slot,
                    })
            })
    }

    /// Serve at most one customer.
    ///
    /// When the first pairing also needs a side item that is not ready, nothing is
    /// sold and later customers are not tried.
    pub fn serve(
        &self,
        queue: &mut CustomerQueue,
        pipeline: &mut ProductionPipeline,
        sides: &mut SideStation,
        meta: &mut ShopMeta,
    ) -> StallResult<Sale> {
        let found = self
            .find_match(queue, pipeline)
            .ok_or(StallError::NoMatchingCustomer)?;
        let customer = queue
            .get(found.customer)
            .ok_or(StallError::NoMatchingCustomer)?;
        let (id, order) = (customer.id(), *customer.order());

        for side in [SideItem::Fries, SideItem::Drink] {
            if order.wants(side) && !sides.ticket(side).is_ready() {
                debug!("[Checkout] Customer {} is waiting on {}", id, side);
                return Err(StallError::PrepNotReady(side));
            }
        }

        let unit = pipeline
            .hand_over(found.slot)
            .ok_or(StallError::NoMatchingCustomer)?;
        let mut amount = self.shawarma_price(unit.toppings(), meta.has(Upgrade::GoldPlate));
        for side in [SideItem::Fries, SideItem::Drink] {
            if order.wants(side) {
                sides.ticket_mut(side).consume()?;
                amount = amount.saturating_add(self.side_price(side));
            }
        }

        meta.credit(amount);
        queue.mark_served(found.customer);

        let sale = Sale {
            receipt: format!("sale_{}", Uuid::new_v4()),
            customer: id,
            order,
            toppings: *unit.toppings(),
            amount,
        };
        info!(
            "[Checkout] Sold {} to customer {} for {} coins ({})",
            order, id, amount, sale.receipt
        );
        Ok(sale)
    }
}

impl Default for OrderMatcher {
    fn default() -> Self {
        Self::new(PriceList::default())
    }
}
