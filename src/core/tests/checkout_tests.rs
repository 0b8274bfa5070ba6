// Tests for order matching, pricing and checkout
#[cfg(test)]
mod tests {
    use crate::core::{
        config::PriceList,
        customers::{CustomerQueue, Order},
        errors::StallError,
        matcher::OrderMatcher,
        prep::{PrepState, SideStation},
        production::{ProductionPipeline, Toppings},
        resources::ResourcePool,
        shop::ShopMeta,
        types::{SideItem, Topping, Upgrade},
    };

    struct Counter {
        pool: ResourcePool,
        pipeline: ProductionPipeline,
        sides: SideStation,
        queue: CustomerQueue,
        meta: ShopMeta,
        matcher: OrderMatcher,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                pool: ResourcePool::default(),
                pipeline: ProductionPipeline::new(10),
                sides: SideStation::new(),
                queue: CustomerQueue::new(),
                meta: ShopMeta::default(),
                matcher: OrderMatcher::default(),
            }
        }

        /// Build and roll a shawarma with meat plus `extra` toppings
        fn wrap(&mut self, extra: &[Topping]) -> usize {
            self.pipeline.place_bread(&mut self.pool).unwrap();
            self.pipeline.add_topping(Topping::Meat, &mut self.pool, false).unwrap();
            for &topping in extra {
                self.pipeline.add_topping(topping, &mut self.pool, false).unwrap();
            }
            self.pipeline.roll(&mut self.pool).unwrap()
        }

        fn ready_side(&mut self, side: SideItem) {
            let ticket = self.sides.ticket_mut(side);
            ticket.take_container(&mut self.pool).unwrap();
            ticket.add_contents(&mut self.pool).unwrap();
        }

        fn serve(&mut self) -> Result<crate::core::matcher::Sale, StallError> {
            self.matcher.serve(
                &mut self.queue,
                &mut self.pipeline,
                &mut self.sides,
                &mut self.meta,
            )
        }
    }

    #[test]
    fn test_meat_only_price() {
        let matcher = OrderMatcher::default();
        let toppings = Toppings {
            meat: true,
            ..Toppings::default()
        };
        assert_eq!(matcher.shawarma_price(&toppings, false), 30);
        assert_eq!(matcher.shawarma_price(&toppings, true), 36);
    }

    #[test]
    fn test_fully_loaded_price_truncates_bonus() {
        let matcher = OrderMatcher::default();
        let toppings = Toppings {
            meat: true,
            cucumber: true,
            fries: true,
            ketchup: true,
            sauce: true,
        };
        assert_eq!(matcher.shawarma_price(&toppings, false), 43);
        // 43 * 20% = 8.6, truncated
        assert_eq!(matcher.shawarma_price(&toppings, true), 51);
    }

    #[test]
    fn test_plain_sale() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::plain(), 100);
        counter.wrap(&[]);

        let sale = counter.serve().unwrap();

        assert_eq!(sale.amount, 30);
        assert_eq!(sale.customer, 0);
        assert!(sale.receipt.starts_with("sale_"));
        assert_eq!(counter.meta.coins(), 30);
        assert!(counter.queue.front().unwrap().is_served());
        assert_eq!(counter.pipeline.wrap_area().occupied(), 0);
    }

    #[test]
    fn test_gold_plate_sale() {
        let mut counter = Counter::new();
        counter.meta.credit(50);
        counter
            .meta
            .purchase(Upgrade::GoldPlate, &Default::default())
            .unwrap();
        counter.queue.admit(Order::plain(), 100);
        counter.wrap(&[]);

        assert_eq!(counter.serve().unwrap().amount, 36);
        assert_eq!(counter.meta.coins(), 36);
    }

    #[test]
    fn test_no_sauce_never_matches_sauced_unit() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::no_sauce(), 100);
        counter.wrap(&[Topping::Sauce]);

        assert!(matches!(counter.serve(), Err(StallError::NoMatchingCustomer)));
        assert_eq!(counter.meta.coins(), 0);
        assert_eq!(counter.pipeline.wrap_area().occupied(), 1);
        assert!(!counter.queue.front().unwrap().is_served());
    }

    #[test]
    fn test_no_sauce_accepts_unsauced_unit() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::no_sauce(), 100);
        counter.wrap(&[Topping::Sauce]);
        counter.wrap(&[Topping::Cucumber]);

        let sale = counter.serve().unwrap();
        assert_eq!(sale.amount, 33);
        assert!(!sale.toppings.sauce);
        // the sauced unit in slot 0 is still waiting
        assert!(counter.pipeline.wrap_area().get(0).unwrap().toppings().sauce);
    }

    #[test]
    fn test_fries_not_ready_blocks_sale() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::with_fries(), 100);
        counter.wrap(&[]);

        let result = counter.serve();
        assert!(matches!(result, Err(StallError::PrepNotReady(SideItem::Fries))));
        assert_eq!(result.unwrap_err().to_string(), "fries not ready");
        assert_eq!(counter.meta.coins(), 0);
        assert_eq!(counter.pipeline.wrap_area().occupied(), 1);
        assert!(!counter.queue.front().unwrap().is_served());
    }

    #[test]
    fn test_not_ready_does_not_fall_through() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::with_drink(), 100);
        counter.queue.admit(Order::plain(), 100);
        counter.wrap(&[]);

        assert!(matches!(
            counter.serve(),
            Err(StallError::PrepNotReady(SideItem::Drink))
        ));
        assert!(!counter.queue.get(1).unwrap().is_served());
        assert_eq!(counter.meta.coins(), 0);
    }

    #[test]
    fn test_skips_customer_without_acceptable_unit() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::no_sauce(), 100);
        counter.queue.admit(Order::plain(), 100);
        counter.wrap(&[Topping::Sauce]);

        let sale = counter.serve().unwrap();
        assert_eq!(sale.customer, 1);
        assert!(!counter.queue.get(0).unwrap().is_served());
        assert!(counter.queue.get(1).unwrap().is_served());
    }

    #[test]
    fn test_side_items_priced_and_reset() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::with_fries(), 100);
        counter.queue.admit(Order::with_drink(), 100);
        counter.wrap(&[]);
        counter.wrap(&[]);
        counter.ready_side(SideItem::Fries);
        counter.ready_side(SideItem::Drink);

        assert_eq!(counter.serve().unwrap().amount, 38);
        assert_eq!(counter.sides.ticket(SideItem::Fries).state(), PrepState::Idle);
        assert_eq!(counter.sides.ticket(SideItem::Drink).state(), PrepState::Ready);

        assert_eq!(counter.serve().unwrap().amount, 36);
        assert_eq!(counter.sides.ticket(SideItem::Drink).state(), PrepState::Idle);
        assert_eq!(counter.meta.coins(), 74);
    }

    #[test]
    fn test_one_transaction_per_serve() {
        let mut counter = Counter::new();
        counter.queue.admit(Order::plain(), 100);
        counter.queue.admit(Order::plain(), 100);
        counter.wrap(&[]);
        counter.wrap(&[]);

        assert_eq!(counter.serve().unwrap().customer, 0);
        assert_eq!(counter.pipeline.wrap_area().occupied(), 1);
        assert_eq!(counter.serve().unwrap().customer, 1);
        assert!(matches!(counter.serve(), Err(StallError::NoMatchingCustomer)));
        assert_eq!(counter.meta.coins(), 60);
    }

    #[test]
    fn test_empty_queue() {
        let mut counter = Counter::new();
        counter.wrap(&[]);
        assert!(matches!(counter.serve(), Err(StallError::NoMatchingCustomer)));
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_overflowing() {
        let mut counter = Counter::new();
        counter.matcher = OrderMatcher::new(PriceList {
            base: u32::MAX,
            meat: u32::MAX,
            fries_side: u32::MAX,
            ..PriceList::default()
        });
        counter.meta.credit(u32::MAX);
        counter.queue.admit(Order::with_fries(), 100);
        counter.wrap(&[]);
        counter.ready_side(SideItem::Fries);

        let sale = counter.serve().unwrap();
        assert_eq!(sale.amount, u32::MAX);
        assert_eq!(counter.meta.coins(), u32::MAX);

        let toppings = Toppings {
            meat: true,
            ..Toppings::default()
        };
        assert_eq!(counter.matcher.shawarma_price(&toppings, true), u32::MAX);
    }
}
