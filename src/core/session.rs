//! Day orchestration.
//!
//! [`Stall`] owns everything that survives between days. Each day borrows it through a
//! [`DaySession`], which owns the day-scoped pipeline, side tickets, queue and clock and
//! throws them away when it is dropped.

use log::{debug, info, warn};

use super::clock::DayClock;
use super::config::StallConfig;
use super::customers::{Customer, CustomerQueue};
use super::errors::{StallError, StallResult};
use super::frontend::DayView;
use super::matcher::{OrderMatcher, Sale};
use super::prep::SideStation;
use super::production::ProductionPipeline;
use super::resources::{ResourcePool, Restock};
use super::rng::{RandomSource, SeededRandom};
use super::schedule::RoundRobin;
use super::shop::ShopMeta;
use super::types::{CustomerId, Resource, SideItem, Topping, Upgrade};

/// Single-key commands accepted during the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlaceBread,
    /// Fills a side item waiting for contents, otherwise the next topping in the cycle
    AddTopping,
    Roll,
    ToGrill,
    TakeFromGrill,
    Serve,
    TakeFriesBox,
    TakeDrinkCup,
    Restock,
    RefillMeat,
    ProcessPotato,
    FryPotato,
    EndDay,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key.to_ascii_lowercase() {
            'b' => Command::PlaceBread,
            'i' => Command::AddTopping,
            'r' => Command::Roll,
            'g' => Command::ToGrill,
            't' => Command::TakeFromGrill,
            's' => Command::Serve,
            'f' => Command::TakeFriesBox,
            'c' => Command::TakeDrinkCup,
            'p' => Command::Restock,
            'm' => Command::RefillMeat,
            'd' => Command::ProcessPotato,
            'j' => Command::FryPotato,
            'q' => Command::EndDay,
            _ => return None,
        };
        Some(command)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayStats {
    pub arrived: u32,
    pub served: u32,
    pub walked_out: u32,
    pub coins_earned: u32,
    pub sales: Vec<Sale>,
}

/// Summary handed back when a day closes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub day: u32,
    pub seconds_elapsed: u32,
    pub ended_early: bool,
    pub coins_total: u32,
    pub stats: DayStats,
}

/// What happened during one game-second
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub finished_grilling: usize,
    pub arrival: Option<CustomerId>,
    pub departed: Vec<Customer>,
}

/// Process-lifetime shop state
pub struct Stall {
    config: StallConfig,
    meta: ShopMeta,
    pool: ResourcePool,
}

impl Stall {
    pub fn new(config: StallConfig) -> StallResult<Self> {
        config.validate()?;
        Ok(Self {
            meta: ShopMeta::new(&config.customers),
            pool: ResourcePool::new(&config.inventory),
            config,
        })
    }

    pub fn config(&self) -> &StallConfig {
        &self.config
    }

    pub fn meta(&self) -> &ShopMeta {
        &self.meta
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ResourcePool {
        &mut self.pool
    }

    #[cfg(test)]
    pub(crate) fn meta_mut(&mut self) -> &mut ShopMeta {
        &mut self.meta
    }

    pub fn purchase(&mut self, upgrade: Upgrade) -> StallResult<()> {
        self.meta.purchase(upgrade, &self.config.upgrades)
    }

    /// Start the next day with the given randomness source
    pub fn open_day<R: RandomSource>(&mut self, rng: R) -> DaySession<'_, R> {
        let day = self.meta.begin_day();
        DaySession::new(day, &self.config, &mut self.meta, &mut self.pool, rng)
    }

    /// Start the next day with the configured seed, offset by the day number so
    /// consecutive days differ
    pub fn open_seeded_day(&mut self) -> DaySession<'_, SeededRandom> {
        let seed = self
            .config
            .random_seed
            .map(|seed| seed.wrapping_add(self.meta.day() as u64 + 1));
        self.open_day(SeededRandom::from_seed_option(seed))
    }
}

/// One trading day.
///
/// Per game-second the grill advances first, then an arrival may be rolled, then
/// every waiting customer loses patience and finished customers leave from the front.
/// Commands run after the tick within the same frame.
pub struct DaySession<'a, R: RandomSource> {
    day: u32,
    config: &'a StallConfig,
    meta: &'a mut ShopMeta,
    pool: &'a mut ResourcePool,
    pipeline: ProductionPipeline,
    sides: SideStation,
    queue: CustomerQueue,
    clock: DayClock,
    matcher: OrderMatcher,
    rng: R,
    topping_cycle: RoundRobin<Topping>,
    restock_cycle: RoundRobin<Restock>,
    message: String,
    ended_early: bool,
    stats: DayStats,
}

impl<'a, R: RandomSource> DaySession<'a, R> {
    pub fn new(
        day: u32,
        config: &'a StallConfig,
        meta: &'a mut ShopMeta,
        pool: &'a mut ResourcePool,
        rng: R,
    ) -> Self {
        info!(
            "[Day {}] Opening with {} coins, capacity {}",
            day,
            meta.coins(),
            meta.capacity()
        );
        Self {
            day,
            config,
            meta,
            pool,
            pipeline: ProductionPipeline::new(config.grill.grill_secs),
            sides: SideStation::new(),
            queue: CustomerQueue::new(),
            clock: DayClock::new(&config.day),
            matcher: OrderMatcher::new(config.prices.clone()),
            rng,
            topping_cycle: RoundRobin::new(Topping::CYCLE),
            restock_cycle: RoundRobin::new(Restock::CYCLE),
            message: String::new(),
            ended_early: false,
            stats: DayStats::default(),
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn meta(&self) -> &ShopMeta {
        &*self.meta
    }

    pub fn pool(&self) -> &ResourcePool {
        &*self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ResourcePool {
        &mut *self.pool
    }

    pub fn pipeline(&self) -> &ProductionPipeline {
        &self.pipeline
    }

    pub fn sides(&self) -> &SideStation {
        &self.sides
    }

    pub fn queue(&self) -> &CustomerQueue {
        &self.queue
    }

    /// Direct queue access for scripted scenarios
    pub fn queue_mut(&mut self) -> &mut CustomerQueue {
        &mut self.queue
    }

    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    pub fn stats(&self) -> &DayStats {
        &self.stats
    }

    /// Status line left by the last command
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Next topping the topping command will add
    pub fn next_topping(&self) -> Topping {
        self.topping_cycle.current()
    }

    pub fn next_restock(&self) -> Restock {
        self.restock_cycle.current()
    }

    pub fn is_over(&self) -> bool {
        self.ended_early || self.clock.is_over()
    }

    pub fn view(&self) -> DayView<'_> {
        DayView {
            day: self.day,
            remaining_secs: self.clock.remaining(),
            meta: &*self.meta,
            pool: &*self.pool,
            pipeline: &self.pipeline,
            sides: &self.sides,
            queue: &self.queue,
            next_topping: self.topping_cycle.current(),
            message: &self.message,
        }
    }

    /// Advance the simulation by one game-second
    pub fn tick_second(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome {
            finished_grilling: self.pipeline.tick(),
            ..TickOutcome::default()
        };

        let config: &'a StallConfig = self.config;
        let customers = &config.customers;
        let occupancy = self.queue.len() as u32;
        if occupancy < self.meta.capacity().saturating_add(customers.spawn_overflow)
            && self.rng.chance(customers.spawn_chance_percent)
        {
            outcome.arrival = self
                .queue
                .spawn(self.meta.capacity(), &mut self.rng, customers);
            if outcome.arrival.is_some() {
                self.stats.arrived += 1;
            }
        }

        self.queue.decay_patience();
        outcome.departed = self.queue.evict_front();
        self.stats.walked_out += outcome.departed.iter().filter(|c| !c.is_served()).count() as u32;

        self.clock.tick_second();
        debug!(
            "[Day {}] {}s left, {} in queue",
            self.day,
            self.clock.remaining(),
            self.queue.len()
        );
        if self.clock.is_over() {
            info!("[Day {}] Time is up", self.day);
        }
        outcome
    }

    /// One render frame: a due game-second first, then the command.
    /// Returns false once the day is over.
    pub fn frame(&mut self, command: Option<Command>) -> bool {
        if self.is_over() {
            return false;
        }
        if self.clock.advance_frame() {
            self.tick_second();
        }
        if let Some(command) = command {
            if !self.is_over() {
                // failures are already reported through the status message
                let _ = self.execute(command);
            }
        }
        !self.is_over()
    }

    /// Run a command and record its outcome as the status message
    pub fn execute(&mut self, command: Command) -> StallResult<()> {
        match self.apply(command) {
            Ok(message) => {
                self.message = message;
                Ok(())
            }
            Err(err) => {
                warn!("[Day {}] {:?} refused: {}", self.day, command, err);
                self.message = err.to_string();
                Err(err)
            }
        }
    }

    fn apply(&mut self, command: Command) -> StallResult<String> {
        if self.is_over() {
            return Err(StallError::DayOver);
        }
        match command {
            Command::PlaceBread => {
                self.pipeline.place_bread(self.pool)?;
                Ok("flatbread placed".to_string())
            }
            Command::AddTopping => self.add_topping(),
            Command::Roll => {
                let slot = self.pipeline.roll(self.pool)?;
                Ok(format!("rolled into wrap slot {}", slot + 1))
            }
            Command::ToGrill => {
                let slot = self.pipeline.to_grill()?;
                Ok(format!("on the grill at position {}", slot + 1))
            }
            Command::TakeFromGrill => {
                let slot = self.pipeline.take_from_grill()?;
                Ok(format!("grilled shawarma moved to wrap slot {}", slot + 1))
            }
            Command::Serve => self.serve(),
            Command::TakeFriesBox => self.take_container(SideItem::Fries),
            Command::TakeDrinkCup => self.take_container(SideItem::Drink),
            Command::Restock => {
                let entry = self.restock_cycle.advance();
                self.pool.restock(entry);
                Ok(format!("restocked {}", entry.resource()))
            }
            Command::RefillMeat => {
                if self.meta.has(Upgrade::AutoMeat) {
                    return Ok("the auto slicer keeps the meat stocked".to_string());
                }
                let step = self.pool.restock_step();
                self.pool.resupply(Resource::Meat, step);
                Ok("sliced meat".to_string())
            }
            Command::ProcessPotato => {
                let step = self.pool.restock_step();
                self.pool.resupply(Resource::Potato, step);
                Ok("cut potatoes".to_string())
            }
            Command::FryPotato => {
                self.pool.consume(Resource::Potato, 1)?;
                self.pool.resupply(Resource::Fries, 1);
                Ok("fried a portion of fries".to_string())
            }
            Command::EndDay => {
                self.ended_early = true;
                info!("[Day {}] Closing early", self.day);
                Ok("closing early".to_string())
            }
        }
    }

    fn add_topping(&mut self) -> StallResult<String> {
        if let Some(side) = self.sides.pending_fill() {
            self.sides.ticket_mut(side).add_contents(self.pool)?;
            return Ok(format!("{} ready", side));
        }
        // the cursor moves on even when the topping is refused
        let topping = self.topping_cycle.advance();
        self.pipeline
            .add_topping(topping, self.pool, self.meta.has(Upgrade::AutoMeat))?;
        Ok(format!("added {}", topping))
    }

    fn take_container(&mut self, side: SideItem) -> StallResult<String> {
        self.sides.ticket_mut(side).take_container(self.pool)?;
        Ok(format!("took a {}", side.container()))
    }

    fn serve(&mut self) -> StallResult<String> {
        let sale = self.matcher.serve(
            &mut self.queue,
            &mut self.pipeline,
            &mut self.sides,
            self.meta,
        )?;
        let message = format!("sale complete +{}", sale.amount);
        self.stats.served += 1;
        self.stats.coins_earned = self.stats.coins_earned.saturating_add(sale.amount);
        self.stats.sales.push(sale);
        Ok(message)
    }

    /// Close the day, dropping whatever is still in production or waiting
    pub fn finish(self) -> DayReport {
        let report = DayReport {
            day: self.day,
            seconds_elapsed: self.clock.elapsed(),
            ended_early: self.ended_early,
            coins_total: self.meta.coins(),
            stats: self.stats,
        };
        info!(
            "[Day {}] Closed after {}s: {} served, {} walked out, +{} coins ({} total)",
            report.day,
            report.seconds_elapsed,
            report.stats.served,
            report.stats.walked_out,
            report.stats.coins_earned,
            report.coins_total
        );
        report
    }
}
