//! Shawarma production pipeline.
//!
//! A unit moves open -> wrapped -> grilling -> done. The pipeline holds at most one
//! open unit plus two fixed areas of three slots each: the wrap area (wrapped or
//! finished units waiting to be served) and the grill.

use log::{debug, info};

use super::errors::{StallError, StallResult};
use super::resources::ResourcePool;
use super::slots::SlotArray;
use super::types::{Area, Resource, Topping};

pub const WRAP_SLOTS: usize = 3;
pub const GRILL_SLOTS: usize = 3;

/// Topping flags of a single shawarma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toppings {
    pub meat: bool,
    pub cucumber: bool,
    pub fries: bool,
    pub ketchup: bool,
    pub sauce: bool,
}

impl Toppings {
    pub fn has(&self, topping: Topping) -> bool {
        match topping {
            Topping::Meat => self.meat,
            Topping::Cucumber => self.cucumber,
            Topping::Fries => self.fries,
            Topping::Ketchup => self.ketchup,
            Topping::Sauce => self.sauce,
        }
    }

    fn set(&mut self, topping: Topping) {
        match topping {
            Topping::Meat => self.meat = true,
            Topping::Cucumber => self.cucumber = true,
            Topping::Fries => self.fries = true,
            Topping::Ketchup => self.ketchup = true,
            Topping::Sauce => self.sauce = true,
        }
    }

    /// Short human readable list, e.g. `meat cucumber no-sauce`
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = Topping::CYCLE
            .iter()
            .filter(|&&t| t != Topping::Sauce && self.has(t))
            .map(|t| t.to_string())
            .collect();
        if !self.sauce {
            parts.push("no-sauce".to_string());
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStage {
    Open,
    Wrapped,
    Grilling { elapsed: u32, needed: u32 },
    Done,
}

/// One shawarma somewhere in the pipeline.
///
/// Stage changes go through the transition methods below, which return the next
/// unit instead of mutating so a refused transition leaves the pipeline untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShawarmaUnit {
    stage: UnitStage,
    toppings: Toppings,
}

impl ShawarmaUnit {
    /// Fresh flatbread with nothing on it, not even sauce
    pub fn open() -> Self {
        Self {
            stage: UnitStage::Open,
            toppings: Toppings::default(),
        }
    }

    pub fn stage(&self) -> UnitStage {
        self.stage
    }

    pub fn toppings(&self) -> &Toppings {
        &self.toppings
    }

    /// Wrapped or done units can be handed to a customer
    pub fn is_servable(&self) -> bool {
        matches!(self.stage, UnitStage::Wrapped | UnitStage::Done)
    }

    /// Seconds on the grill so far, only while grilling
    pub fn grill_time(&self) -> Option<u32> {
        match self.stage {
            UnitStage::Grilling { elapsed, .. } => Some(elapsed),
            _ => None,
        }
    }

    pub fn with_topping(&self, topping: Topping) -> StallResult<Self> {
        if self.stage != UnitStage::Open {
            return Err(StallError::InvalidState("toppings go on an open flatbread".into()));
        }
        let mut next = *self;
        next.toppings.set(topping);
        Ok(next)
    }

    /// Open -> Wrapped, meat is mandatory
    pub fn wrapped(&self) -> StallResult<Self> {
        if self.stage != UnitStage::Open {
            return Err(StallError::InvalidState("only an open flatbread can be rolled".into()));
        }
        if !self.toppings.meat {
            return Err(StallError::MissingRequiredTopping(Topping::Meat));
        }
        Ok(Self {
            stage: UnitStage::Wrapped,
            ..*self
        })
    }

    /// Wrapped -> Grilling with the timer at zero
    pub fn grilling(&self, needed: u32) -> StallResult<Self> {
        if self.stage != UnitStage::Wrapped {
            return Err(StallError::InvalidState("only a wrapped shawarma can be grilled".into()));
        }
        Ok(Self {
            stage: UnitStage::Grilling { elapsed: 0, needed },
            ..*self
        })
    }

    /// Advance the grill timer by one second. Returns true when this tick finished it.
    pub fn grill_tick(&mut self) -> bool {
        if let UnitStage::Grilling { elapsed, needed } = self.stage {
            let elapsed = elapsed + 1;
            if elapsed >= needed {
                self.stage = UnitStage::Done;
                return true;
            }
            self.stage = UnitStage::Grilling { elapsed, needed };
        }
        false
    }
}

pub struct ProductionPipeline {
    open: Option<ShawarmaUnit>,
    wrap_area: SlotArray<ShawarmaUnit, WRAP_SLOTS>,
    grill: SlotArray<ShawarmaUnit, GRILL_SLOTS>,
    grill_secs: u32,
}

impl ProductionPipeline {
    pub fn new(grill_secs: u32) -> Self {
        Self {
            open: None,
            wrap_area: SlotArray::new(),
            grill: SlotArray::new(),
            grill_secs,
        }
    }

    pub fn open_unit(&self) -> Option<&ShawarmaUnit> {
        self.open.as_ref()
    }

    pub fn wrap_area(&self) -> &SlotArray<ShawarmaUnit, WRAP_SLOTS> {
        &self.wrap_area
    }

    pub fn grill(&self) -> &SlotArray<ShawarmaUnit, GRILL_SLOTS> {
        &self.grill
    }

    /// Empty -> Open, using one bread
    pub fn place_bread(&mut self, pool: &mut ResourcePool) -> StallResult<()> {
        if self.open.is_some() {
            return Err(StallError::AlreadyOpen);
        }
        pool.consume(Resource::Bread, 1)
            .map_err(|_| StallError::NoBread)?;
        self.open = Some(ShawarmaUnit::open());
        debug!("[Pipeline] Flatbread placed");
        Ok(())
    }

    /// Put a topping on the open unit.
    ///
    /// With `auto_meat` the meat stock refills to its maximum whenever it is empty,
    /// so adding meat never runs short.
    pub fn add_topping(
        &mut self,
        topping: Topping,
        pool: &mut ResourcePool,
        auto_meat: bool,
    ) -> StallResult<()> {
        let open = self.open.as_ref().ok_or_else(no_open_unit)?;
        let next = open.with_topping(topping)?;
        let resource = topping.resource();
        let auto_refill = auto_meat && topping == Topping::Meat;

        if auto_refill && pool.count(resource) == 0 {
            pool.fill(resource);
        }
        pool.consume(resource, 1)?;
        if auto_refill && pool.count(resource) == 0 {
            pool.fill(resource);
        }

        self.open = Some(next);
        debug!("[Pipeline] Added {}", topping);
        Ok(())
    }

    /// Open -> Wrapped into the lowest free wrap slot, using one wrap paper.
    /// Returns the slot index.
    pub fn roll(&mut self, pool: &mut ResourcePool) -> StallResult<usize> {
        let open = self.open.as_ref().ok_or_else(no_open_unit)?;
        let wrapped = open.wrapped()?;
        if !pool.can_consume(Resource::WrapPaper, 1) {
            return Err(StallError::InsufficientResource(Resource::WrapPaper));
        }
        if self.wrap_area.is_full() {
            return Err(StallError::SlotFull(Area::Wrap));
        }

        pool.consume(Resource::WrapPaper, 1)?;
        let slot = self
            .wrap_area
            .insert(wrapped)
            .map_err(|_| StallError::SlotFull(Area::Wrap))?;
        self.open = None;
        info!("[Pipeline] Rolled shawarma into wrap slot {}", slot);
        Ok(slot)
    }

    /// Move the first wrapped unit onto the first free grill slot. Returns the grill slot.
    pub fn to_grill(&mut self) -> StallResult<usize> {
        let from = self
            .wrap_area
            .position(|unit| unit.stage() == UnitStage::Wrapped)
            .ok_or(StallError::NoGrillSlotOrNothingToGrill)?;
        if self.grill.is_full() {
            return Err(StallError::NoGrillSlotOrNothingToGrill);
        }
        let grilling = match self.wrap_area.get(from) {
            Some(unit) => unit.grilling(self.grill_secs)?,
            None => return Err(StallError::NoGrillSlotOrNothingToGrill),
        };

        let to = self
            .grill
            .insert(grilling)
            .map_err(|_| StallError::NoGrillSlotOrNothingToGrill)?;
        self.wrap_area.take(from);
        debug!("[Pipeline] Wrap slot {} -> grill slot {}", from, to);
        Ok(to)
    }

    /// Move the first finished unit off the grill into a free wrap slot. Returns the wrap slot.
    pub fn take_from_grill(&mut self) -> StallResult<usize> {
        let from = self
            .grill
            .position(|unit| unit.stage() == UnitStage::Done)
            .ok_or(StallError::NothingToTakeFromGrill)?;
        if self.wrap_area.is_full() {
            return Err(StallError::SlotFull(Area::Wrap));
        }
        let unit = self
            .grill
            .take(from)
            .ok_or(StallError::NothingToTakeFromGrill)?;
        let to = self
            .wrap_area
            .insert(unit)
            .map_err(|_| StallError::SlotFull(Area::Wrap))?;
        debug!("[Pipeline] Grill slot {} -> wrap slot {}", from, to);
        Ok(to)
    }

    /// Advance every grilling unit by one second. Returns how many finished.
    pub fn tick(&mut self) -> usize {
        let mut finished = 0;
        for unit in self.grill.iter_mut() {
            if unit.grill_tick() {
                finished += 1;
            }
        }
        if finished > 0 {
            info!("[Pipeline] {} shawarma finished grilling", finished);
        }
        finished
    }

    /// First servable wrap-area unit accepted by `accept`
    pub fn find_servable<F>(&self, mut accept: F) -> Option<usize>
    where
        F: FnMut(&ShawarmaUnit) -> bool,
    {
        self.wrap_area
            .position(|unit| unit.is_servable() && accept(unit))
    }

    /// Remove a unit from the wrap area for a customer
    pub fn hand_over(&mut self, slot: usize) -> Option<ShawarmaUnit> {
        self.wrap_area.take(slot)
    }
}

fn no_open_unit() -> StallError {
    StallError::InvalidState("place a flatbread first".into())
}
