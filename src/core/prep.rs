use log::debug;

use super::errors::{StallError, StallResult};
use super::resources::ResourcePool;
use super::types::SideItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrepState {
    #[default]
    Idle,
    /// Container taken, waiting for contents
    Taken,
    Ready,
}

/// Two-step preparation of one side item.
///
/// The shop keeps a single ticket per side item, shared by every customer: a second
/// order for the same side cannot start until the current one is sold.
#[derive(Debug, Clone)]
pub struct PrepTicket {
    item: SideItem,
    state: PrepState,
}

impl PrepTicket {
    pub fn new(item: SideItem) -> Self {
        Self {
            item,
            state: PrepState::Idle,
        }
    }

    pub fn state(&self) -> PrepState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == PrepState::Ready
    }

    /// Waiting for contents
    pub fn in_progress(&self) -> bool {
        self.state == PrepState::Taken
    }

    /// Idle -> Taken, consuming one container
    pub fn take_container(&mut self, pool: &mut ResourcePool) -> StallResult<()> {
        if self.state != PrepState::Idle {
            return Err(StallError::AlreadyInProgress(self.item));
        }
        pool.consume(self.item.container(), 1)?;
        self.state = PrepState::Taken;
        debug!("[Prep:{}] Container taken", self.item);
        Ok(())
    }

    /// Taken -> Ready, consuming one portion of contents
    pub fn add_contents(&mut self, pool: &mut ResourcePool) -> StallResult<()> {
        if self.state != PrepState::Taken {
            return Err(StallError::ContainerNotTaken(self.item));
        }
        pool.consume(self.item.filling(), 1)?;
        self.state = PrepState::Ready;
        debug!("[Prep:{}] Ready", self.item);
        Ok(())
    }

    /// Hand over a ready side item at checkout, resetting the ticket to idle
    pub fn consume(&mut self) -> StallResult<()> {
        if self.state != PrepState::Ready {
            return Err(StallError::PrepNotReady(self.item));
        }
        self.state = PrepState::Idle;
        Ok(())
    }
}

/// The shop-wide fries and drink tickets
#[derive(Debug, Clone)]
pub struct SideStation {
    fries: PrepTicket,
    drink: PrepTicket,
}

impl SideStation {
    pub fn new() -> Self {
        Self {
            fries: PrepTicket::new(SideItem::Fries),
            drink: PrepTicket::new(SideItem::Drink),
        }
    }

    pub fn ticket(&self, item: SideItem) -> &PrepTicket {
        match item {
            SideItem::Fries => &self.fries,
            SideItem::Drink => &self.drink,
        }
    }

    pub fn ticket_mut(&mut self, item: SideItem) -> &mut PrepTicket {
        match item {
            SideItem::Fries => &mut self.fries,
            SideItem::Drink => &mut self.drink,
        }
    }

    /// Side item whose container is waiting for contents, fries first
    pub fn pending_fill(&self) -> Option<SideItem> {
        [SideItem::Fries, SideItem::Drink]
            .into_iter()
            .find(|&item| self.ticket(item).in_progress())
    }
}

impl Default for SideStation {
    fn default() -> Self {
        Self::new()
    }
}
