use super::types::{Area, Resource, SideItem, Topping, Upgrade};

/// Failures reported by stall commands.
///
/// None of these are fatal: the day session renders them as the transient status
/// message and the state is left exactly as it was before the command.
#[derive(Debug, thiserror::Error)]
pub enum StallError {
    #[error("not enough {0}")]
    InsufficientResource(Resource),
    #[error("no bread left")]
    NoBread,
    #[error("a flatbread is already open")]
    AlreadyOpen,
    #[error("{0}")]
    InvalidState(String),
    #[error("needs at least {0}")]
    MissingRequiredTopping(Topping),
    #[error("{0} is full")]
    SlotFull(Area),
    #[error("nothing to grill or grill is full")]
    NoGrillSlotOrNothingToGrill,
    #[error("nothing finished on the grill")]
    NothingToTakeFromGrill,
    #[error("{0} not ready")]
    PrepNotReady(SideItem),
    #[error("{0} already in progress or ready")]
    AlreadyInProgress(SideItem),
    #[error("take a {} first", .0.container())]
    ContainerNotTaken(SideItem),
    #[error("no matching customer")]
    NoMatchingCustomer,
    #[error("{0} already purchased")]
    AlreadyPurchased(Upgrade),
    #[error("needs {needed} coins, have {available}")]
    InsufficientCoins { needed: u32, available: u32 },
    #[error("the day is over")]
    DayOver,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type StallResult<T> = Result<T, StallError>;
