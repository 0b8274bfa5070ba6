pub mod core;

// Re-export commonly used types
pub use crate::core::config::StallConfig;
pub use crate::core::errors::{StallError, StallResult};
pub use crate::core::frontend::{DayRunner, DayView, InputSource, Renderer};
pub use crate::core::rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use crate::core::session::{Command, DayReport, DaySession, Stall};
pub use crate::core::types::{Resource, SideItem, Topping, Upgrade};
