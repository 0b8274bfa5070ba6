pub mod clock;
pub mod config;
pub mod customers;
pub mod errors;
pub mod frontend;
pub mod matcher;
pub mod prep;
pub mod production;
pub mod resources;
pub mod rng;
pub mod schedule;
pub mod session;
pub mod shop;
pub mod slots;
pub mod types;

#[cfg(test)]
mod tests;
