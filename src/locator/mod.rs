//! Element location: strategies, chains, and the resolver

pub mod resolver;
pub mod strategy;

pub use resolver::LocatorResolver;
pub use strategy::{LocatorChain, LocatorStrategy, TextMatch};
