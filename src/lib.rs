#[cfg(test)]
mod tests;

pub mod analytics_core;
pub mod config;
pub mod feed;
pub mod sink;

pub use analytics_core::{Dispatcher, Event};
pub use config::Config;
