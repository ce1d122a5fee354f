pub mod args;
pub mod calc;
pub mod commands;
mod config;
mod error;
pub mod model;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Result;
