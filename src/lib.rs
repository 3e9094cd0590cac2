pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod names;
pub mod participant;
pub mod read;
pub mod report;
pub mod rng;
pub mod verify;
pub mod write;

pub use error::{Error, Result};
