//! Helpers shared by the API commands

pub mod logging;
pub mod params;
