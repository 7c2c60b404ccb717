#[macro_use]
pub mod analyzers_utils;
pub mod players;
pub mod team;
mod winratio;

pub use winratio::HeroTally;
