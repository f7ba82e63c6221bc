pub mod backup;
pub mod calculator;
pub mod config;
pub mod entries;
pub mod export;
pub mod holiday;
pub mod leave;
pub mod overlap;
pub mod session;
pub mod sick;
pub mod summary;
pub mod vacation;
