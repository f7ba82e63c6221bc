pub mod add;
pub mod amend;
pub mod backup;
pub mod config;
pub mod del;
pub mod export;
pub mod holidays;
pub mod init;
pub mod list;
pub mod pause;
pub mod resume;
pub mod sick;
pub mod start;
pub mod stop;
pub mod summary;
pub mod timer;
pub mod vacation;
