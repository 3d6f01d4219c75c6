pub mod add;
pub mod config;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod remind;
pub mod remove;
pub mod watch;
