#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod cli;
pub use cli::{Cli, Commands, ListFilter};

mod config;
pub use config::AppConfig;

mod run;
pub use run::run;
