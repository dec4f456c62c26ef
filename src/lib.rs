pub mod cli;
pub mod composer;
pub mod config;
pub mod errors;
pub mod git;
pub mod menu;
pub mod utils;
