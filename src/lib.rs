pub mod cache;
pub mod cli;
pub mod command;
pub mod config;
pub mod dependency;
pub mod error;
pub mod file_loader;
pub mod remote;
pub mod resolver;
mod result;

pub use result::Result;
