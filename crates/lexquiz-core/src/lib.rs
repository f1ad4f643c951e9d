pub mod chat;
pub mod config;
pub mod db;
pub mod format;
pub mod knowledge;
pub mod provider;
pub mod types;

pub use types::*;
