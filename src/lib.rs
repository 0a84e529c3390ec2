pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod types;

pub use error::{FailureKind, VaultError};
