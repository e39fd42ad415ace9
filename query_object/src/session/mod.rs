//! Query execution against a PostgreSQL pool

mod binding;
pub mod core;

pub use self::core::Session;
