//! Traits for persisted entities
//!
//! [`Entity`] describes a table, [`EntityStore`] the operations a
//! repository offers over it.

pub mod entity;
pub mod store;

pub use entity::Entity;
pub use store::EntityStore;
