//! Entity repositories
//!
//! [`Repository`] implements [`EntityStore`](crate::traits::EntityStore) for
//! any [`Entity`](crate::traits::Entity) on top of a [`Session`](crate::session::Session).

pub mod core;
pub mod entity_store;

pub use self::core::Repository;
