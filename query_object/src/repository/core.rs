use crate::query_builder::{EntityPath, SelectQuery};
use crate::session::Session;
use crate::traits::Entity;
use crate::DbPool;
use config::QueryConfig;
use std::marker::PhantomData;

/// Generic repository over one entity table
#[derive(Clone)]
pub struct Repository<T: Entity> {
    pub(crate) db_pool: DbPool,
    pub(crate) config: QueryConfig,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T: Entity> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &T::table_name())
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(db_pool: DbPool) -> Self {
        Self::with_config(db_pool, QueryConfig::default())
    }

    pub fn with_config(db_pool: DbPool, config: QueryConfig) -> Self {
        Self {
            db_pool,
            config,
            _phantom: PhantomData,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.db_pool
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// A session over this repository's pool and settings
    pub fn session(&self) -> Session<'_> {
        Session::with_config(&self.db_pool, self.config.clone())
    }

    pub fn path(&self) -> EntityPath {
        T::path()
    }

    /// `SELECT alias.* FROM table alias`, ready for further filtering
    pub fn select(&self) -> SelectQuery {
        T::select_all()
    }
}
