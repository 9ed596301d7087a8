#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use bakery_types::domain::baked_good::{BakedGood, NewBakedGood};
use bakery_types::domain::bakery::{Bakery, NewBakery};
use bakery_types::ports::bakery_repository::{
    BakeryRepository, OrderBy, RepoError, SeedRepository,
};

#[cfg(feature = "memory")]
pub mod memory;
pub mod seed;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

/// Storage chosen at startup by [`build_repo`].
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self::Memory(memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or(DEFAULT_DATABASE_URL);
        Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?))
    }

    // With both adapters compiled in, a database url picks SQLite.
    #[cfg(all(feature = "sqlite", feature = "memory"))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        match database_url {
            Some(url) => Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?)),
            None => Ok(Self::Memory(memory::InMemoryRepo::new())),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait::async_trait]
impl BakeryRepository for Repo {
    async fn get_bakery(&self, id: i64) -> Result<Option<Bakery>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(r) => r.get_bakery(id).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.get_bakery(id).await,
        }
    }

    async fn list_bakeries(&self) -> Result<Vec<Bakery>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(r) => r.list_bakeries().await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.list_bakeries().await,
        }
    }

    async fn list_baked_goods(&self, order: OrderBy) -> Result<Vec<BakedGood>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(r) => r.list_baked_goods(order).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.list_baked_goods(order).await,
        }
    }

    async fn first_baked_good(&self, order: OrderBy) -> Result<Option<BakedGood>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(r) => r.first_baked_good(order).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.first_baked_good(order).await,
        }
    }
}

#[async_trait::async_trait]
impl SeedRepository for Repo {
    async fn add_bakery(&self, bakery: NewBakery) -> Result<Bakery, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(r) => r.add_bakery(bakery).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.add_bakery(bakery).await,
        }
    }

    async fn add_baked_good(&self, good: NewBakedGood) -> Result<BakedGood, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(r) => r.add_baked_good(good).await,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(r) => r.add_baked_good(good).await,
        }
    }
}
