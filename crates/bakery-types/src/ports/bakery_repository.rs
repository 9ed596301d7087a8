use std::cmp::Ordering;

use async_trait::async_trait;

use crate::domain::baked_good::{BakedGood, NewBakedGood};
use crate::domain::bakery::{Bakery, NewBakery};

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),

    #[error("bakery {0} does not exist")]
    MissingBakery(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BakedGoodKey {
    Price,
    Name,
    CreatedAt,
}

impl BakedGoodKey {
    pub fn column(self) -> &'static str {
        match self {
            BakedGoodKey::Price => "price",
            BakedGoodKey::Name => "name",
            BakedGoodKey::CreatedAt => "created_at",
        }
    }
}

/// Ordering for baked-good queries. Equal keys fall back to `id` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub key: BakedGoodKey,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn new(key: BakedGoodKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn price_desc() -> Self {
        Self::new(BakedGoodKey::Price, SortDirection::Descending)
    }

    /// In-process comparator matching the SQL `ORDER BY <key> <dir>, id ASC`.
    pub fn compare(&self, a: &BakedGood, b: &BakedGood) -> Ordering {
        let primary = match self.key {
            BakedGoodKey::Price => a.price.total_cmp(&b.price),
            BakedGoodKey::Name => a.name.cmp(&b.name),
            BakedGoodKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let primary = match self.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    pub fn sql(&self) -> String {
        let dir = match self.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        format!("{} {}, id ASC", self.key.column(), dir)
    }
}

/// Read side consumed by the HTTP service.
#[async_trait]
pub trait BakeryRepository: Send + Sync + 'static {
    async fn get_bakery(&self, id: i64) -> Result<Option<Bakery>, RepoError>;
    /// All bakeries in id order.
    async fn list_bakeries(&self) -> Result<Vec<Bakery>, RepoError>;
    async fn list_baked_goods(&self, order: OrderBy) -> Result<Vec<BakedGood>, RepoError>;
    async fn first_baked_good(&self, order: OrderBy) -> Result<Option<BakedGood>, RepoError>;
}

/// Insert side used by seeding and tests; never reachable over HTTP.
#[async_trait]
pub trait SeedRepository: Send + Sync + 'static {
    async fn add_bakery(&self, bakery: NewBakery) -> Result<Bakery, RepoError>;
    async fn add_baked_good(&self, good: NewBakedGood) -> Result<BakedGood, RepoError>;
}
