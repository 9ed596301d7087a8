use async_trait::async_trait;
use bakery_types::domain::baked_good::{BakedGood, NewBakedGood};
use bakery_types::domain::bakery::{Bakery, NewBakery};
use bakery_types::domain::timestamp;
use bakery_types::ports::bakery_repository::{
    BakeryRepository, OrderBy, RepoError, SeedRepository,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

const MIGRATIONS: [&str; 2] = [
    include_str!("../migrations/0001_create_bakeries.sql"),
    include_str!("../migrations/0002_create_baked_goods.sql"),
];

// SQLITE_CONSTRAINT_FOREIGNKEY
const FOREIGN_KEY_VIOLATION: &str = "787";

pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbBakery {
    id: i64,
    name: String,
    created_at: String,
}

impl DbBakery {
    fn into_bakery(self) -> Result<Bakery, RepoError> {
        let created_at =
            timestamp::parse(&self.created_at).map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(Bakery {
            id: self.id,
            name: self.name,
            created_at,
        })
    }
}

#[derive(FromRow)]
struct DbBakedGood {
    id: i64,
    name: String,
    price: f64,
    created_at: String,
    bakery_id: Option<i64>,
}

impl DbBakedGood {
    fn into_baked_good(self) -> Result<BakedGood, RepoError> {
        let created_at =
            timestamp::parse(&self.created_at).map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(BakedGood {
            id: self.id,
            name: self.name,
            price: self.price,
            created_at,
            bakery_id: self.bakery_id,
        })
    }
}

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::DbError(e.to_string())
}

/// Every connection to `:memory:` opens its own database, so an in-memory pool
/// holds exactly one connection and never reaps it.
fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = pool_options(in_memory).connect_with(options).await?;

        for ddl in MIGRATIONS {
            sqlx::query(ddl).execute(&pool).await?;
        }
        tracing::debug!(database_url, "sqlite schema ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl BakeryRepository for SqliteRepo {
    async fn get_bakery(&self, id: i64) -> Result<Option<Bakery>, RepoError> {
        let row: Option<DbBakery> =
            sqlx::query_as("SELECT id, name, created_at FROM bakeries WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        row.map(|r| r.into_bakery()).transpose()
    }

    async fn list_bakeries(&self) -> Result<Vec<Bakery>, RepoError> {
        let rows: Vec<DbBakery> =
            sqlx::query_as("SELECT id, name, created_at FROM bakeries ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;

        rows.into_iter()
            .map(|r| r.into_bakery())
            .collect::<Result<Vec<_>, _>>()
    }

    async fn list_baked_goods(&self, order: OrderBy) -> Result<Vec<BakedGood>, RepoError> {
        let sql = format!(
            "SELECT id, name, price, created_at, bakery_id FROM baked_goods ORDER BY {}",
            order.sql()
        );
        let rows: Vec<DbBakedGood> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .map(|r| r.into_baked_good())
            .collect::<Result<Vec<_>, _>>()
    }

    async fn first_baked_good(&self, order: OrderBy) -> Result<Option<BakedGood>, RepoError> {
        let sql = format!(
            "SELECT id, name, price, created_at, bakery_id FROM baked_goods ORDER BY {} LIMIT 1",
            order.sql()
        );
        let row: Option<DbBakedGood> = sqlx::query_as(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|r| r.into_baked_good()).transpose()
    }
}

#[async_trait]
impl SeedRepository for SqliteRepo {
    async fn add_bakery(&self, bakery: NewBakery) -> Result<Bakery, RepoError> {
        let res = sqlx::query("INSERT INTO bakeries (name, created_at) VALUES (?, ?)")
            .bind(&bakery.name)
            .bind(timestamp::format(&bakery.created_at))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(bakery.into_bakery(res.last_insert_rowid()))
    }

    async fn add_baked_good(&self, good: NewBakedGood) -> Result<BakedGood, RepoError> {
        let res = sqlx::query(
            "INSERT INTO baked_goods (name, price, created_at, bakery_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&good.name)
        .bind(good.price)
        .bind(timestamp::format(&good.created_at))
        .bind(good.bakery_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let (sqlx::Error::Database(db), Some(bakery_id)) = (&e, good.bakery_id) {
                if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                    return RepoError::MissingBakery(bakery_id);
                }
            }
            db_err(e)
        })?;
        Ok(good.into_baked_good(res.last_insert_rowid()))
    }
}
