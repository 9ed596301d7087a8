use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BakedGood {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    /// Owning bakery. Kept off the wire.
    #[serde(skip)]
    pub bakery_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewBakedGood {
    pub name: String,
    pub price: f64,
    pub bakery_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl NewBakedGood {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        bakery_id: Option<i64>,
        created_at: Option<NaiveDateTime>,
    ) -> anyhow::Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            anyhow::bail!("baked good name empty");
        }
        if !price.is_finite() || price < 0.0 {
            anyhow::bail!("price must be a non-negative number");
        }
        Ok(Self {
            name,
            price,
            bakery_id,
            created_at: created_at.unwrap_or_else(timestamp::now),
        })
    }

    pub fn into_baked_good(self, id: i64) -> BakedGood {
        BakedGood {
            id,
            name: self.name,
            price: self.price,
            created_at: self.created_at,
            bakery_id: self.bakery_id,
        }
    }
}
