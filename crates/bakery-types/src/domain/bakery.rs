use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bakery {
    pub id: i64,
    pub name: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Insert input for a bakery. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewBakery {
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl NewBakery {
    pub fn new(name: impl Into<String>, created_at: Option<NaiveDateTime>) -> anyhow::Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            anyhow::bail!("bakery name empty");
        }
        Ok(Self {
            name,
            created_at: created_at.unwrap_or_else(timestamp::now),
        })
    }

    pub fn into_bakery(self, id: i64) -> Bakery {
        Bakery {
            id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn serializes_with_fixed_timestamp() {
        let bakery = Bakery {
            id: 1,
            name: "Sweet Treats".into(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        };
        let json = serde_json::to_string(&bakery).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Sweet Treats","created_at":"2024-01-01 10:00:00"}"#
        );
        let back: Bakery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bakery);
    }

    #[test]
    fn rejects_blank_name() {
        assert!(NewBakery::new("  ", None).is_err());
        let ok = NewBakery::new("Crumbs", None).unwrap();
        assert_eq!(ok.into_bakery(7).id, 7);
    }
}
