//! Demo data for a fresh store.

use bakery_types::domain::baked_good::NewBakedGood;
use bakery_types::domain::bakery::NewBakery;
use bakery_types::ports::bakery_repository::{BakeryRepository, SeedRepository};

const DEMO: &[(&str, &[(&str, f64)])] = &[
    (
        "Sweet Treats",
        &[("Croissant", 3.50), ("Cake", 25.00), ("Cinnamon Roll", 4.25)],
    ),
    (
        "Rise & Grind",
        &[("Sourdough Loaf", 8.00), ("Baguette", 3.75), ("Eclair", 4.25)],
    ),
];

/// Inserts the demo bakeries and their goods when the store has no bakeries.
/// Returns how many bakeries were inserted.
pub async fn seed_demo_data<R>(repo: &R) -> anyhow::Result<usize>
where
    R: BakeryRepository + SeedRepository,
{
    if !repo.list_bakeries().await?.is_empty() {
        tracing::debug!("store already populated; skipping seed");
        return Ok(0);
    }

    for (bakery_name, goods) in DEMO {
        let bakery = repo.add_bakery(NewBakery::new(*bakery_name, None)?).await?;
        for (name, price) in goods.iter() {
            repo.add_baked_good(NewBakedGood::new(*name, *price, Some(bakery.id), None)?)
                .await?;
        }
        tracing::info!(bakery_id = bakery.id, goods = goods.len(), "seeded bakery");
    }
    Ok(DEMO.len())
}
