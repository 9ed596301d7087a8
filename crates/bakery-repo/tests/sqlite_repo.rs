#![cfg(feature = "sqlite")]

use bakery_repo::sqlite::SqliteRepo;
use bakery_types::domain::baked_good::NewBakedGood;
use bakery_types::domain::bakery::NewBakery;
use bakery_types::domain::timestamp;
use bakery_types::ports::bakery_repository::{
    BakeryRepository, OrderBy, RepoError, SeedRepository,
};
use std::path::PathBuf;

fn temp_db_url() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut path = PathBuf::from(dir.path());
    path.push("nested");
    path.push("bakery.db");
    let url = format!("sqlite://{}", path.display());
    (dir, url)
}

#[tokio::test]
async fn sqlite_repo_read_flow() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    let created_at = timestamp::parse("2024-01-01 10:00:00").unwrap();
    let bakery = repo
        .add_bakery(NewBakery::new("Sweet Treats", Some(created_at)).unwrap())
        .await
        .unwrap();

    let fetched = repo.get_bakery(bakery.id).await.unwrap().unwrap();
    assert_eq!(fetched, bakery);

    let croissant = repo
        .add_baked_good(NewBakedGood::new("Croissant", 3.5, Some(bakery.id), None).unwrap())
        .await
        .unwrap();
    let cake = repo
        .add_baked_good(NewBakedGood::new("Cake", 25.0, Some(bakery.id), None).unwrap())
        .await
        .unwrap();
    let tart = repo
        .add_baked_good(NewBakedGood::new("Tart", 3.5, Some(bakery.id), None).unwrap())
        .await
        .unwrap();

    let ids: Vec<i64> = repo
        .list_baked_goods(OrderBy::price_desc())
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(ids, vec![cake.id, croissant.id, tart.id]);

    let top = repo
        .first_baked_good(OrderBy::price_desc())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(top.name, "Cake");
    assert_eq!(top.price, 25.0);
    assert_eq!(top.bakery_id, Some(bakery.id));
}

#[tokio::test]
async fn sqlite_repo_handles_missing_rows() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    assert!(repo.get_bakery(1).await.unwrap().is_none());
    assert!(repo.list_bakeries().await.unwrap().is_empty());
    assert!(repo
        .first_baked_good(OrderBy::price_desc())
        .await
        .unwrap()
        .is_none());

    let orphan = repo
        .add_baked_good(NewBakedGood::new("Orphan", 1.0, Some(77), None).unwrap())
        .await;
    assert!(matches!(orphan, Err(RepoError::MissingBakery(77))));
}

#[tokio::test]
async fn sqlite_repo_reopens_existing_schema() {
    let (_dir, url) = temp_db_url();
    {
        let repo = SqliteRepo::new(&url).await.unwrap();
        repo.add_bakery(NewBakery::new("Persisted", None).unwrap())
            .await
            .unwrap();
    }
    let reopened = SqliteRepo::new(&url).await.unwrap();
    let list = reopened.list_bakeries().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Persisted");
}

#[tokio::test]
async fn sqlite_in_memory_url() {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    repo.add_bakery(NewBakery::new("Ephemeral", None).unwrap())
        .await
        .unwrap();
    assert_eq!(repo.list_bakeries().await.unwrap().len(), 1);
}
