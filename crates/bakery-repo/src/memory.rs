use async_trait::async_trait;
use bakery_types::domain::baked_good::{BakedGood, NewBakedGood};
use bakery_types::domain::bakery::{Bakery, NewBakery};
use bakery_types::ports::bakery_repository::{
    BakeryRepository, OrderBy, RepoError, SeedRepository,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct InMemoryRepo {
    pub bakeries: Arc<DashMap<i64, Bakery>>,
    pub baked_goods: Arc<DashMap<i64, BakedGood>>,
    next_bakery_id: Arc<AtomicI64>,
    next_baked_good_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            bakeries: Arc::new(DashMap::new()),
            baked_goods: Arc::new(DashMap::new()),
            next_bakery_id: Arc::new(AtomicI64::new(1)),
            next_baked_good_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn sorted_goods(&self, order: OrderBy) -> Vec<BakedGood> {
        let mut goods: Vec<BakedGood> = self
            .baked_goods
            .iter()
            .map(|kv| kv.value().clone())
            .collect();
        goods.sort_by(|a, b| order.compare(a, b));
        goods
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BakeryRepository for InMemoryRepo {
    async fn get_bakery(&self, id: i64) -> Result<Option<Bakery>, RepoError> {
        Ok(self.bakeries.get(&id).map(|r| r.clone()))
    }

    async fn list_bakeries(&self) -> Result<Vec<Bakery>, RepoError> {
        let mut list: Vec<Bakery> = self.bakeries.iter().map(|kv| kv.value().clone()).collect();
        list.sort_by_key(|b| b.id);
        Ok(list)
    }

    async fn list_baked_goods(&self, order: OrderBy) -> Result<Vec<BakedGood>, RepoError> {
        Ok(self.sorted_goods(order))
    }

    async fn first_baked_good(&self, order: OrderBy) -> Result<Option<BakedGood>, RepoError> {
        Ok(self
            .baked_goods
            .iter()
            .map(|kv| kv.value().clone())
            .min_by(|a, b| order.compare(a, b)))
    }
}

#[async_trait]
impl SeedRepository for InMemoryRepo {
    async fn add_bakery(&self, bakery: NewBakery) -> Result<Bakery, RepoError> {
        let id = self.next_bakery_id.fetch_add(1, Ordering::SeqCst);
        let bakery = bakery.into_bakery(id);
        self.bakeries.insert(id, bakery.clone());
        Ok(bakery)
    }

    async fn add_baked_good(&self, good: NewBakedGood) -> Result<BakedGood, RepoError> {
        if let Some(bakery_id) = good.bakery_id {
            if !self.bakeries.contains_key(&bakery_id) {
                return Err(RepoError::MissingBakery(bakery_id));
            }
        }
        let id = self.next_baked_good_id.fetch_add(1, Ordering::SeqCst);
        let good = good.into_baked_good(id);
        self.baked_goods.insert(id, good.clone());
        Ok(good)
    }
}
