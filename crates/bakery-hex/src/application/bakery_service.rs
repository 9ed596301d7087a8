use crate::errors::{AppError, BAKERY_NOT_FOUND, NO_BAKED_GOODS};
use bakery_types::domain::baked_good::BakedGood;
use bakery_types::domain::bakery::Bakery;
use bakery_types::ports::bakery_repository::{BakeryRepository, OrderBy};

pub struct BakeryService<R: BakeryRepository> {
    repo: R,
}

impl<R: BakeryRepository> BakeryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError> {
        Ok(self.repo.list_bakeries().await?)
    }

    pub async fn get_bakery(&self, id: i64) -> Result<Bakery, AppError> {
        match self.repo.get_bakery(id).await? {
            Some(b) => Ok(b),
            None => Err(AppError::NotFound(BAKERY_NOT_FOUND.into())),
        }
    }

    pub async fn baked_goods_by_price(&self) -> Result<Vec<BakedGood>, AppError> {
        Ok(self.repo.list_baked_goods(OrderBy::price_desc()).await?)
    }

    pub async fn most_expensive_baked_good(&self) -> Result<BakedGood, AppError> {
        match self.repo.first_baked_good(OrderBy::price_desc()).await? {
            Some(g) => Ok(g),
            None => Err(AppError::NotFound(NO_BAKED_GOODS.into())),
        }
    }
}
