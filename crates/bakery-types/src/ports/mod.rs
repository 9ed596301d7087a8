pub mod bakery_repository;
