pub mod bakery_service;
