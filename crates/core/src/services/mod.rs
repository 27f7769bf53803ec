pub mod aggregation_service;
pub mod analytics_service;
pub mod bucket_service;
pub mod growth_service;
pub mod payment_service;
pub mod ranking_service;
