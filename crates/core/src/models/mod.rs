pub mod analytics;
pub mod chart;
pub mod settings;
pub mod transaction;
