pub mod achievement_service;
pub mod analytics_service;
pub mod ledger_service;
pub mod rate_service;
