pub mod achievement;
pub mod analytics;
pub mod budget;
pub mod card;
pub mod rates;
pub mod transaction;
pub mod wallet;
