pub mod assistant;
pub mod conversation;
pub mod currency;
pub mod dashboard;
pub mod directory;
pub mod guard;
pub mod identity;
pub mod message;
pub mod order;
pub mod product;
pub mod prompts;
pub mod seed;
