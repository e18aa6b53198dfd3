pub mod audit;
pub mod catalog;
pub mod category;
pub mod config;
pub mod events;
pub mod index;
pub mod paths;
pub mod reconcile;
pub mod rules;
pub mod title;
pub mod util;
pub mod walker;
pub mod warn;
