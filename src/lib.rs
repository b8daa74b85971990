//! Boutique - named stands of size variations, instantiated as sibling frames on a design canvas

pub mod bridge;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod db;
pub mod host;
pub mod layout;
pub mod messages;
pub mod models;
pub mod router;
pub mod store;
pub mod validation;
