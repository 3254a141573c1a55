pub mod config;
pub mod domain_name;
pub mod error;
pub mod logging;
pub mod message;
pub mod query;
pub mod resolver;
pub mod resource_record;
pub mod rr_types;
pub mod session;
pub mod terminal;
pub mod utils;
pub mod view;
