pub mod connection;
pub mod error;
pub mod resources;
pub mod schema;
pub mod store;
pub mod users;
