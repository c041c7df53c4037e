pub mod error;
pub mod middleware;
pub mod password;
pub mod token;
