pub mod db;
pub mod memory;
pub mod models;
pub mod organizations;
pub mod query;
pub mod schema;
pub mod users;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
