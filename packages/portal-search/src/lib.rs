pub mod params;
pub mod scope;
pub mod user_search;

mod error;

pub use error::{Error, Result};
pub use params::{FilterParams, OrgStatus};
pub use scope::InitialScope;
pub use user_search::UserSearch;
