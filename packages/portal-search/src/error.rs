pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(
		"Invalid scope {scope:?}; expected one of all, assigned_non_vendor, or assigned_vendor."
	)]
	InvalidScope { scope: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<portal_storage::Error> for Error {
	fn from(err: portal_storage::Error) -> Self {
		match err {
			portal_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			portal_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
