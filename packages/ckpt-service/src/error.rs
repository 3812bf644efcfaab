pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	Validation { field: String, message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<ckpt_storage::Error> for Error {
	fn from(err: ckpt_storage::Error) -> Self {
		match err {
			ckpt_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			ckpt_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}

impl From<ckpt_domain::validate::FieldError> for Error {
	fn from(err: ckpt_domain::validate::FieldError) -> Self {
		Self::Validation { field: err.field, message: err.message }
	}
}
