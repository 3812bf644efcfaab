pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod time_serde;
pub mod update;

mod error;

pub use create::{CreateRequest, CreateResponse};
pub use delete::{DeleteRequest, DeleteResponse};
pub use error::{Error, Result};
pub use get::{GetRequest, GetResponse};
pub use list::ListResponse;
pub use search::{SearchRequest, SearchResponse};
pub use update::{UpdateRequest, UpdateResponse};

use ckpt_config::Config;
use ckpt_storage::{db::Db, models::CodeCheckpoint};

pub struct CheckpointService {
	pub cfg: Config,
	pub db: Db,
}
impl CheckpointService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}

/// Wire shape of a stored checkpoint.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Checkpoint {
	pub id: i64,
	pub title: String,
	pub summary: String,
	pub code_snippet: String,
	pub user_feedback: String,
	pub programming_language: String,
	pub tags: Vec<String>,
	pub embedding: Vec<f32>,
	#[serde(with = "crate::time_serde")]
	pub created_at: time::OffsetDateTime,
}
impl From<CodeCheckpoint> for Checkpoint {
	fn from(record: CodeCheckpoint) -> Self {
		Self {
			id: record.id,
			title: record.title,
			summary: record.summary,
			code_snippet: record.code_snippet,
			user_feedback: record.user_feedback,
			programming_language: record.programming_language,
			tags: record.tags,
			embedding: record.embedding,
			created_at: record.created_at,
		}
	}
}
