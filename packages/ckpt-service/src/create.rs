use serde::{Deserialize, Serialize};

use ckpt_domain::validate::{self, NewCheckpoint};
use ckpt_storage::queries::{self, NewCheckpointRecord};

use crate::{Checkpoint, CheckpointService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateRequest {
	pub title: String,
	pub summary: String,
	pub code_snippet: String,
	pub user_feedback: String,
	pub programming_language: String,
	#[serde(default)]
	pub tags: Vec<String>,
	pub embedding: Vec<f32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateResponse {
	pub checkpoint: Checkpoint,
}

impl CheckpointService {
	pub async fn create(&self, req: CreateRequest) -> Result<CreateResponse> {
		validate::validate_new_checkpoint(&NewCheckpoint {
			title: &req.title,
			summary: &req.summary,
			code_snippet: &req.code_snippet,
			user_feedback: &req.user_feedback,
			programming_language: &req.programming_language,
			embedding: &req.embedding,
		})?;

		let record = NewCheckpointRecord {
			title: req.title,
			summary: req.summary,
			code_snippet: req.code_snippet,
			user_feedback: req.user_feedback,
			programming_language: req.programming_language,
			tags: req.tags,
			embedding: req.embedding,
		};
		let created = queries::insert_checkpoint(&self.db, record).await?;

		tracing::info!(id = created.id, "Checkpoint created.");

		Ok(CreateResponse { checkpoint: created.into() })
	}
}
