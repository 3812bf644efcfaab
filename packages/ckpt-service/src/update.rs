use serde::{Deserialize, Serialize};

use ckpt_domain::validate;
use ckpt_storage::queries::{self, CheckpointChanges};

use crate::{Checkpoint, CheckpointService, Result};

/// Only supplied fields are overwritten. `id` and `created_at` are
/// server-owned and cannot be changed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
	pub id: i64,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub summary: Option<String>,
	#[serde(default)]
	pub code_snippet: Option<String>,
	#[serde(default)]
	pub user_feedback: Option<String>,
	#[serde(default)]
	pub programming_language: Option<String>,
	#[serde(default)]
	pub tags: Option<Vec<String>>,
	#[serde(default)]
	pub embedding: Option<Vec<f32>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
	pub checkpoint: Option<Checkpoint>,
}

impl CheckpointService {
	pub async fn update(&self, req: UpdateRequest) -> Result<UpdateResponse> {
		if let Some(title) = req.title.as_deref() {
			validate::require_text("$.title", title)?;
		}
		if let Some(summary) = req.summary.as_deref() {
			validate::require_text("$.summary", summary)?;
		}
		if let Some(code_snippet) = req.code_snippet.as_deref() {
			validate::require_text("$.code_snippet", code_snippet)?;
		}
		if let Some(user_feedback) = req.user_feedback.as_deref() {
			validate::require_text("$.user_feedback", user_feedback)?;
		}
		if let Some(programming_language) = req.programming_language.as_deref() {
			validate::require_text("$.programming_language", programming_language)?;
		}
		if let Some(embedding) = req.embedding.as_deref() {
			validate::require_embedding("$.embedding", embedding)?;
		}

		let changes = CheckpointChanges {
			title: req.title,
			summary: req.summary,
			code_snippet: req.code_snippet,
			user_feedback: req.user_feedback,
			programming_language: req.programming_language,
			tags: req.tags,
			embedding: req.embedding,
		};
		// An empty change set reads back the current record; the storage layer
		// returns None when the id is unknown either way.
		let updated = queries::update_checkpoint(&self.db, req.id, changes).await?;

		if updated.is_some() {
			tracing::info!(id = req.id, "Checkpoint updated.");
		}

		Ok(UpdateResponse { checkpoint: updated.map(Checkpoint::from) })
	}
}
