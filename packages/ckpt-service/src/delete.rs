use serde::{Deserialize, Serialize};

use ckpt_storage::queries;

use crate::{CheckpointService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub deleted: bool,
}

impl CheckpointService {
	/// `deleted` is false when the id is unknown; repeating a delete is safe.
	pub async fn delete(&self, req: DeleteRequest) -> Result<DeleteResponse> {
		let deleted = queries::delete_checkpoint(&self.db, req.id).await?;

		if deleted {
			tracing::info!(id = req.id, "Checkpoint deleted.");
		}

		Ok(DeleteResponse { deleted })
	}
}
