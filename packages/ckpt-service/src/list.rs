use serde::{Deserialize, Serialize};

use ckpt_storage::queries;

use crate::{Checkpoint, CheckpointService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub checkpoints: Vec<Checkpoint>,
}

impl CheckpointService {
	/// Every stored checkpoint, newest first.
	pub async fn list(&self) -> Result<ListResponse> {
		let checkpoints = queries::select_checkpoints_newest_first(&self.db).await?;

		Ok(ListResponse { checkpoints: checkpoints.into_iter().map(Checkpoint::from).collect() })
	}
}
