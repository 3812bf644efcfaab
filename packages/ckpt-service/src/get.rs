use serde::{Deserialize, Serialize};

use ckpt_storage::queries;

use crate::{Checkpoint, CheckpointService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetRequest {
	pub id: i64,
}

/// `checkpoint` is `null` for an unknown id; absence is a normal outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetResponse {
	pub checkpoint: Option<Checkpoint>,
}

impl CheckpointService {
	pub async fn get(&self, req: GetRequest) -> Result<GetResponse> {
		let checkpoint = queries::select_checkpoint(&self.db, req.id).await?;

		Ok(GetResponse { checkpoint: checkpoint.map(Checkpoint::from) })
	}
}
