use std::sync::Arc;

use ckpt_service::CheckpointService;
use ckpt_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CheckpointService>,
}
impl AppState {
	pub async fn new(config: ckpt_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = CheckpointService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
