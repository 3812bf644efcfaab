use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Page size applied when a search request omits `limit`.
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	/// Upper bound on candidate rows fetched for similarity ordering, which
	/// cannot be paginated inside the database.
	#[serde(default = "default_max_fetch_rows")]
	pub max_fetch_rows: u32,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

impl Default for Search {
	fn default() -> Self {
		Self { default_limit: default_limit(), max_fetch_rows: default_max_fetch_rows() }
	}
}

fn default_limit() -> u32 {
	20
}

fn default_max_fetch_rows() -> u32 {
	50_000
}
