use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CodeCheckpoint {
	pub id: i64,
	pub title: String,
	pub summary: String,
	pub code_snippet: String,
	pub user_feedback: String,
	pub programming_language: String,
	pub tags: Vec<String>,
	pub embedding: Vec<f32>,
	pub created_at: OffsetDateTime,
}
