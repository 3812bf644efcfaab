use sqlx::{Postgres, QueryBuilder};

use crate::{Error, Result, db::Db, models::CodeCheckpoint};

const CHECKPOINT_COLUMNS: &str = "\
id, title, summary, code_snippet, user_feedback, programming_language, tags, embedding, created_at";

pub struct NewCheckpointRecord {
	pub title: String,
	pub summary: String,
	pub code_snippet: String,
	pub user_feedback: String,
	pub programming_language: String,
	pub tags: Vec<String>,
	pub embedding: Vec<f32>,
}

/// Partial update. `None` fields keep their stored value.
#[derive(Debug, Default, Clone)]
pub struct CheckpointChanges {
	pub title: Option<String>,
	pub summary: Option<String>,
	pub code_snippet: Option<String>,
	pub user_feedback: Option<String>,
	pub programming_language: Option<String>,
	pub tags: Option<Vec<String>>,
	pub embedding: Option<Vec<f32>>,
}
impl CheckpointChanges {
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.summary.is_none()
			&& self.code_snippet.is_none()
			&& self.user_feedback.is_none()
			&& self.programming_language.is_none()
			&& self.tags.is_none()
			&& self.embedding.is_none()
	}
}

/// Filter categories are ANDed together; an empty category places no
/// restriction. Within `tags` a record matches on any one requested tag, and
/// each keyword must match at least one of title, summary, or the joined tag
/// list, case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct CheckpointFilter {
	pub programming_language: Option<String>,
	pub tags: Vec<String>,
	pub keywords: Vec<String>,
}

pub async fn insert_checkpoint(db: &Db, record: NewCheckpointRecord) -> Result<CodeCheckpoint> {
	let checkpoint = sqlx::query_as::<_, CodeCheckpoint>(
		"\
INSERT INTO code_checkpoints (
	title,
	summary,
	code_snippet,
	user_feedback,
	programming_language,
	tags,
	embedding
)
VALUES ($1, $2, $3, $4, $5, $6, $7)
RETURNING id, title, summary, code_snippet, user_feedback, programming_language, tags, embedding, created_at",
	)
	.bind(record.title)
	.bind(record.summary)
	.bind(record.code_snippet)
	.bind(record.user_feedback)
	.bind(record.programming_language)
	.bind(record.tags)
	.bind(record.embedding)
	.fetch_one(&db.pool)
	.await?;

	Ok(checkpoint)
}

pub async fn select_checkpoint(db: &Db, id: i64) -> Result<Option<CodeCheckpoint>> {
	let checkpoint = sqlx::query_as::<_, CodeCheckpoint>(
		"\
SELECT id, title, summary, code_snippet, user_feedback, programming_language, tags, embedding, created_at
FROM code_checkpoints
WHERE id = $1",
	)
	.bind(id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(checkpoint)
}

pub async fn select_checkpoints_newest_first(db: &Db) -> Result<Vec<CodeCheckpoint>> {
	let checkpoints = sqlx::query_as::<_, CodeCheckpoint>(
		"\
SELECT id, title, summary, code_snippet, user_feedback, programming_language, tags, embedding, created_at
FROM code_checkpoints
ORDER BY created_at DESC, id DESC",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(checkpoints)
}

/// Count of records matching the filter, independent of pagination.
pub async fn count_matching(db: &Db, filter: &CheckpointFilter) -> Result<i64> {
	let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM code_checkpoints");

	push_filters(&mut builder, filter);

	let total: i64 = builder.build_query_scalar().fetch_one(&db.pool).await?;

	Ok(total)
}

/// One recency-ordered page of matching records, paginated in the database.
pub async fn select_matching_page(
	db: &Db,
	filter: &CheckpointFilter,
	limit: i64,
	offset: i64,
) -> Result<Vec<CodeCheckpoint>> {
	let mut builder = new_select_builder();

	push_filters(&mut builder, filter);
	builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
	builder.push_bind(limit);
	builder.push(" OFFSET ");
	builder.push_bind(offset);

	let checkpoints = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(checkpoints)
}

/// All records matching the filter, unordered, for in-process similarity
/// ranking. Refuses result sets larger than `max_rows` rather than silently
/// ranking a truncated candidate set.
pub async fn select_matching_all(
	db: &Db,
	filter: &CheckpointFilter,
	max_rows: i64,
) -> Result<Vec<CodeCheckpoint>> {
	let mut builder = new_select_builder();

	push_filters(&mut builder, filter);
	builder.push(" LIMIT ");
	builder.push_bind(max_rows + 1);

	let checkpoints: Vec<CodeCheckpoint> = builder.build_query_as().fetch_all(&db.pool).await?;

	if checkpoints.len() as i64 > max_rows {
		return Err(Error::InvalidArgument(format!(
			"Similarity search matched more than {max_rows} rows; narrow the filters."
		)));
	}

	Ok(checkpoints)
}

pub async fn update_checkpoint(
	db: &Db,
	id: i64,
	changes: CheckpointChanges,
) -> Result<Option<CodeCheckpoint>> {
	if changes.is_empty() {
		return select_checkpoint(db, id).await;
	}

	let mut builder = QueryBuilder::new("UPDATE code_checkpoints SET ");
	{
		let mut assignments = builder.separated(", ");

		if let Some(title) = changes.title {
			assignments.push("title = ").push_bind_unseparated(title);
		}
		if let Some(summary) = changes.summary {
			assignments.push("summary = ").push_bind_unseparated(summary);
		}
		if let Some(code_snippet) = changes.code_snippet {
			assignments.push("code_snippet = ").push_bind_unseparated(code_snippet);
		}
		if let Some(user_feedback) = changes.user_feedback {
			assignments.push("user_feedback = ").push_bind_unseparated(user_feedback);
		}
		if let Some(programming_language) = changes.programming_language {
			assignments.push("programming_language = ").push_bind_unseparated(programming_language);
		}
		if let Some(tags) = changes.tags {
			assignments.push("tags = ").push_bind_unseparated(tags);
		}
		if let Some(embedding) = changes.embedding {
			assignments.push("embedding = ").push_bind_unseparated(embedding);
		}
	}

	builder.push(" WHERE id = ");
	builder.push_bind(id);
	builder.push(" RETURNING ");
	builder.push(CHECKPOINT_COLUMNS);

	let checkpoint = builder.build_query_as().fetch_optional(&db.pool).await?;

	Ok(checkpoint)
}

/// Returns whether a row was deleted. Deleting an unknown id is not an error.
pub async fn delete_checkpoint(db: &Db, id: i64) -> Result<bool> {
	let result = sqlx::query("DELETE FROM code_checkpoints WHERE id = $1")
		.bind(id)
		.execute(&db.pool)
		.await?;

	Ok(result.rows_affected() > 0)
}

fn new_select_builder() -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new("SELECT ");

	builder.push(CHECKPOINT_COLUMNS);
	builder.push(" FROM code_checkpoints");

	builder
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &CheckpointFilter) {
	let mut separator = " WHERE ";

	if let Some(language) = filter.programming_language.as_ref() {
		builder.push(separator);
		builder.push("programming_language = ");
		builder.push_bind(language.clone());

		separator = " AND ";
	}
	if !filter.tags.is_empty() {
		// Array overlap: any one requested tag, matched as an exact element.
		builder.push(separator);
		builder.push("tags && ");
		builder.push_bind(filter.tags.clone());

		separator = " AND ";
	}

	for keyword in &filter.keywords {
		let pattern = like_pattern(keyword);

		builder.push(separator);
		builder.push("(title ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR summary ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR array_to_string(tags, ' ') ILIKE ");
		builder.push_bind(pattern);
		builder.push(")");

		separator = " AND ";
	}
}

/// Wraps a keyword in `%` wildcards, escaping the characters ILIKE treats
/// specially so the keyword itself is matched literally.
fn like_pattern(keyword: &str) -> String {
	let escaped = keyword.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");

	format!("%{escaped}%")
}
