use serde::{Deserialize, Serialize};

use ckpt_domain::similarity;
use ckpt_storage::{
	models::CodeCheckpoint,
	queries::{self, CheckpointFilter},
};

use crate::{Checkpoint, CheckpointService, Result};

/// All fields are optional. Filter categories are ANDed; pagination defaults
/// come from config. `query` is advisory only: callers that want semantic
/// ordering embed it themselves and send the vector in `embedding`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub query: Option<String>,
	#[serde(default)]
	pub keywords: Option<Vec<String>>,
	#[serde(default)]
	pub programming_language: Option<String>,
	#[serde(default)]
	pub tags: Option<Vec<String>>,
	#[serde(default)]
	pub embedding: Option<Vec<f32>>,
	#[serde(default)]
	pub limit: Option<u32>,
	#[serde(default)]
	pub offset: Option<u32>,
}

/// Page envelope. `total` counts every record matching the predicate,
/// independent of pagination.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub results: Vec<Checkpoint>,
	pub total: i64,
	pub has_more: bool,
}

impl CheckpointService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let limit = i64::from(req.limit.unwrap_or(self.cfg.search.default_limit));
		let offset = i64::from(req.offset.unwrap_or(0));

		if let Some(query) = req.query.as_deref() {
			tracing::debug!(query, "Search query text received; ordering follows the embedding.");
		}

		let keywords = req
			.keywords
			.unwrap_or_default()
			.into_iter()
			.filter(|keyword| !keyword.trim().is_empty())
			.collect();
		let filter = CheckpointFilter {
			programming_language: req.programming_language,
			tags: req.tags.unwrap_or_default(),
			keywords,
		};
		// An empty vector requests no similarity ordering at all.
		let query_vector = req.embedding.filter(|vector| !vector.is_empty());

		let (results, total) = match query_vector {
			Some(vector) => {
				let max_rows = i64::from(self.cfg.search.max_fetch_rows);
				let (rows, total) = tokio::try_join!(
					queries::select_matching_all(&self.db, &filter, max_rows),
					queries::count_matching(&self.db, &filter),
				)?;
				let ranked = rank_by_similarity(rows, &vector);

				(paginate(ranked, offset, limit), total)
			},
			None => {
				let (rows, total) = tokio::try_join!(
					queries::select_matching_page(&self.db, &filter, limit, offset),
					queries::count_matching(&self.db, &filter),
				)?;

				(rows, total)
			},
		};
		let has_more = offset + limit < total;

		tracing::debug!(total, returned = results.len(), has_more, "Search completed.");

		Ok(SearchResponse {
			results: results.into_iter().map(Checkpoint::from).collect(),
			total,
			has_more,
		})
	}
}

/// Orders candidates by descending dot product against the query vector.
/// Ties fall back to recency, then id, so the ordering is deterministic.
fn rank_by_similarity(rows: Vec<CodeCheckpoint>, query: &[f32]) -> Vec<CodeCheckpoint> {
	let mut scored: Vec<(f32, CodeCheckpoint)> =
		rows.into_iter().map(|row| (similarity::dot(query, &row.embedding), row)).collect();

	scored.sort_by(|a, b| {
		b.0.total_cmp(&a.0)
			.then_with(|| b.1.created_at.cmp(&a.1.created_at))
			.then_with(|| b.1.id.cmp(&a.1.id))
	});

	scored.into_iter().map(|(_, row)| row).collect()
}

fn paginate(rows: Vec<CodeCheckpoint>, offset: i64, limit: i64) -> Vec<CodeCheckpoint> {
	rows.into_iter().skip(offset as usize).take(limit as usize).collect()
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn checkpoint(id: i64, embedding: Vec<f32>) -> CodeCheckpoint {
		CodeCheckpoint {
			id,
			title: format!("Checkpoint {id}"),
			summary: "A stored snippet.".to_string(),
			code_snippet: "fn main() {}".to_string(),
			user_feedback: "Fine.".to_string(),
			programming_language: "Rust".to_string(),
			tags: vec![],
			embedding,
			created_at: datetime!(2026-01-01 00:00:00 UTC) + time::Duration::minutes(id),
		}
	}

	#[test]
	fn ranks_by_descending_dot_product() {
		let rows = vec![
			checkpoint(1, vec![1.0, 0.0]),
			checkpoint(2, vec![0.0, 1.0]),
			checkpoint(3, vec![0.5, 0.5]),
		];
		let ranked = rank_by_similarity(rows, &[1.0, 0.0]);
		let ids: Vec<i64> = ranked.iter().map(|row| row.id).collect();

		assert_eq!(ids, vec![1, 3, 2]);
	}

	#[test]
	fn similarity_ties_fall_back_to_recency() {
		let rows = vec![checkpoint(1, vec![1.0]), checkpoint(2, vec![1.0])];
		let ranked = rank_by_similarity(rows, &[2.0]);
		let ids: Vec<i64> = ranked.iter().map(|row| row.id).collect();

		assert_eq!(ids, vec![2, 1]);
	}

	#[test]
	fn mismatched_vector_lengths_rank_on_common_prefix() {
		let rows = vec![checkpoint(1, vec![3.0]), checkpoint(2, vec![1.0, 100.0])];
		// Query has two components; row 1 only contributes its first.
		let ranked = rank_by_similarity(rows, &[1.0, 0.0]);
		let ids: Vec<i64> = ranked.iter().map(|row| row.id).collect();

		assert_eq!(ids, vec![1, 2]);
	}

	#[test]
	fn paginate_slices_after_ranking() {
		let rows: Vec<CodeCheckpoint> =
			(1..=4).map(|id| checkpoint(id, vec![id as f32])).collect();
		let page = paginate(rows, 1, 2);
		let ids: Vec<i64> = page.iter().map(|row| row.id).collect();

		assert_eq!(ids, vec![2, 3]);
	}

	#[test]
	fn zero_limit_yields_an_empty_page() {
		let rows = vec![checkpoint(1, vec![1.0])];

		assert!(paginate(rows, 0, 0).is_empty());
	}
}
