/// A rejected input field, reported as a JSON path into the request body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
	pub field: String,
	pub message: String,
}

pub struct NewCheckpoint<'a> {
	pub title: &'a str,
	pub summary: &'a str,
	pub code_snippet: &'a str,
	pub user_feedback: &'a str,
	pub programming_language: &'a str,
	pub embedding: &'a [f32],
}

/// Checks a create request before it reaches storage. Text fields must be
/// non-empty after trimming; the embedding must be non-empty and finite.
pub fn validate_new_checkpoint(input: &NewCheckpoint<'_>) -> Result<(), FieldError> {
	require_text("$.title", input.title)?;
	require_text("$.summary", input.summary)?;
	require_text("$.code_snippet", input.code_snippet)?;
	require_text("$.user_feedback", input.user_feedback)?;
	require_text("$.programming_language", input.programming_language)?;
	require_embedding("$.embedding", input.embedding)?;

	Ok(())
}

pub fn require_text(field: &str, value: &str) -> Result<(), FieldError> {
	if value.trim().is_empty() {
		return Err(FieldError {
			field: field.to_string(),
			message: format!("{field} must be a non-empty string."),
		});
	}

	Ok(())
}

pub fn require_embedding(field: &str, value: &[f32]) -> Result<(), FieldError> {
	if value.is_empty() {
		return Err(FieldError {
			field: field.to_string(),
			message: format!("{field} must be a non-empty list of numbers."),
		});
	}
	if value.iter().any(|component| !component.is_finite()) {
		return Err(FieldError {
			field: field.to_string(),
			message: format!("{field} must contain only finite numbers."),
		});
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn input<'a>(embedding: &'a [f32]) -> NewCheckpoint<'a> {
		NewCheckpoint {
			title: "Binary search helper",
			summary: "Off-by-one safe midpoint.",
			code_snippet: "fn mid(lo: usize, hi: usize) -> usize { lo + (hi - lo) / 2 }",
			user_feedback: "Works on large slices.",
			programming_language: "Rust",
			embedding,
		}
	}

	#[test]
	fn accepts_complete_input() {
		assert!(validate_new_checkpoint(&input(&[0.1, 0.2])).is_ok());
	}

	#[test]
	fn rejects_blank_title() {
		let mut value = input(&[0.1]);

		value.title = "   ";

		let err = validate_new_checkpoint(&value).expect_err("Expected title rejection.");

		assert_eq!(err.field, "$.title");
	}

	#[test]
	fn rejects_empty_embedding() {
		let err = validate_new_checkpoint(&input(&[])).expect_err("Expected embedding rejection.");

		assert_eq!(err.field, "$.embedding");
	}

	#[test]
	fn rejects_non_finite_embedding() {
		let err = validate_new_checkpoint(&input(&[0.5, f32::NAN]))
			.expect_err("Expected embedding rejection.");

		assert_eq!(err.field, "$.embedding");
		assert!(err.message.contains("finite"));
	}
}
