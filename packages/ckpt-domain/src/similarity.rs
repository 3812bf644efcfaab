/// Dot product over the common prefix of two vectors.
///
/// Stored embeddings carry no enforced dimensionality, so a query vector may
/// be shorter or longer than a stored one. The product is defined over the
/// shared prefix, which is equivalent to zero-padding the shorter vector.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matches_hand_computed_product() {
		assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
	}

	#[test]
	fn truncates_to_common_prefix() {
		assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0, 100.0]), 11.0);
		assert_eq!(dot(&[1.0, 2.0, 100.0], &[3.0, 4.0]), 11.0);
	}

	#[test]
	fn empty_side_yields_zero() {
		assert_eq!(dot(&[], &[1.0, 2.0]), 0.0);
	}
}
