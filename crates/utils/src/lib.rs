pub mod error;

/// Trims an optional piece of document text, discarding it when nothing is left
pub fn non_empty_text(text: Option<String>) -> Option<String> {
	text.and_then(|text| {
		let trimmed = text.trim();
		(!trimmed.is_empty()).then(|| trimmed.to_string())
	})
}
