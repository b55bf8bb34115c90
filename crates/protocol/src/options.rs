//! Picker configuration flags.
//!
//! The host passes these straight through to `rofi -dmenu` as command-line
//! flags, so the builder produces an ordered flag/value list rather than a
//! keyed map.

/// Matching mode for the picker's filter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingMode {
	Normal,
	Regex,
	Glob,
	Fuzzy,
	Prefix,
}

impl MatchingMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			MatchingMode::Normal => "normal",
			MatchingMode::Regex => "regex",
			MatchingMode::Glob => "glob",
			MatchingMode::Fuzzy => "fuzzy",
			MatchingMode::Prefix => "prefix",
		}
	}
}

/// Builder for the `rofi-opts` flag list of a picker request.
///
/// Flags are emitted in call order; rofi takes the last occurrence when a
/// flag repeats.
#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
	flags: Vec<String>,
}

impl PickerOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the filter matching mode (`-matching <mode>`).
	pub fn matching(mut self, mode: MatchingMode) -> Self {
		self.flags.push("-matching".into());
		self.flags.push(mode.as_str().into());
		self
	}

	/// Makes filtering case-insensitive (`-i`).
	pub fn case_insensitive(mut self) -> Self {
		self.flags.push("-i".into());
		self
	}

	/// Sets the prompt text (`-p <text>`).
	pub fn prompt(mut self, text: impl Into<String>) -> Self {
		self.flags.push("-p".into());
		self.flags.push(text.into());
		self
	}

	/// Adds an extra key-binding flag, e.g. `-kb-accept-custom Shift-Return`.
	pub fn keybinding(mut self, flag: impl Into<String>, binding: impl Into<String>) -> Self {
		self.flags.push(flag.into());
		self.flags.push(binding.into());
		self
	}

	/// Consumes the builder into the ordered flag list.
	pub fn into_flags(self) -> Vec<String> {
		self.flags
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_keep_call_order() {
		let flags = PickerOptions::new()
			.matching(MatchingMode::Normal)
			.case_insensitive()
			.prompt("Search")
			.keybinding("-kb-accept-custom", "Shift-Return")
			.keybinding("-kb-custom-1", "Control-Return")
			.into_flags();

		assert_eq!(
			flags,
			vec![
				"-matching",
				"normal",
				"-i",
				"-p",
				"Search",
				"-kb-accept-custom",
				"Shift-Return",
				"-kb-custom-1",
				"Control-Return",
			]
		);
	}

	#[test]
	fn empty_builder_is_empty() {
		assert!(PickerOptions::new().into_flags().is_empty());
	}
}
