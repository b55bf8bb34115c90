//! Classification of freeform picker input.
//!
//! When the user types free text into the picker instead of selecting a
//! row, the bridge has to guess what they meant: a full URL, a bare domain,
//! or a web search. The rules are ordered and total - every string
//! classifies as something.

use std::sync::LazyLock;

use regex::Regex;

/// Scheme-qualified URL with no embedded whitespace or quotes.
static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"^(?:ftp|http|https)://[^ "]+$"#).expect("static pattern is valid")
});

/// Dotted labels ending in an alphabetic TLD of length >= 2.
static BARE_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").expect("static pattern is valid")
});

/// What a piece of freeform input turned out to be.
///
/// Consumed immediately via [`navigable_url`](ClassifiedInput::navigable_url);
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedInput {
	/// Already a complete URL; navigate to it unchanged.
	AbsoluteUrl(String),
	/// Looks like a host name; navigate to it over https.
	BareDomain(String),
	/// Anything else; hand it to the web search engine.
	SearchQuery(String),
}

impl ClassifiedInput {
	/// Builds the URL to navigate to. `search_url` is the search engine
	/// prefix the query is appended to, percent-encoded.
	pub fn navigable_url(&self, search_url: &str) -> String {
		match self {
			ClassifiedInput::AbsoluteUrl(url) => url.clone(),
			ClassifiedInput::BareDomain(domain) => format!("https://{domain}"),
			ClassifiedInput::SearchQuery(query) => {
				format!("{search_url}{}", urlencoding::encode(query))
			}
		}
	}
}

/// Classifies freeform input. Total, deterministic, side-effect-free.
pub fn classify(input: &str) -> ClassifiedInput {
	if ABSOLUTE_URL.is_match(input) {
		ClassifiedInput::AbsoluteUrl(input.to_owned())
	} else if BARE_DOMAIN.is_match(input) {
		ClassifiedInput::BareDomain(input.to_owned())
	} else {
		ClassifiedInput::SearchQuery(input.to_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SEARCH: &str = "https://www.google.com/search?q=";

	#[test]
	fn absolute_urls_pass_through_unchanged() {
		for input in [
			"https://example.com",
			"http://example.com/path?q=1#frag",
			"ftp://files.example.com/pub",
			"https://localhost:8080/x",
		] {
			match classify(input) {
				ClassifiedInput::AbsoluteUrl(url) => assert_eq!(url, input),
				other => panic!("expected AbsoluteUrl for {input:?}, got {other:?}"),
			}
			assert_eq!(classify(input).navigable_url(SEARCH), input);
		}
	}

	#[test]
	fn embedded_whitespace_or_quote_disqualifies_a_url() {
		for input in [
			"https://example.com/a b",
			"http://example.com/\"x\"",
			"file:///etc/hosts",
			"mailto:a@b.com",
		] {
			assert!(
				!matches!(classify(input), ClassifiedInput::AbsoluteUrl(_)),
				"{input:?} must not classify as an absolute URL"
			);
		}
	}

	#[test]
	fn bare_domains_get_https() {
		for (input, expected) in [
			("example.com", "https://example.com"),
			("sub.domain.co.uk", "https://sub.domain.co.uk"),
			("my-site.org", "https://my-site.org"),
		] {
			match classify(input) {
				ClassifiedInput::BareDomain(domain) => assert_eq!(domain, input),
				other => panic!("expected BareDomain for {input:?}, got {other:?}"),
			}
			assert_eq!(classify(input).navigable_url(SEARCH), expected);
		}
	}

	#[test]
	fn short_or_numeric_tlds_are_not_domains() {
		for input in ["a.b", "example.c0m", "example.", ".com", "example"] {
			assert!(
				!matches!(classify(input), ClassifiedInput::BareDomain(_)),
				"{input:?} must not classify as a bare domain"
			);
		}
	}

	#[test]
	fn everything_else_becomes_a_search() {
		match classify("rust programming") {
			ClassifiedInput::SearchQuery(query) => assert_eq!(query, "rust programming"),
			other => panic!("expected SearchQuery, got {other:?}"),
		}
		assert_eq!(
			classify("rust programming").navigable_url(SEARCH),
			"https://www.google.com/search?q=rust%20programming"
		);
	}

	#[test]
	fn search_query_is_percent_encoded() {
		assert_eq!(
			classify("a&b=c?").navigable_url(SEARCH),
			"https://www.google.com/search?q=a%26b%3Dc%3F"
		);
	}

	#[test]
	fn classification_is_total() {
		// Never panics, always produces a URL.
		for input in ["", " ", "\"", "héllo wörld", "日本語"] {
			let _ = classify(input).navigable_url(SEARCH);
		}
	}
}
