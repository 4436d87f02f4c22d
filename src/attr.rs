//! Attribute extraction from template text.
//!
//! Templates mix attributes and visible text in one literal
//! (`` input`type="text" placeholder="Name"` ``). This module scans a raw
//! text fragment for `name="value"` pairs and bare boolean flags, returning
//! a typed attribute table and the residual text.

use crate::element::AttrValue;
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Attribute names with a fixed coercion rule.
///
/// All of them coerce to strings except the four length/size fields listed
/// in `INTEGER_ATTRIBUTES`. Names outside this list are still stored,
/// verbatim as strings; the vocabulary is an extension point, not a filter.
pub const KNOWN_ATTRIBUTES: &[&str] = &[
	"placeholder",
	"type",
	"value",
	"rows",
	"cols",
	"class",
	"id",
	"style",
	"name",
	"href",
	"src",
	"alt",
	"title",
	"maxlength",
	"minlength",
	"min",
	"max",
	"step",
	"for",
];

/// Names matched as bare word-boundary tokens and stored as `Bool(true)`,
/// per the HTML notion of a
/// [***boolean attribute***](https://developer.mozilla.org/en-US/docs/Glossary/Boolean/HTML).
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
	"disabled",
	"readonly",
	"checked",
	"selected",
	"required",
	"autofocus",
	"multiple",
];

const INTEGER_ATTRIBUTES: &[&str] = &["rows", "cols", "maxlength", "minlength"];

// Quotes must balance; a mismatched pair is left in the text untouched.
static PAIR: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r#"([A-Za-z][A-Za-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute pair pattern is valid")
});

static BOOLEAN_TOKENS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
	BOOLEAN_ATTRIBUTES
		.iter()
		.map(|name| (*name, Regex::new(&format!(r"\b{}\b", name)).expect("boolean token pattern is valid")))
		.collect()
});

/// The outcome of one extraction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
	pub attributes: HashMap<String, AttrValue>,
	/// The input with every matched pair and flag removed. Whitespace that
	/// surrounded the matches is preserved.
	pub residual: String,
}

/// Scans `text` for `name="value"` pairs (single or double quotes) and bare
/// boolean flags, removing each match from the residual text.
///
/// Integer-typed attributes (`rows`, `cols`, `maxlength`, `minlength`) are
/// parsed; a value that fails to parse is kept as its original string. This
/// fallback is silent and lossy by design.
///
/// Pure function of the input. Note the documented precision limit: a
/// substring of ordinary prose that happens to look like an attribute pair,
/// or a bare occurrence of a boolean attribute name, is absorbed as an
/// attribute. Callers cannot opt out; quoting the text differently is the
/// only workaround.
#[must_use]
pub fn extract(text: &str) -> Extracted {
	let mut attributes = HashMap::new();
	let mut residual = String::with_capacity(text.len());
	let mut copied_up_to = 0;

	for captures in PAIR.captures_iter(text) {
		let matched = captures.get(0).expect("capture 0 is the whole match");
		let name = &captures[1];
		let value = captures
			.get(2)
			.or_else(|| captures.get(3))
			.map_or("", |quoted| quoted.as_str());
		attributes.insert(name.to_owned(), coerce(name, value));
		residual.push_str(&text[copied_up_to..matched.start()]);
		copied_up_to = matched.end();
	}
	residual.push_str(&text[copied_up_to..]);

	// Flags are only matched after pair stripping, so a quoted value can
	// never donate a flag token. One occurrence per flag is consumed.
	for (name, token) in BOOLEAN_TOKENS.iter() {
		if let Some(found) = token.find(&residual) {
			attributes.insert((*name).to_owned(), AttrValue::Bool(true));
			let range = found.start()..found.end();
			residual.replace_range(range, "");
		}
	}

	Extracted { attributes, residual }
}

fn coerce(name: &str, value: &str) -> AttrValue {
	if INTEGER_ATTRIBUTES.contains(&name) {
		match value.parse::<i64>() {
			Ok(number) => AttrValue::Int(number),
			Err(_) => AttrValue::Str(value.to_owned()),
		}
	} else {
		AttrValue::Str(value.to_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_pairs_and_strips_them() {
		let extracted = extract(r#"type="text"   placeholder="Your name" trailing"#);
		assert_eq!(extracted.attributes["type"], AttrValue::Str("text".to_owned()));
		assert_eq!(extracted.attributes["placeholder"], AttrValue::Str("Your name".to_owned()));
		assert_eq!(extracted.attributes.len(), 2);
		assert_eq!(extracted.residual.trim(), "trailing");
	}

	#[test]
	fn whitespace_between_pairs_is_irrelevant() {
		let tight = extract(r#"id="a" class="b""#);
		let loose = extract("id=\"a\" \t  class = \"b\"");
		assert_eq!(tight.attributes, loose.attributes);
	}

	#[test]
	fn single_quotes_work() {
		let extracted = extract("href='https://example.com/'");
		assert_eq!(
			extracted.attributes["href"],
			AttrValue::Str("https://example.com/".to_owned())
		);
	}

	#[test]
	fn integer_attributes_coerce() {
		let extracted = extract(r#"rows="4" cols="20""#);
		assert_eq!(extracted.attributes["rows"], AttrValue::Int(4));
		assert_eq!(extracted.attributes["cols"], AttrValue::Int(20));
	}

	#[test]
	fn failed_coercion_keeps_the_raw_string() {
		let extracted = extract(r#"rows="abc""#);
		assert_eq!(extracted.attributes["rows"], AttrValue::Str("abc".to_owned()));
	}

	#[test]
	fn unknown_names_are_stored_verbatim() {
		let extracted = extract(r#"data-test="42""#);
		assert_eq!(extracted.attributes["data-test"], AttrValue::Str("42".to_owned()));
	}

	#[test]
	fn boolean_flag_sets_true_and_removes_one_occurrence() {
		let extracted = extract("disabled stay disabled");
		assert_eq!(extracted.attributes["disabled"], AttrValue::Bool(true));
		assert_eq!(extracted.residual.trim(), "stay disabled");
	}

	#[test]
	fn boolean_inside_longer_word_is_not_matched() {
		let extracted = extract("undisabledish");
		assert!(extracted.attributes.is_empty());
		assert_eq!(extracted.residual, "undisabledish");
	}

	#[test]
	fn quoted_value_cannot_donate_a_flag() {
		let extracted = extract(r#"title="checked luggage""#);
		assert_eq!(
			extracted.attributes["title"],
			AttrValue::Str("checked luggage".to_owned())
		);
		assert!(!extracted.attributes.contains_key("checked"));
	}

	#[test]
	fn unbalanced_quotes_are_left_alone() {
		let extracted = extract(r#"value="oops'"#);
		assert!(extracted.attributes.is_empty());
		assert_eq!(extracted.residual, r#"value="oops'"#);
	}

	#[test]
	fn later_duplicate_wins() {
		let extracted = extract(r#"id="first" id="second""#);
		assert_eq!(extracted.attributes["id"], AttrValue::Str("second".to_owned()));
	}

	#[test]
	fn empty_value_is_kept() {
		let extracted = extract(r#"value="""#);
		assert_eq!(extracted.attributes["value"], AttrValue::Str(String::new()));
	}

	#[test]
	fn prose_false_positive_is_absorbed_as_documented() {
		// Known precision limit: this is an attribute pair as far as the
		// scanner is concerned.
		let extracted = extract(r#"the word type="English" here"#);
		assert_eq!(extracted.attributes["type"], AttrValue::Str("English".to_owned()));
	}
}
