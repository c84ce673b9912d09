//! Quote-aware tokenizer and the keyword tables used by the argument extractor.

/// Meta words that carry no information for the extractor.
pub const SKIP_WORDS: &[&str] = &["block", "at", "from", "note", "with"];

/// Words that introduce a project reference.
pub const PROJECT_INTRODUCERS: &[&str] = &["on", "to", "of"];

/// Words that introduce the end timestamp.
pub const END_INTRODUCERS: &[&str] = &["end", "ended", "until", "to"];

/// Vocabulary that marks a token as part of a timestamp phrase.
///
/// A token is time-like when it equals an entry, starts with an entry, or is
/// an abbreviation (at least three characters) of an entry. Prefix matching
/// means a project literally named "mayday" reads as time-like.
pub const TIME_VOCABULARY: &[&str] = &[
    "now", "today", "yesterday", "tomorrow",
    "hour", "hours", "day", "days", "week", "weeks", "month", "months", "year", "years",
    "ago", "last", "this", "next", "previous", "current",
    "am", "pm",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "january", "february", "march", "april", "may", "june", "july",
    "august", "september", "october", "november", "december",
    "morning", "afternoon", "evening", "night",
];

/// Shortest token accepted as an abbreviation of a vocabulary word.
const MIN_ABBREVIATION_LEN: usize = 3;

/// How the extractor treats a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Dropped without effect.
    Skip,
    /// Introduces a project reference (`on`, `of`).
    ProjectIntroducer,
    /// Introduces the end timestamp (`until`, `end`, `ended`).
    EndIntroducer,
    /// `to`: either a project or an end introducer depending on context.
    ProjectOrEnd,
    /// Anything else.
    Word,
}

/// Classify a token against the keyword tables (case-insensitive).
#[must_use]
pub fn classify(token: &str) -> TokenClass {
    let lower = token.to_lowercase();
    let word = lower.as_str();

    if SKIP_WORDS.contains(&word) {
        return TokenClass::Skip;
    }

    match (PROJECT_INTRODUCERS.contains(&word), END_INTRODUCERS.contains(&word)) {
        (true, true) => TokenClass::ProjectOrEnd,
        (true, false) => TokenClass::ProjectIntroducer,
        (false, true) => TokenClass::EndIntroducer,
        (false, false) => TokenClass::Word,
    }
}

/// Whether a token looks like part of a timestamp phrase.
///
/// True when the token starts with a digit, or matches an entry of
/// [`TIME_VOCABULARY`] exactly, by prefix, or as an abbreviation.
#[must_use]
pub fn is_time_like(token: &str) -> bool {
    let lower = token.trim().to_lowercase();

    if lower.starts_with(|c: char| c.is_ascii_digit()) {
        return true;
    }
    if lower.is_empty() {
        return false;
    }

    TIME_VOCABULARY.iter().any(|word| {
        lower.starts_with(*word)
            || (lower.chars().count() >= MIN_ABBREVIATION_LEN && word.starts_with(lower.as_str()))
    })
}

/// Split input into tokens, treating single- or double-quoted spans as one token.
///
/// Quotes are removed from the token. A quote character inside a span opened
/// by the other quote character is literal. An unterminated quote runs to the
/// end of the input. Quotes in the middle of a word join the quoted span to
/// that word.
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            },
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            },
            None => {
                current.push(c);
                in_token = true;
            },
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}
