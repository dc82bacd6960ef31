/// Phrases that mark a query as asking about a specific exercise.
/// Order matters for extraction: the first phrase found wins.
pub const TRIGGER_PHRASES: &[&str] = &["describe", "how to", "what is", "tell me about", "explain"];

/// Whether the query looks like a request to describe an exercise.
///
/// Plain substring match on the lower-cased query, so "what is not a good
/// warmup" also counts. No tokenization or negation handling.
pub fn is_description_query(query: &str) -> bool {
    let lower = query.to_lowercase();
    TRIGGER_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Pull a candidate exercise name out of a description query.
///
/// Takes the text after the first trigger phrase (checked in `TRIGGER_PHRASES`
/// order, each followed by a space), trims it and drops question marks. Without
/// a trigger phrase the whole lower-cased query is returned minus question marks.
pub fn extract_exercise_name(query: &str) -> String {
    let lower = query.to_lowercase();
    for phrase in TRIGGER_PHRASES {
        let keyword = format!("{phrase} ");
        if let Some((_, rest)) = lower.split_once(keyword.as_str()) {
            return rest.trim().replace('?', "");
        }
    }
    lower.replace('?', "")
}
