//! Keyword tag extraction for ingested items.

/// Fixed tag vocabulary, in canonical order.
///
/// Tags are always drawn from this list; the importer never introduces
/// free-form tags.
pub const TAG_VOCABULARY: &[&str] = &[
    "housing",
    "density",
    "zoning",
    "transit",
    "development",
    "affordability",
    "bikes",
    "biking",
    "walkability",
    "urbanism",
    "planning",
    "policy",
    "durham",
    "raleigh",
    "triangle",
    "north carolina",
    "nc",
    "single-stair",
    "stair",
    "apartment",
    "building",
    "construction",
    "parking",
    "vision zero",
    "safety",
    "infrastructure",
];

/// Upper bound on tags per item.
pub const MAX_TAGS: usize = 5;

/// Scan title and description for vocabulary keywords.
///
/// Matching is case-insensitive substring search over the concatenated
/// text. Results come back in first-occurrence order within the text
/// (vocabulary order breaks ties), capped at [`MAX_TAGS`].
pub fn extract_tags(title: &str, description: &str) -> Vec<String> {
    let haystack = format!("{} {}", title, description).to_lowercase();

    let mut matches: Vec<(usize, usize)> = TAG_VOCABULARY
        .iter()
        .enumerate()
        .filter_map(|(vocab_idx, keyword)| {
            haystack.find(keyword).map(|pos| (pos, vocab_idx))
        })
        .collect();
    matches.sort();

    matches
        .into_iter()
        .take(MAX_TAGS)
        .map(|(_, vocab_idx)| TAG_VOCABULARY[vocab_idx].to_string())
        .collect()
}
