//! Catalog query-string construction.

/// Query term used when no title, author or genre narrows the search.
pub const DEFAULT_TERM: &str = "fiction";

/// Genre label meaning "do not filter by subject".
pub const ANY_GENRE: &str = "Any Genre";

/// Genres offered to users, in display order.
pub const GENRES: &[&str] = &[
    ANY_GENRE,
    "Fiction",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Fantasy",
    "Biography",
    "History",
    "Self-Help",
    "Business",
    "Philosophy",
    "Psychology",
    "Poetry",
    "Horror",
    "Thriller",
    "Adventure",
];

const SUBJECT_OVERRIDES: &[(&str, &str)] = &[
    ("Science Fiction", "science fiction"),
    ("Self-Help", "self help"),
];

/// Map a display genre onto the catalog's subject vocabulary.
pub fn subject_term(genre: &str) -> String {
    SUBJECT_OVERRIDES
        .iter()
        .find(|(label, _)| *label == genre)
        .map(|(_, subject)| (*subject).to_string())
        .unwrap_or_else(|| genre.to_lowercase())
}

/// Build the conjunctive `q` parameter: title, author, then genre clauses
/// joined by ` AND `, or [`DEFAULT_TERM`] when nothing was supplied.
pub fn build_query(genre: Option<&str>, author: Option<&str>, title: Option<&str>) -> String {
    let mut clauses = Vec::with_capacity(3);
    if let Some(title) = present(title) {
        clauses.push(clause("title", title));
    }
    if let Some(author) = present(author) {
        clauses.push(clause("author", author));
    }
    if let Some(genre) = present(genre).filter(|g| *g != ANY_GENRE) {
        clauses.push(clause("subject", &subject_term(genre)));
    }
    if clauses.is_empty() {
        DEFAULT_TERM.to_string()
    } else {
        clauses.join(" AND ")
    }
}

fn clause(field: &str, value: &str) -> String {
    format!("{field}:\"{value}\"")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
