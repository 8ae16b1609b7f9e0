//! Prompt text for the generation backends.

use crate::catalog::BookRecord;

/// First two authors, or `Unknown`.
pub fn author_text(book: &BookRecord) -> String {
    if book.authors.is_empty() {
        "Unknown".to_string()
    } else {
        book.authors.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
    }
}

/// First three subjects, or `general themes`.
pub fn topic_text(book: &BookRecord) -> String {
    if book.subjects.is_empty() {
        "general themes".to_string()
    } else {
        book.subjects.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
    }
}

pub fn summary_prompt(book: &BookRecord) -> String {
    format!(
        "Write a short, clear summary for '{title}' by {authors} about {topics}. Summary:",
        title = book.title,
        authors = author_text(book),
        topics = topic_text(book),
    )
}

pub fn questions_prompt(book: &BookRecord, k: usize) -> String {
    format!(
        "Generate {k} thoughtful book club discussion questions for the book '{title}' by {authors}. \
         Focus on {topics}. \
         Return ONLY the questions as a numbered list 1-{k}, one per line, no extra commentary.",
        title = book.title,
        authors = author_text(book),
        topics = topic_text(book),
    )
}
