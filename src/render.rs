//! Plain-text rendering for terminal output.

use crate::club::BookDiscussion;

pub const NO_SUMMARY: &str = "No summary returned by the model.";
pub const NO_QUESTIONS: &str = "No questions returned by the model.";

pub fn render_discussion(item: &BookDiscussion) -> String {
    let book = &item.book;
    let authors = book.authors.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
    let mut out = format!("**{}** — {authors}\n", book.title);
    if let Some(year) = book.year {
        out.push_str(&format!("Published: {year}\n"));
    }
    if let Some(rating) = book.rating.filter(|r| *r > 0.0) {
        out.push_str(&format!(
            "Rating: {rating:.1}/5 ({} ratings)\n",
            book.rating_count.unwrap_or(0)
        ));
    }
    if !book.subjects.is_empty() {
        let shown = &book.subjects[..book.subjects.len().min(3)];
        out.push_str(&format!("Subjects: {}\n", shown.join(", ")));
    }
    if let Some(url) = &item.cover_url {
        out.push_str(&format!("Cover: {url}\n"));
    }

    out.push_str("\nSummary\n");
    out.push_str(render_summary(&item.generated.summary));
    out.push('\n');

    out.push_str("\nDiscussion Questions\n");
    out.push_str(&render_questions(&item.generated.questions));
    out
}

pub fn render_summary(summary: &str) -> &str {
    if summary.is_empty() {
        NO_SUMMARY
    } else {
        summary
    }
}

/// `1. ...` per line, or the neutral placeholder.
pub fn render_questions(questions: &[String]) -> String {
    if questions.is_empty() {
        return format!("{NO_QUESTIONS}\n");
    }
    questions
        .iter()
        .enumerate()
        .map(|(idx, q)| format!("{}. {q}\n", idx + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        catalog::BookRecord,
        generate::{GenerationResult, Origin},
    };

    fn item(summary: &str, questions: Vec<String>) -> BookDiscussion {
        let mut book = BookRecord::new(
            "Dune",
            vec!["Frank Herbert".into(), "B".into(), "C".into()],
        );
        book.year = Some(1965);
        book.rating = Some(4.256);
        BookDiscussion {
            book,
            cover_url: None,
            generated: GenerationResult {
                summary: summary.into(),
                questions,
                summary_origin: Origin::Backend,
                questions_origin: Origin::Backend,
                generated_at: Utc::now(),
            },
        }
    }

    #[test]
    fn renders_content_with_numbering() {
        let text = render_discussion(&item("A desert planet.", vec!["Why?".into(), "How?".into()]));
        assert!(text.starts_with("**Dune** — Frank Herbert, B\n"));
        assert!(text.contains("Rating: 4.3/5 (0 ratings)"));
        assert!(text.contains("A desert planet."));
        assert!(text.contains("1. Why?\n2. How?\n"));
    }

    #[test]
    fn empty_output_uses_placeholders() {
        let text = render_discussion(&item("", Vec::new()));
        assert!(text.contains(NO_SUMMARY));
        assert!(text.contains(NO_QUESTIONS));
    }

    #[test]
    fn optional_lines_follow_the_header_in_order() {
        let mut discussion = item("Spice.", vec!["Why?".into()]);
        discussion.book.subjects = ["Sand", "Worms", "Politics", "Ecology"]
            .map(String::from)
            .to_vec();
        discussion.cover_url = Some("https://covers.example/b/id/7-M.jpg".into());
        let text = render_discussion(&discussion);
        assert_eq!(
            text,
            "**Dune** — Frank Herbert, B\n\
             Published: 1965\n\
             Rating: 4.3/5 (0 ratings)\n\
             Subjects: Sand, Worms, Politics\n\
             Cover: https://covers.example/b/id/7-M.jpg\n\
             \nSummary\nSpice.\n\
             \nDiscussion Questions\n1. Why?\n"
        );
    }
}
