//! Non-generated fallback text built from the record alone.
//!
//! Phrasing is picked with a seeded RNG, so one seed and one record always
//! produce the same text.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::prompt::author_text;
use crate::catalog::BookRecord;

const SUMMARY_OPENINGS: &[&str] = &[
    "{title} by {authors} explores {topics}.",
    "In {title}, {authors} takes readers through {topics}.",
    "{authors} builds {title} around {topics}.",
];

const SUMMARY_CLOSINGS: &[&str] = &[
    "It gives a reading group plenty to talk about.",
    "Expect a lively conversation once everyone has finished it.",
    "There is a lot here to unpack together.",
];

const QUESTION_POOL: &[&str] = &[
    "What did you make of the way {title} handles {topic}?",
    "Which character in {title} changed the most, and why?",
    "How does the writing style of {authors} shape your experience of {title}?",
    "Which scene from {title} stayed with you after you finished reading?",
    "How does {title} connect to your own experience of {topic}?",
    "If you could ask {authors} one question about {title}, what would it be?",
    "What do you think the ending of {title} says about {topic}?",
    "Would you recommend {title} to someone new to {topic}? Why or why not?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackTemplates {
    seed: u64,
}

impl FallbackTemplates {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn summary(&self, book: &BookRecord, key: &str) -> String {
        let mut rng = self.rng(key);
        let opening = SUMMARY_OPENINGS
            .choose(&mut rng)
            .copied()
            .unwrap_or(SUMMARY_OPENINGS[0]);
        let closing = SUMMARY_CLOSINGS
            .choose(&mut rng)
            .copied()
            .unwrap_or(SUMMARY_CLOSINGS[0]);
        format!("{} {closing}", fill(opening, book))
    }

    /// Up to `k` distinct questions; the pool caps how many exist.
    pub fn questions(&self, book: &BookRecord, k: usize, key: &str) -> Vec<String> {
        let mut rng = self.rng(key);
        let mut pool = QUESTION_POOL.to_vec();
        pool.shuffle(&mut rng);
        pool.into_iter().take(k).map(|q| fill(q, book)).collect()
    }

    fn rng(&self, key: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ fnv1a(key))
    }
}

fn fill(template: &str, book: &BookRecord) -> String {
    let topics = if book.subjects.is_empty() {
        "its central themes".to_string()
    } else {
        book.subjects.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
    };
    let topic = book
        .subjects
        .first()
        .cloned()
        .unwrap_or_else(|| "its central themes".to_string());
    template
        .replace("{title}", &book.title)
        .replace("{authors}", &author_text(book))
        .replace("{topics}", &topics)
        .replace("{topic}", &topic)
}

fn fnv1a(input: &str) -> u64 {
    input.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
