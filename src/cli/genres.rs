//! CLI entry-point listing supported genres.

use anyhow::Result;

use crate::catalog::query::{subject_term, ANY_GENRE, GENRES};

pub fn run() -> Result<()> {
    for genre in GENRES {
        if *genre == ANY_GENRE {
            println!("{genre}");
        } else {
            println!("{genre}\t(subject: {})", subject_term(genre));
        }
    }
    Ok(())
}
