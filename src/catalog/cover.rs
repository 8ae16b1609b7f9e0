//! Cover image URLs. The image itself is never fetched here.

use std::fmt;

pub const DEFAULT_COVERS_BASE: &str = "https://covers.openlibrary.org/b/id";

/// Size code understood by the cover service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoverSize {
    S,
    #[default]
    M,
    L,
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        };
        f.write_str(code)
    }
}

/// `{base}/{id}-{size}.jpg`, or `None` when the record carries no usable id.
/// The catalog reports a missing cover as `-1` on some docs.
pub fn cover_url(base: &str, cover_id: Option<i64>, size: CoverSize) -> Option<String> {
    let id = cover_id.filter(|id| *id > 0)?;
    Some(format!("{}/{id}-{size}.jpg", base.trim_end_matches('/')))
}
