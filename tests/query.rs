use bookclub::catalog::{
    query::{build_query, subject_term, GENRES},
    SearchQuery,
};
use proptest::prelude::*;

#[test]
fn empty_inputs_default_to_fiction() {
    assert_eq!(build_query(None, None, None), "fiction");
    assert_eq!(build_query(Some(""), Some("  "), Some("")), "fiction");
    assert_eq!(build_query(Some("Any Genre"), None, None), "fiction");
}

#[test]
fn clauses_are_ordered_title_author_genre() {
    assert_eq!(
        build_query(Some("Fantasy"), Some(" Ursula K. Le Guin "), Some("A Wizard of Earthsea")),
        r#"title:"A Wizard of Earthsea" AND author:"Ursula K. Le Guin" AND subject:"fantasy""#
    );
}

#[test]
fn special_genres_map_to_catalog_subjects() {
    assert_eq!(build_query(Some("Science Fiction"), None, None), r#"subject:"science fiction""#);
    assert_eq!(build_query(Some("Self-Help"), None, None), r#"subject:"self help""#);
    assert_eq!(subject_term("Mystery"), "mystery");
    assert_eq!(subject_term("Graphic-Novel"), "graphic-novel");
}

#[test]
fn every_listed_genre_produces_a_lowercase_subject() {
    for genre in GENRES.iter().skip(1) {
        let term = subject_term(genre);
        assert_eq!(term, term.to_lowercase(), "{genre}");
    }
}

#[test]
fn search_query_defaults_to_five_results() {
    let query = SearchQuery::default();
    assert_eq!(query.limit, 5);
    assert_eq!(query.to_query_string(), "fiction");
}

fn field() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z][A-Za-z0-9]{0,11}")
}

proptest! {
    #[test]
    fn one_clause_per_present_input(title in field(), author in field(), genre in field()) {
        let q = build_query(genre.as_deref(), author.as_deref(), title.as_deref());
        let mut expected = Vec::new();
        if let Some(t) = &title {
            expected.push(format!("title:\"{t}\""));
        }
        if let Some(a) = &author {
            expected.push(format!("author:\"{a}\""));
        }
        if let Some(g) = &genre {
            expected.push(format!("subject:\"{}\"", g.to_lowercase()));
        }
        if expected.is_empty() {
            prop_assert_eq!(q, "fiction");
        } else {
            prop_assert_eq!(q.split(" AND ").count(), expected.len());
            prop_assert_eq!(q, expected.join(" AND "));
        }
    }
}
