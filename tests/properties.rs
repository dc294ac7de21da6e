//! Property tests: round-trip rendering, antisymmetric ordering, idempotent clamping

use proptest::prelude::*;
use std::sync::Arc;
use versicle::testing::fixture_canon;
use versicle::{parse, parse_with, Book, Canon, HierarchyProvider, Locator, LocatorBuilder};

const BOOKS: [&str; 3] = ["AAAAA", "BBBBB", "CCCCC"];

/// Citations over the fixture canon, including out-of-range chapters and verses
fn fixture_citation() -> impl Strategy<Value = String> {
    (
        prop::sample::select(BOOKS.to_vec()),
        0u32..10,
        prop::collection::vec((0u32..120, 0u32..6), 0..4),
    )
        .prop_map(|(book, chapter, ranges)| {
            let list: Vec<String> = ranges
                .iter()
                .map(|&(start, len)| {
                    if len == 0 {
                        start.to_string()
                    } else {
                        format!("{}-{}", start, start + len)
                    }
                })
                .collect();
            if list.is_empty() {
                format!("{book} {chapter}")
            } else {
                format!("{book} {chapter}:{}", list.join(","))
            }
        })
}

/// Synthetic book names that never start with a small number
fn synthetic_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-ZÉÖΨ][a-zéïöüßλ]{0,6}", 1..4).prop_map(|words| words.join(" "))
}

/// A canon whose book names are not plain ASCII
fn accented_canon() -> Arc<dyn HierarchyProvider> {
    Arc::new(Canon::new(
        "Accents",
        vec![
            Book::new(1, "Ésaïe", vec![31, 22, 26, 6, 30, 13]),
            Book::new(2, "Ödön", vec![12, 40]),
            Book::new(3, "Ψαλμοί", vec![6, 12, 8, 8, 12]),
            Book::new(4, "Ésdras", vec![11, 70, 13]),
        ],
    ))
}

fn fixture(text: &str) -> Locator {
    parse_with(text, fixture_canon()).create()
}

proptest! {
    #[test]
    fn fixture_locators_round_trip(text in fixture_citation()) {
        let locator = fixture(&text);
        let rendered = locator.to_string();
        prop_assert_eq!(fixture(&rendered), locator, "{} -> {}", text, rendered);
    }

    #[test]
    fn synthetic_locators_round_trip(
        name in synthetic_name(),
        chapter in 1u32..500,
        verses in prop::collection::btree_set(1u32..300, 0..12),
    ) {
        let mut builder = LocatorBuilder::new();
        builder.set_book(&name).set_chapter(chapter).set_verses(verses);
        let locator = builder.create();
        let rendered = locator.to_string();
        prop_assert_eq!(parse(&rendered).create(), locator, "{}", rendered);
    }

    #[test]
    fn accented_locators_round_trip(
        ordinal in 1u32..=4,
        chapter in 1u32..8,
        verses in prop::collection::btree_set(1u32..80, 0..6),
    ) {
        let hierarchy = accented_canon();
        let mut builder = LocatorBuilder::with_hierarchy(hierarchy.clone());
        builder
            .set_book_entry(hierarchy.book_at(ordinal).unwrap())
            .set_chapter(chapter)
            .set_verses(verses);
        let locator = builder.create();
        let rendered = locator.to_string();
        let reparsed = parse_with(&rendered, hierarchy).create();
        prop_assert!(!reparsed.book().is_synthetic(), "{}", rendered);
        prop_assert_eq!(reparsed, locator, "{}", rendered);
    }

    #[test]
    fn compare_is_antisymmetric(a in fixture_citation(), b in fixture_citation()) {
        let (a, b) = (fixture(&a), fixture(&b));
        prop_assert_eq!(a.compare(&b), -b.compare(&a));
        prop_assert_eq!(a.compare(&b) == 0, a == b);
        prop_assert!(a.compare(&b).abs() <= 4);
    }

    #[test]
    fn chapter_clamping_is_idempotent(book in prop::sample::select(BOOKS.to_vec()), chapter in 0u32..20) {
        let mut once = LocatorBuilder::with_hierarchy(fixture_canon());
        once.set_book(book).set_chapter(chapter);
        let mut twice = once.clone();
        twice.set_chapter(chapter);

        prop_assert_eq!(once.chapter(), twice.chapter());
        prop_assert_eq!(once.flags(), twice.flags());
    }

    #[test]
    fn created_locators_are_within_bounds(text in fixture_citation()) {
        let locator = fixture(&text);
        let count = locator.book().verse_count(locator.chapter());
        prop_assert!(count.is_some());
        let count = count.unwrap_or_default();
        prop_assert!(!locator.verses().is_empty());
        prop_assert!(locator.verses().windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(locator.verses().iter().all(|&v| (1..=count).contains(&v)));
    }
}
