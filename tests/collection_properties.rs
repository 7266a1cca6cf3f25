//! Property tests for the collection view engine.

use proptest::prelude::*;

use outreach_desk::view::collection::{
    FieldValue, Query, Record, SortDirection, apply,
};
use outreach_desk::view::selection::SelectionSet;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u64,
    name: String,
    status: String,
    score: u32,
}

impl Record for Row {
    fn id(&self) -> u64 {
        self.id
    }

    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "status" => Some(FieldValue::Text(&self.status)),
            "score" => Some(FieldValue::Number(f64::from(self.score))),
            _ => None,
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["name", "status", "score"]
    }
}

fn status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("New".to_string()),
        Just("Contacted".to_string()),
        Just("Qualified".to_string()),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(("[a-z]{1,8}", status_strategy(), 0u32..100), 0..40).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (name, status, score))| Row {
                id: i as u64 + 1,
                name,
                status,
                score,
            })
            .collect()
    })
}

fn ids(rows: &[&Row]) -> Vec<u64> {
    rows.iter().map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn empty_search_returns_every_record_in_order(rows in rows_strategy()) {
        let out = apply(&rows, &Query::new()).unwrap();
        let expected: Vec<u64> = rows.iter().map(|r| r.id).collect();
        prop_assert_eq!(ids(&out), expected);
    }

    #[test]
    fn search_for_unique_marker_returns_exactly_that_record(
        rows in rows_strategy(),
        pick in 0usize..40,
    ) {
        let mut rows = rows;
        if rows.is_empty() {
            return Ok(());
        }
        let pick = pick % rows.len();
        // The marker cannot occur in generated names (those are lowercase only).
        rows[pick].name = format!("XQZ-{}", rows[pick].id);

        let query = Query::new().with_search(rows[pick].name.to_lowercase());
        let out = apply(&rows, &query).unwrap();
        prop_assert_eq!(ids(&out), vec![rows[pick].id]);
    }

    #[test]
    fn derivation_is_idempotent(rows in rows_strategy(), status in status_strategy()) {
        let query = Query::new()
            .with_filter("status", status)
            .with_sort("score", SortDirection::Asc);
        let once: Vec<Row> = apply(&rows, &query).unwrap().into_iter().cloned().collect();
        let twice = apply(&once, &query).unwrap();
        let expected: Vec<u64> = once.iter().map(|r| r.id).collect();
        prop_assert_eq!(ids(&twice), expected);
    }

    #[test]
    fn all_sentinel_is_equivalent_to_no_filter(rows in rows_strategy()) {
        let unfiltered = apply(&rows, &Query::new()).unwrap();
        let sentinel = apply(&rows, &Query::new().with_filter("status", "all")).unwrap();
        prop_assert_eq!(ids(&sentinel), ids(&unfiltered));
    }

    #[test]
    fn filters_and_search_combine_with_and(rows in rows_strategy(), status in status_strategy()) {
        let query = Query::new().with_filter("status", status.clone());
        let out = apply(&rows, &query).unwrap();
        for row in &out {
            prop_assert_eq!(&row.status, &status);
        }
        // Every matching record is included, none dropped.
        let expected = rows.iter().filter(|r| r.status == status).count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn descending_reverses_ascending_when_keys_are_distinct(
        scores in prop::collection::hash_set(0u32..10_000, 0..30),
    ) {
        let rows: Vec<Row> = scores
            .into_iter()
            .enumerate()
            .map(|(i, score)| Row {
                id: i as u64 + 1,
                name: format!("row{i}"),
                status: "New".to_string(),
                score,
            })
            .collect();

        let asc = apply(&rows, &Query::new().with_sort("score", SortDirection::Asc)).unwrap();
        let desc = apply(&rows, &Query::new().with_sort("score", SortDirection::Desc)).unwrap();

        let mut asc_ids = ids(&asc);
        asc_ids.reverse();
        prop_assert_eq!(ids(&desc), asc_ids);
    }

    #[test]
    fn sorting_never_adds_or_drops_records(rows in rows_strategy()) {
        let sorted = apply(&rows, &Query::new().with_sort("name", SortDirection::Desc)).unwrap();
        prop_assert_eq!(sorted.len(), rows.len());
        let mut seen = ids(&sorted);
        seen.sort_unstable();
        let mut expected: Vec<u64> = rows.iter().map(|r| r.id).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn select_all_selects_exactly_the_visible_set_and_second_toggle_clears(
        rows in rows_strategy(),
        status in status_strategy(),
    ) {
        let query = Query::new().with_filter("status", status);
        let visible = apply(&rows, &query).unwrap();
        let visible_ids = ids(&visible);

        let mut selection = SelectionSet::new();
        selection.toggle_all(&visible_ids);
        let selected: Vec<u64> = selection.ids().collect();
        let mut expected = visible_ids.clone();
        expected.sort_unstable();
        prop_assert_eq!(selected, expected);

        selection.toggle_all(&visible_ids);
        prop_assert!(selection.is_empty());
    }
}
