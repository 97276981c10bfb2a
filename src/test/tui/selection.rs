use super::{AGGREGATE_INDEX, AGGREGATE_LABEL, SelectionEngine};

fn engine_with(names: &[&str], per_page: usize) -> SelectionEngine {
    let mut engine = SelectionEngine::new(per_page);
    engine.set_targets(names.iter().copied());
    engine
}

fn page_names(engine: &SelectionEngine) -> Vec<String> {
    engine.current_page_items().iter().map(|target| target.name.clone()).collect()
}

fn move_cursor_to(engine: &mut SelectionEngine, name: &str) {
    let pos = engine
        .current_page_items()
        .iter()
        .position(|target| target.name == name)
        .unwrap_or_else(|| panic!("{name} not on current page"));
    engine.move_cursor(-(engine.cursor() as isize));
    engine.move_cursor(pos as isize);
    assert_eq!(engine.cursor(), pos);
}

fn aggregate_invariant_holds(engine: &SelectionEngine) -> bool {
    let every_real = (1..engine.master_len()).all(|idx| engine.is_selected(idx));
    let aggregate = engine.is_selected(AGGREGATE_INDEX);
    if engine.real_target_count() == 0 { !aggregate } else { aggregate == every_real }
}

#[test]
fn set_targets_prepends_aggregate_and_resets_state() {
    let mut engine = engine_with(&["postgres", "app_db"], 10);
    engine.set_filter("app");
    engine.toggle_at_cursor();

    engine.set_targets(["one", "two", "three"]);

    assert_eq!(page_names(&engine), vec![AGGREGATE_LABEL, "one", "two", "three"]);
    assert_eq!(engine.filter(), "");
    assert_eq!(engine.page_index(), 0);
    assert_eq!(engine.cursor(), 0);
    assert!(engine.selection_snapshot().is_empty());
    assert_eq!(engine.current_page_items()[0].master_index, AGGREGATE_INDEX);
    assert_eq!(engine.current_page_items()[3].master_index, 3);
}

#[test]
fn aggregate_toggle_selects_all_then_clears() {
    for n in 1..=7 {
        let names: Vec<String> = (0..n).map(|i| format!("db{i}")).collect();
        let mut engine = SelectionEngine::new(3);
        engine.set_targets(names);

        engine.toggle_at_cursor();
        assert_eq!(engine.selection_snapshot().len(), n + 1, "select all with {n} targets");
        assert!(engine.all_selected());

        engine.toggle_at_cursor();
        assert!(engine.selection_snapshot().is_empty(), "clear all with {n} targets");
    }
}

#[test]
fn aggregate_only_list_never_selects_aggregate() {
    let mut engine = engine_with(&[], 10);
    assert_eq!(engine.master_len(), 1);

    engine.toggle_at_cursor();
    assert!(!engine.all_selected());
    assert!(engine.selection_snapshot().is_empty());
    assert!(engine.selected_real_targets().is_empty());
}

#[test]
fn selecting_every_real_target_individually_adds_aggregate() {
    let mut engine = engine_with(&["a", "b", "c"], 10);

    for name in ["a", "b"] {
        move_cursor_to(&mut engine, name);
        engine.toggle_at_cursor();
        assert!(!engine.all_selected());
    }
    move_cursor_to(&mut engine, "c");
    engine.toggle_at_cursor();

    assert!(engine.all_selected());
    assert_eq!(engine.selection_snapshot().len(), 4);
}

#[test]
fn deselecting_one_target_breaks_select_all() {
    let mut engine = engine_with(&["a", "b", "c"], 10);
    engine.toggle_at_cursor();
    assert!(engine.all_selected());

    move_cursor_to(&mut engine, "b");
    engine.toggle_at_cursor();

    assert!(!engine.all_selected());
    assert_eq!(engine.selected_real_targets(), vec!["a", "c"]);
}

#[test]
fn aggregate_toggle_with_partial_selection_selects_everything() {
    let mut engine = engine_with(&["a", "b", "c"], 10);
    move_cursor_to(&mut engine, "b");
    engine.toggle_at_cursor();

    move_cursor_to(&mut engine, AGGREGATE_LABEL);
    engine.toggle_at_cursor();

    assert!(engine.all_selected());
    assert_eq!(engine.selected_real_targets(), vec!["a", "b", "c"]);
}

#[test]
fn filter_excludes_non_matching_names_including_aggregate() {
    let mut engine = engine_with(&["postgres", "app_db", "app_test"], 10);

    engine.set_filter("app");

    assert_eq!(page_names(&engine), vec!["app_db", "app_test"]);
    assert_eq!(engine.filtered_len(), 2);
}

#[test]
fn filter_keeps_aggregate_when_its_label_matches() {
    let mut engine = engine_with(&["postgres", "app_db", "app_test"], 10);

    engine.set_filter("ALL");
    assert_eq!(page_names(&engine), vec![AGGREGATE_LABEL]);

    engine.set_filter("dAtAbAsEs");
    assert_eq!(page_names(&engine), vec![AGGREGATE_LABEL]);
}

#[test]
fn filter_is_case_insensitive() {
    let mut engine = engine_with(&["Sales", "SALES_archive", "hr"], 10);
    engine.set_filter("sAlEs");
    assert_eq!(page_names(&engine), vec!["Sales", "SALES_archive"]);
}

#[test]
fn empty_filter_restores_master_list() {
    let mut engine = engine_with(&["postgres", "app_db"], 10);
    engine.set_filter("zzz");
    engine.set_filter("");
    assert_eq!(page_names(&engine), vec![AGGREGATE_LABEL, "postgres", "app_db"]);
}

#[test]
fn partial_individual_selection_does_not_add_aggregate() {
    let mut engine = engine_with(&["postgres", "app_db", "app_test"], 10);
    engine.set_filter("app");

    move_cursor_to(&mut engine, "app_db");
    engine.toggle_at_cursor();
    move_cursor_to(&mut engine, "app_test");
    engine.toggle_at_cursor();

    assert!(engine.is_selected(2));
    assert!(engine.is_selected(3));
    assert!(!engine.is_selected(1));
    assert!(!engine.all_selected());
}

#[test]
fn selection_survives_filter_changes() {
    let mut engine = engine_with(&["postgres", "app_db", "app_test"], 10);
    engine.set_filter("test");
    engine.toggle_at_cursor();
    engine.set_filter("");

    assert!(engine.is_selected(3));
    assert_eq!(engine.selected_real_targets(), vec!["app_test"]);
}

#[test]
fn toggling_with_no_visible_rows_is_a_noop() {
    let mut engine = engine_with(&["postgres", "app_db"], 10);
    engine.set_filter("nothing-matches");

    assert!(engine.current_page_items().is_empty());
    assert_eq!(engine.cursor(), 0);
    engine.toggle_at_cursor();
    engine.move_cursor(3);
    assert_eq!(engine.cursor(), 0);
    assert!(engine.selection_snapshot().is_empty());
    assert_eq!(engine.page_window(), (0, 0, 0));
}

#[test]
fn pages_never_exceed_per_page_and_reconstruct_filtered_view() {
    let names: Vec<String> = (0..23).map(|i| format!("db_{i:02}")).collect();
    for per_page in 1..=12 {
        let mut engine = SelectionEngine::new(per_page);
        engine.set_targets(names.clone());
        for filter in ["", "db_1", "2", "none"] {
            engine.set_filter(filter);
            while engine.page_index() > 0 {
                engine.prev_page();
            }

            let mut collected = Vec::new();
            for page in 0..engine.total_pages() {
                assert_eq!(engine.page_index(), page);
                let items = engine.current_page_items();
                assert!(items.len() <= per_page);
                collected.extend(items.iter().map(|target| target.master_index));
                engine.next_page();
            }

            let expected: Vec<usize> = std::iter::once("All Databases".to_string())
                .chain(names.iter().cloned())
                .enumerate()
                .filter(|(_, name)| name.to_lowercase().contains(filter))
                .map(|(idx, _)| idx)
                .collect();
            assert_eq!(collected, expected, "per_page={per_page} filter={filter:?}");
        }
    }
}

#[test]
fn paging_clamps_and_resets_cursor() {
    let names: Vec<String> = (0..12).map(|i| format!("db{i}")).collect();
    let mut engine = SelectionEngine::new(5);
    engine.set_targets(names);
    assert_eq!(engine.total_pages(), 3);

    engine.move_cursor(2);
    engine.next_page();
    assert_eq!(engine.page_index(), 1);
    assert_eq!(engine.cursor(), 0);

    engine.next_page();
    engine.next_page();
    assert_eq!(engine.page_index(), 2);
    assert_eq!(engine.page_window(), (11, 13, 13));

    engine.prev_page();
    engine.prev_page();
    engine.prev_page();
    assert_eq!(engine.page_index(), 0);
}

#[test]
fn cursor_is_clamped_to_current_page() {
    let mut engine = engine_with(&["a", "b", "c", "d", "e", "f"], 4);

    engine.move_cursor(10);
    assert_eq!(engine.cursor(), 3);
    engine.move_cursor(-10);
    assert_eq!(engine.cursor(), 0);

    engine.next_page();
    engine.move_cursor(10);
    assert_eq!(engine.cursor(), 2);
}

#[test]
fn filter_clamps_page_and_cursor_into_range() {
    let names: Vec<String> = (0..20).map(|i| format!("db{i}")).collect();
    let mut engine = SelectionEngine::new(5);
    engine.set_targets(names);
    engine.next_page();
    engine.next_page();
    engine.next_page();
    engine.move_cursor(4);
    assert_eq!(engine.page_index(), 3);

    engine.set_filter("db1");
    assert_eq!(engine.filtered_len(), 11);
    assert_eq!(engine.page_index(), 2);
    assert_eq!(engine.cursor(), 0);

    engine.set_filter("db19");
    assert_eq!(engine.page_index(), 0);
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn selected_real_targets_follow_master_order() {
    let mut engine = engine_with(&["zeta", "alpha", "mid"], 10);
    for name in ["mid", "zeta", "alpha"] {
        move_cursor_to(&mut engine, name);
        engine.toggle_at_cursor();
    }

    assert_eq!(engine.selected_real_targets(), vec!["zeta", "alpha", "mid"]);
    assert!(engine.all_selected());
}

#[test]
fn aggregate_invariant_holds_after_every_mutation() {
    let names: Vec<String> = (0..9).map(|i| format!("{}_{i}", if i % 2 == 0 { "app" } else { "prod" })).collect();
    let filters = ["", "app", "prod", "all", "_1", "nothing"];

    for seed in 0..40u64 {
        let mut engine = SelectionEngine::new(1 + (seed as usize % 4));
        engine.set_targets(names.clone());
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);

        for _ in 0..200 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let roll = (state >> 33) as usize;
            match roll % 6 {
                0 | 1 => engine.toggle_at_cursor(),
                2 => engine.move_cursor((roll % 5) as isize - 2),
                3 => engine.next_page(),
                4 => engine.prev_page(),
                _ => engine.set_filter(filters[roll % filters.len()]),
            }
            assert!(aggregate_invariant_holds(&engine), "seed {seed}: {:?}", engine.selection_snapshot());
            assert!(engine.cursor() < engine.current_page_items().len().max(1));
        }
    }
}

#[test]
fn clear_selection_empties_snapshot() {
    let mut engine = engine_with(&["a", "b"], 10);
    engine.toggle_at_cursor();
    engine.clear_selection();
    assert!(engine.selection_snapshot().is_empty());
    assert!(!engine.all_selected());
}
