use chrono::NaiveDate;
use classtable_core::binder::EvaluationBinding;
use classtable_core::errors::ScheduleError;
use classtable_core::grid::CellIndex;
use classtable_core::models::week::Week;
use classtable_scheduler::view::{WeekPanel, WeekSelection, WeekView, WeekViewLoader};
use classtable_store::mock::MockSessionStore;
use classtable_store::models::{Paginated, SessionRecord};
use pretty_assertions::assert_eq;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn record(id: i64, class_id: i64, period_slot: u8, date: &str) -> SessionRecord {
    SessionRecord {
        id,
        class_id,
        subject_id: 7,
        teacher_id: 10 + id,
        period_slot,
        date: date.to_string(),
    }
}

fn selection() -> WeekSelection {
    WeekSelection {
        year_label: "2024-2025".to_string(),
        week_number: 1,
        class_id: Some(1),
    }
}

fn empty_page<T>() -> Paginated<T> {
    Paginated {
        items: Vec::new(),
        total_pages: 1,
        total_count: 0,
    }
}

#[tokio::test]
async fn load_assembles_the_selected_week() {
    let mut store = MockSessionStore::new();
    store.expect_list_sessions().times(1).returning(|query| {
        // The anchor year pins week 1 to December 2-8, 2024.
        assert_eq!(query.start_date.to_string(), "2024-12-02");
        assert_eq!(query.end_date.to_string(), "2024-12-08");
        Ok(Paginated {
            items: vec![record(1, 1, 2, "2024-12-02"), record(2, 1, 3, "2024-12-03")],
            total_pages: 1,
            total_count: 2,
        })
    });
    store
        .expect_list_evaluations()
        .times(1)
        .returning(|_| Ok(empty_page()));
    store.expect_list_activities().times(1).returning(|| Ok(Vec::new()));

    let loader = WeekViewLoader::new(store);
    let view = loader.load(&selection()).await.expect("week 1 exists");

    assert_eq!(view.week.start, date(2024, 12, 2));
    assert_eq!(view.sessions.len(), 2);
    assert_eq!(view.cells.len(), 2);
    assert_eq!(view.cells.get(1, 2, date(2024, 12, 2)).unwrap().id, 1);
    assert!(view.evaluations.by_session.is_empty());
}

#[tokio::test]
async fn load_pages_through_every_session_page() {
    let mut store = MockSessionStore::new();
    store.expect_list_sessions().times(3).returning(|query| {
        let items = match query.page {
            1 => vec![record(1, 1, 1, "2024-12-02")],
            2 => vec![record(2, 1, 2, "2024-12-02")],
            _ => vec![record(3, 1, 3, "2024-12-02")],
        };
        Ok(Paginated {
            items,
            total_pages: 3,
            total_count: 3,
        })
    });
    store
        .expect_list_evaluations()
        .returning(|_| Ok(empty_page()));
    store.expect_list_activities().returning(|| Ok(Vec::new()));

    let loader = WeekViewLoader::new(store);
    let view = loader.load(&selection()).await.expect("three pages");

    assert_eq!(view.sessions.len(), 3);
}

#[test_log::test(tokio::test)]
async fn unreadable_session_records_are_skipped() {
    let mut store = MockSessionStore::new();
    store.expect_list_sessions().returning(|_| {
        Ok(Paginated {
            items: vec![record(1, 1, 2, "2024-12-02"), record(2, 1, 3, "garbage")],
            total_pages: 1,
            total_count: 2,
        })
    });
    store
        .expect_list_evaluations()
        .returning(|_| Ok(empty_page()));
    store.expect_list_activities().returning(|| Ok(Vec::new()));

    let loader = WeekViewLoader::new(store);
    let view = loader.load(&selection()).await.expect("one readable record");

    assert_eq!(view.sessions.len(), 1);
    assert_eq!(view.sessions[0].id, 1);
}

#[tokio::test]
async fn an_empty_week_skips_the_evaluation_fetch() {
    let mut store = MockSessionStore::new();
    store.expect_list_sessions().returning(|_| Ok(empty_page()));
    // No list_evaluations expectation: calling it would fail the test.
    store.expect_list_activities().returning(|| Ok(Vec::new()));

    let loader = WeekViewLoader::new(store);
    let view = loader.load(&selection()).await.expect("empty week");

    assert!(view.sessions.is_empty());
    assert!(view.evaluations.by_session.is_empty());
    assert!(view.evaluations.unmatched.is_empty());
}

#[tokio::test]
async fn an_unknown_week_number_is_not_found() {
    let loader = WeekViewLoader::new(MockSessionStore::new());
    let unknown = WeekSelection {
        week_number: 999,
        ..selection()
    };

    let result = loader.load(&unknown).await;

    assert!(matches!(result, Err(ScheduleError::NotFound(_))));
}

#[tokio::test]
async fn a_malformed_year_label_is_not_found() {
    let loader = WeekViewLoader::new(MockSessionStore::new());
    let malformed = WeekSelection {
        year_label: "abcd".to_string(),
        ..selection()
    };

    let result = loader.load(&malformed).await;

    assert!(matches!(result, Err(ScheduleError::NotFound(_))));
}

fn view_for(selection: &WeekSelection) -> WeekView {
    WeekView {
        selection: selection.clone(),
        week: Week {
            label: "02.12.2024 - 08.12.2024".to_string(),
            start: date(2024, 12, 2),
            end: date(2024, 12, 8),
            week_number: selection.week_number,
        },
        sessions: Vec::new(),
        cells: CellIndex::build(&[]),
        evaluations: EvaluationBinding::default(),
    }
}

#[test]
fn panel_accepts_a_response_for_the_current_selection() {
    let mut panel = WeekPanel::new();
    panel.select(selection());

    assert!(panel.apply(view_for(&selection())));
    assert!(panel.view().is_some());
}

#[test_log::test]
fn panel_discards_a_stale_response() {
    let mut panel = WeekPanel::new();
    panel.select(selection());

    // The user moves on before the first response lands.
    let newer = WeekSelection {
        week_number: 2,
        ..selection()
    };
    panel.select(newer.clone());

    assert!(!panel.apply(view_for(&selection())));
    assert!(panel.view().is_none());

    assert!(panel.apply(view_for(&newer)));
    assert_eq!(panel.current(), Some(&newer));
}

#[test]
fn reselecting_a_new_week_clears_the_displayed_view() {
    let mut panel = WeekPanel::new();
    panel.select(selection());
    assert!(panel.apply(view_for(&selection())));

    let newer = WeekSelection {
        week_number: 2,
        ..selection()
    };
    panel.select(newer);

    assert!(panel.view().is_none());
}

#[test]
fn reselecting_the_same_week_keeps_the_displayed_view() {
    let mut panel = WeekPanel::new();
    panel.select(selection());
    assert!(panel.apply(view_for(&selection())));

    panel.select(selection());

    assert!(panel.view().is_some());
}
