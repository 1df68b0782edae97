use chrono::NaiveDate;
use classtable_core::errors::ScheduleError;
use classtable_core::models::session::Session;
use classtable_scheduler::mutator::{NewSession, ScheduleMutator};
use classtable_store::mock::MockSessionStore;
use classtable_store::models::{SessionRecord, SessionWrite};
use mockall::predicate;
use pretty_assertions::assert_eq;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// Friday, January 10, 2025.
fn fixed_today() -> NaiveDate {
    date(2025, 1, 10)
}

fn mutator(store: MockSessionStore) -> ScheduleMutator<MockSessionStore> {
    ScheduleMutator::with_today(store, fixed_today)
}

fn session(id: i64, class_id: i64, teacher_id: i64, period_slot: u8, date: NaiveDate) -> Session {
    Session {
        id,
        class_id,
        subject_id: 100,
        teacher_id,
        period_slot,
        date,
    }
}

fn placement(date: NaiveDate) -> NewSession {
    NewSession {
        class_id: 1,
        subject_id: 7,
        teacher_id: 10,
        period_slot: 2,
        date,
    }
}

#[tokio::test]
async fn create_rejects_past_dates() {
    // No expectations: the store must never see a rejected write.
    let mutator = mutator(MockSessionStore::new());

    let result = mutator.create(&[], placement(date(2025, 1, 9))).await;

    assert!(matches!(result, Err(ScheduleError::PastDateImmutable(_))));
}

#[tokio::test]
async fn create_accepts_today() {
    let mut store = MockSessionStore::new();
    store.expect_create_session().times(1).returning(|body| {
        Ok(SessionRecord {
            id: 99,
            class_id: body.class_id,
            subject_id: body.subject_id,
            teacher_id: body.teacher_id,
            period_slot: body.period_slot,
            date: body.date,
        })
    });
    let mutator = mutator(store);

    let created = mutator
        .create(&[], placement(fixed_today()))
        .await
        .expect("today is not a past date");
    assert_eq!(created.id, 99);
}

#[tokio::test]
async fn create_rejects_missing_subject_and_teacher() {
    let mutator = mutator(MockSessionStore::new());

    let no_subject = NewSession {
        subject_id: 0,
        ..placement(date(2025, 1, 13))
    };
    assert!(matches!(
        mutator.create(&[], no_subject).await,
        Err(ScheduleError::MissingField("subjectId"))
    ));

    let no_teacher = NewSession {
        teacher_id: 0,
        ..placement(date(2025, 1, 13))
    };
    assert!(matches!(
        mutator.create(&[], no_teacher).await,
        Err(ScheduleError::MissingField("teacherId"))
    ));
}

#[tokio::test]
async fn create_rejects_a_class_double_booking() {
    let mutator = mutator(MockSessionStore::new());
    let snapshot = vec![session(1, 1, 20, 2, date(2025, 1, 13))];

    let result = mutator.create(&snapshot, placement(date(2025, 1, 13))).await;

    assert!(matches!(result, Err(ScheduleError::ClassConflict)));
}

#[tokio::test]
async fn create_rejects_a_teacher_double_booking() {
    let mutator = mutator(MockSessionStore::new());
    let snapshot = vec![session(1, 5, 10, 2, date(2025, 1, 13))];

    let result = mutator.create(&snapshot, placement(date(2025, 1, 13))).await;

    assert!(matches!(result, Err(ScheduleError::TeacherConflict)));
}

#[tokio::test]
async fn create_persists_and_returns_the_refreshed_session() {
    let mut store = MockSessionStore::new();
    store
        .expect_create_session()
        .with(predicate::eq(SessionWrite::new(1, 7, 10, 2, date(2025, 1, 13))))
        .times(1)
        .returning(|body| {
            Ok(SessionRecord {
                id: 42,
                class_id: body.class_id,
                subject_id: body.subject_id,
                teacher_id: body.teacher_id,
                period_slot: body.period_slot,
                // The service echoes a timestamp; the mutator normalizes it.
                date: format!("{}T00:00:00Z", body.date),
            })
        });
    let mutator = mutator(store);

    let created = mutator
        .create(&[], placement(date(2025, 1, 13)))
        .await
        .expect("clean placement");

    assert_eq!(created.id, 42);
    assert_eq!(created.date, date(2025, 1, 13));
    assert_eq!(created.period_slot, 2);
}

#[tokio::test]
async fn update_rejects_an_unknown_session() {
    let mutator = mutator(MockSessionStore::new());

    let result = mutator.update(&[], 404, 7, 10).await;

    assert!(matches!(result, Err(ScheduleError::NotFound(_))));
}

#[tokio::test]
async fn update_rejects_a_past_session() {
    let mutator = mutator(MockSessionStore::new());
    let snapshot = vec![session(1, 1, 10, 2, date(2025, 1, 6))];

    let result = mutator.update(&snapshot, 1, 7, 10).await;

    assert!(matches!(result, Err(ScheduleError::PastDateImmutable(_))));
}

#[tokio::test]
async fn update_does_not_conflict_with_itself() {
    let mut store = MockSessionStore::new();
    store
        .expect_update_session()
        .with(
            predicate::eq(1),
            predicate::eq(SessionWrite::new(1, 8, 10, 2, date(2025, 1, 13))),
        )
        .times(1)
        .returning(|id, body| {
            Ok(SessionRecord {
                id,
                class_id: body.class_id,
                subject_id: body.subject_id,
                teacher_id: body.teacher_id,
                period_slot: body.period_slot,
                date: body.date,
            })
        });
    let mutator = mutator(store);
    // Keeping the same teacher in the same cell: only the subject changes.
    let snapshot = vec![session(1, 1, 10, 2, date(2025, 1, 13))];

    let updated = mutator.update(&snapshot, 1, 8, 10).await.expect("in-place edit");

    assert_eq!(updated.subject_id, 8);
}

#[tokio::test]
async fn update_rejects_a_newly_busy_teacher() {
    let mutator = mutator(MockSessionStore::new());
    let snapshot = vec![
        session(1, 1, 10, 2, date(2025, 1, 13)),
        session(2, 2, 30, 2, date(2025, 1, 13)),
    ];

    // Reassigning session 1 to teacher 30, who already teaches class 2 in
    // the same slot.
    let result = mutator.update(&snapshot, 1, 7, 30).await;

    assert!(matches!(result, Err(ScheduleError::TeacherConflict)));
}

#[tokio::test]
async fn delete_rejects_past_sessions() {
    let mutator = mutator(MockSessionStore::new());
    let snapshot = vec![session(1, 1, 10, 2, date(2024, 12, 16))];

    let result = mutator.delete(&snapshot, 1).await;

    assert!(matches!(result, Err(ScheduleError::PastDateImmutable(_))));
}

#[tokio::test]
async fn delete_removes_a_future_session() {
    let mut store = MockSessionStore::new();
    store
        .expect_delete_session()
        .with(predicate::eq(1))
        .times(1)
        .returning(|_| Ok(()));
    let mutator = mutator(store);
    let snapshot = vec![session(1, 1, 10, 2, date(2025, 1, 13))];

    mutator.delete(&snapshot, 1).await.expect("future session");
}

#[tokio::test]
async fn delete_rejects_an_unknown_session() {
    let mutator = mutator(MockSessionStore::new());

    let result = mutator.delete(&[], 404).await;

    assert!(matches!(result, Err(ScheduleError::NotFound(_))));
}

#[tokio::test]
async fn persistence_failures_are_surfaced_verbatim() {
    let mut store = MockSessionStore::new();
    store
        .expect_create_session()
        .returning(|_| Err(eyre::eyre!("service unavailable")));
    let mutator = mutator(store);

    let result = mutator.create(&[], placement(date(2025, 1, 13))).await;

    match result {
        Err(ScheduleError::Persistence(report)) => {
            assert!(report.to_string().contains("service unavailable"));
        }
        other => panic!("expected a persistence failure, got {:?}", other.map(|s| s.id)),
    }
}
