use chrono::{DateTime, Duration, TimeZone, Utc};
use flashcards_app::database::{LocalRepository, SqliteRepository};
use flashcards_app::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
}

/// Rates and selects the same way regardless of where the cards are stored.
fn exercise_study_flow<R: CardRepository>(repo: R) {
    let mut service = FlashcardService::new(repo, ReviewScheduler::default());
    let yesterday = now() - Duration::days(1);

    let a = service.add_card(NewCard::new("A", "first"), yesterday).unwrap();
    let b = service.add_card(NewCard::new("B", "second"), yesterday).unwrap();
    let c = service.add_card(NewCard::new("C", "third"), yesterday).unwrap();

    // A was due yesterday, B is due tomorrow, C was never rated.
    service
        .rate_card(&a.id, Difficulty::Hard, yesterday - Duration::days(1))
        .unwrap();
    service.rate_card(&b.id, Difficulty::Hard, now()).unwrap();

    let batch = service.cards_for_study(2, now()).unwrap();
    let ids: Vec<_> = batch.iter().map(|card| card.id.clone()).collect();
    assert_eq!(ids, vec![a.id.clone(), c.id.clone()]);

    let stored_b = service.get_card(&b.id).unwrap();
    assert_eq!(stored_b.last_reviewed, Some(now()));
    assert_eq!(stored_b.next_review_date, Some(now() + Duration::days(1)));

    let mut session = service.start_session(10, now()).unwrap();
    assert_eq!(session.total_count(), 3);
    while !session.is_completed() {
        service
            .rate_in_session(&mut session, Difficulty::Easy, now())
            .unwrap();
    }

    let cards = service.cards().unwrap();
    assert!(cards.iter().all(|card| !models::is_due(card, now())));
    assert!(
        cards
            .iter()
            .all(|card| card.next_review_date == Some(now() + Duration::days(7)))
    );

    service.delete_card(&c.id).unwrap();
    assert_eq!(service.cards_for_study(10, now()).unwrap().len(), 2);
    assert!(service.cards_for_study(0, now()).unwrap().is_empty());
}

#[test]
fn sqlite_backend_study_flow() {
    exercise_study_flow(SqliteRepository::open_in_memory().unwrap());
}

#[test]
fn local_backend_study_flow() {
    let dir = tempfile::tempdir().unwrap();
    exercise_study_flow(LocalRepository::new(dir.path().join("flashcards.json")));
}

#[test]
fn boxed_backend_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::from_toml(&format!(
        "backend = \"sqlite\"\nsqlite_path = {:?}\n",
        dir.path().join("db.sqlite3").to_string_lossy()
    ))
    .unwrap();

    exercise_study_flow(config.open_repository().unwrap());
}

#[test]
fn empty_collection_yields_empty_batch() {
    let service = FlashcardService::new(
        SqliteRepository::open_in_memory().unwrap(),
        ReviewScheduler::default(),
    );
    assert!(service.cards_for_study(10, now()).unwrap().is_empty());
}
