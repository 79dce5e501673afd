//! Selection of the cards shown in a study session.
//!
//! Cards are gathered in three passes until the batch is full:
//! 1. due cards (never scheduled, or scheduled at or before `now`) in collection order
//! 2. cards that were never reviewed
//! 3. everything else, least recently touched first
//!
//! A card picked by an earlier pass is never reconsidered.

use super::{Card, CardId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

pub const DEFAULT_STUDY_BATCH: usize = 10;

/// A card is due when it was never scheduled or its review date has passed.
pub fn is_due(card: &Card, now: DateTime<Utc>) -> bool {
    card.next_review_date.is_none_or(|next| next <= now)
}

/// Selects at most `count` cards for a study session, due cards first.
pub fn select_for_study(cards: &[Card], count: usize, now: DateTime<Utc>) -> Vec<&Card> {
    if count == 0 || cards.is_empty() {
        return Vec::new();
    }

    let mut selected: Vec<&Card> = Vec::with_capacity(count.min(cards.len()));
    // Membership by id, so a card is never picked twice even if ids repeat.
    let mut seen: HashSet<&CardId> = HashSet::new();

    // Due cards, in collection order
    for card in cards.iter().filter(|card| is_due(card, now)) {
        if selected.len() == count {
            break;
        }
        if seen.insert(&card.id) {
            selected.push(card);
        }
    }
    let due = selected.len();

    // Not enough due cards: fill up with cards never reviewed
    if selected.len() < count {
        for card in cards.iter().filter(|card| card.last_reviewed.is_none()) {
            if selected.len() == count {
                break;
            }
            if seen.insert(&card.id) {
                selected.push(card);
            }
        }
    }
    let never_reviewed = selected.len() - due;

    // Still short: oldest activity first
    if selected.len() < count {
        let mut remaining: Vec<&Card> = cards
            .iter()
            .filter(|card| !seen.contains(&card.id))
            .collect();
        // Stable sort: ties keep collection order.
        remaining.sort_by_key(|card| card.last_reviewed.unwrap_or(card.date_created));

        for card in remaining {
            if selected.len() == count {
                break;
            }
            if seen.insert(&card.id) {
                selected.push(card);
            }
        }
    }

    log::debug!(
        "Selected {} of {} cards for study ({} due, {} never reviewed, {} least recently touched)",
        selected.len(),
        cards.len(),
        due,
        never_reviewed,
        selected.len() - due - never_reviewed
    );

    selected.truncate(count);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    fn card(front: &str) -> Card {
        Card {
            id: CardId::generate(),
            front: front.to_string(),
            back: format!("{} back", front),
            category: None,
            difficulty: None,
            date_created: now() - Duration::days(30),
            last_reviewed: None,
            next_review_date: None,
        }
    }

    /// Card last reviewed `days_ago`, next due `due_in_days` from now.
    fn reviewed(front: &str, days_ago: i64, due_in_days: i64) -> Card {
        Card {
            last_reviewed: Some(now() - Duration::days(days_ago)),
            next_review_date: Some(now() + Duration::days(due_in_days)),
            ..card(front)
        }
    }

    fn fronts(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.front.clone()).collect()
    }

    #[test]
    fn test_is_due() {
        assert!(is_due(&card("new"), now()));
        assert!(is_due(&reviewed("overdue", 3, -1), now()));
        assert!(is_due(&reviewed("exactly now", 3, 0), now()));
        assert!(!is_due(&reviewed("later", 1, 1), now()));
    }

    #[test]
    fn test_empty_collection() {
        assert!(select_for_study(&[], 10, now()).is_empty());
    }

    #[test]
    fn test_zero_count() {
        let cards = vec![card("a"), card("b")];
        assert!(select_for_study(&cards, 0, now()).is_empty());
    }

    #[test]
    fn test_due_cards_keep_collection_order() {
        let cards = vec![reviewed("A", 2, -1), reviewed("B", 1, 1), card("C")];

        let selected = select_for_study(&cards, 2, now());
        assert_eq!(fronts(&selected), vec!["A", "C"]);
    }

    #[test]
    fn test_all_due_returns_first_count() {
        let cards: Vec<Card> = (0..5)
            .map(|i| reviewed(&format!("card {}", i), 5, -i))
            .collect();

        let selected = select_for_study(&cards, 3, now());
        assert_eq!(fronts(&selected), vec!["card 0", "card 1", "card 2"]);
    }

    #[test]
    fn test_small_collection_returns_every_card_once() {
        let cards = vec![
            reviewed("later", 1, 6),
            card("new"),
            reviewed("overdue", 4, -1),
            reviewed("soon", 2, 1),
        ];

        let selected = select_for_study(&cards, 10, now());
        assert_eq!(selected.len(), cards.len());

        let ids: HashSet<&CardId> = selected.iter().map(|c| &c.id).collect();
        assert_eq!(ids.len(), cards.len());
    }

    #[test]
    fn test_fallback_orders_by_least_recent_activity() {
        let cards = vec![
            reviewed("reviewed yesterday", 1, 2),
            reviewed("reviewed last week", 7, 1),
            card("new"),
            reviewed("reviewed three days ago", 3, 4),
        ];

        let selected = select_for_study(&cards, 3, now());
        assert_eq!(
            fronts(&selected),
            vec!["new", "reviewed last week", "reviewed three days ago"]
        );
    }

    #[test]
    fn test_never_reviewed_fallback_precedes_activity_order() {
        // Scheduled but never reviewed only happens with inconsistent stored data.
        let scheduled_only = Card {
            next_review_date: Some(now() + Duration::days(2)),
            ..card("scheduled only")
        };
        let cards = vec![reviewed("old review", 20, 3), scheduled_only];

        let selected = select_for_study(&cards, 2, now());
        assert_eq!(fronts(&selected), vec!["scheduled only", "old review"]);
    }

    #[test]
    fn test_activity_ties_keep_collection_order() {
        let cards = vec![
            reviewed("first", 4, 2),
            reviewed("second", 4, 1),
            reviewed("third", 4, 3),
        ];

        let selected = select_for_study(&cards, 3, now());
        assert_eq!(fronts(&selected), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicate_ids_selected_once() {
        let original = card("original");
        let duplicate = Card {
            front: "duplicate".to_string(),
            ..original.clone()
        };
        let cards = vec![original, duplicate, card("other")];

        let selected = select_for_study(&cards, 5, now());
        assert_eq!(fronts(&selected), vec!["original", "other"]);
    }

    #[test]
    fn test_never_exceeds_count() {
        let cards: Vec<Card> = (0..20).map(|i| card(&format!("card {}", i))).collect();
        for count in [1, 5, DEFAULT_STUDY_BATCH, 20, 25] {
            assert_eq!(select_for_study(&cards, count, now()).len(), count.min(20));
        }
    }
}
