mod card;
mod markup;

pub use card::*;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::model::Activity;

pub(crate) const LOADING_TEXT: &str = "Loading activities...";
pub(crate) const LOAD_FAILED_TEXT: &str = "Unable to load activities.";
pub(crate) const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// Index of a card in the view's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(usize);

/// What the activity list area is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Ready,
    Failed(String),
}

impl ListStatus {
    /// Inline text shown instead of the cards, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ListStatus::Loading => Some(LOADING_TEXT),
            ListStatus::Ready => None,
            ListStatus::Failed(message) => Some(message),
        }
    }
}

/// One entry of the activity selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        }
    }
}

/// Render model of the activity list and the selection control.
///
/// Cards live in an arena in display order and are found through a
/// name index, never by scanning.
#[derive(Debug)]
pub struct RosterView {
    cards: Vec<ActivityCard>,
    index: HashMap<String, CardId>,
    options: Vec<SelectOption>,
    status: ListStatus,
    next_row: u64,
}

impl Default for RosterView {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            index: HashMap::new(),
            options: vec![SelectOption::placeholder()],
            status: ListStatus::Ready,
            next_row: 0,
        }
    }
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list area with the loading notice.
    pub fn begin_loading(&mut self) {
        self.clear_cards();
        self.status = ListStatus::Loading;
    }

    /// Empty the list area and reset the selection control to its placeholder.
    pub fn reset(&mut self) {
        self.clear_cards();
        self.options = vec![SelectOption::placeholder()];
        self.status = ListStatus::Ready;
    }

    /// Replace the list area with a single inline error notice.
    pub fn show_load_error(&mut self) {
        self.clear_cards();
        self.status = ListStatus::Failed(LOAD_FAILED_TEXT.to_string());
    }

    pub fn add_option(&mut self, name: &str) {
        self.options.push(SelectOption {
            value: name.to_string(),
            label: name.to_string(),
        });
    }

    /// Materialize the card for `name`. Building an existing card again
    /// replaces it in place.
    pub fn build_card(&mut self, name: &str, activity: &Activity) -> CardId {
        let rows = activity
            .participants
            .iter()
            .map(|email| self.new_row(name, email))
            .collect();
        let card = ActivityCard::new(name, activity, rows);

        let id = match self.index.get(name) {
            Some(&id) => {
                self.cards[id.0] = card;
                id
            }
            None => {
                let id = CardId(self.cards.len());
                self.cards.push(card);
                self.index.insert(name.to_string(), id);
                id
            }
        };
        debug!(activity = name, "built activity card");
        id
    }

    /// Append a participant row to the card for `activity`. Sibling rows
    /// and their controls are left untouched. Returns `None` when no card
    /// has that name.
    pub fn add_participant_row(&mut self, activity: &str, email: &str) -> Option<RowId> {
        let id = *self.index.get(activity)?;
        let row = self.new_row(activity, email);
        let row_id = row.id();
        self.cards[id.0].push_row(row);
        debug!(activity, email, "added participant row");
        Some(row_id)
    }

    /// Remove `row` if it is still in the card for `activity`.
    pub fn remove_participant_row(&mut self, activity: &str, row: RowId) -> bool {
        let Some(&id) = self.index.get(activity) else {
            return false;
        };
        let removed = self.cards[id.0].remove_row(row);
        debug!(activity, ?row, removed, "removed participant row");
        removed
    }

    pub fn card(&self, name: &str) -> Option<&ActivityCard> {
        self.index.get(name).map(|id| &self.cards[id.0])
    }

    pub fn card_by_id(&self, id: CardId) -> Option<&ActivityCard> {
        self.cards.get(id.0)
    }

    /// Cards in display order.
    pub fn cards(&self) -> &[ActivityCard] {
        &self.cards
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    fn new_row(&mut self, activity: &str, email: &str) -> ParticipantRow {
        let id = RowId(self.next_row);
        self.next_row += 1;
        ParticipantRow::new(id, activity, email)
    }

    fn clear_cards(&mut self) {
        self.cards.clear();
        self.index.clear();
    }
}

/// [`RosterView`] shared between the store and the controllers.
#[derive(Debug, Clone, Default)]
pub struct SharedRoster(Arc<Mutex<RosterView>>);

impl SharedRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut RosterView) -> R) -> R {
        let mut view = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut view)
    }

    pub fn read<R>(&self, f: impl FnOnce(&RosterView) -> R) -> R {
        let view = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess(participants: &[&str]) -> Activity {
        Activity {
            description: "d".to_string(),
            schedule: "s".to_string(),
            max_participants: 2,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn assert_counts_consistent(view: &RosterView) {
        for card in view.cards() {
            let count = card.rows().len();
            assert_eq!(card.participants_title(), format!("Participants ({count})"));
            let remaining = card.max_participants().saturating_sub(count as u32);
            assert_eq!(
                card.spots_remaining(),
                format!("Spots remaining: {remaining}/{}", card.max_participants())
            );
        }
    }

    #[test]
    fn test_build_card_renders_counts() {
        let mut view = RosterView::new();
        view.build_card("Chess Club", &chess(&["a@x.com"]));

        let card = view.card("Chess Club").unwrap();
        assert_eq!(card.spots_remaining(), "Spots remaining: 1/2");
        assert_eq!(card.participants_title(), "Participants (1)");
        assert_eq!(card.schedule_line(), "Schedule: s");
        assert_eq!(card.emails().collect::<Vec<_>>(), ["a@x.com"]);
    }

    #[test]
    fn test_build_card_twice_does_not_accumulate() {
        let mut view = RosterView::new();
        let first = view.build_card("Chess Club", &chess(&["a@x.com"]));
        let second = view.build_card("Chess Club", &chess(&["a@x.com"]));

        assert_eq!(first, second);
        assert_eq!(view.cards().len(), 1);
        let card = view.card_by_id(second).unwrap();
        assert_eq!(card.spots_remaining(), "Spots remaining: 1/2");
        assert_eq!(card.participants_title(), "Participants (1)");
    }

    #[test]
    fn test_add_and_remove_rows_keep_counts_in_sync() {
        let mut view = RosterView::new();
        view.build_card("Chess Club", &chess(&["a@x.com"]));
        let original = view.card("Chess Club").unwrap().rows()[0].id();

        let added = view.add_participant_row("Chess Club", "b@x.com").unwrap();
        assert_counts_consistent(&view);
        assert_eq!(
            view.card("Chess Club").unwrap().spots_remaining(),
            "Spots remaining: 0/2"
        );

        // Over capacity still clamps at zero.
        view.add_participant_row("Chess Club", "c@x.com").unwrap();
        assert_eq!(
            view.card("Chess Club").unwrap().spots_remaining(),
            "Spots remaining: 0/2"
        );

        assert!(view.remove_participant_row("Chess Club", original));
        assert!(view.remove_participant_row("Chess Club", added));
        assert_counts_consistent(&view);
        let card = view.card("Chess Club").unwrap();
        assert_eq!(card.emails().collect::<Vec<_>>(), ["c@x.com"]);
        assert_eq!(card.spots_remaining(), "Spots remaining: 1/2");
    }

    #[test]
    fn test_sibling_controls_survive_insertion() {
        let mut view = RosterView::new();
        view.build_card("Chess Club", &chess(&["a@x.com"]));
        let before = view.card("Chess Club").unwrap().rows()[0].remove_control().clone();

        view.add_participant_row("Chess Club", "b@x.com");

        let after = view.card("Chess Club").unwrap().rows()[0].remove_control();
        assert_eq!(&before, after);
    }

    #[test]
    fn test_stale_row_is_ignored() {
        let mut view = RosterView::new();
        view.build_card("Chess Club", &chess(&["a@x.com"]));
        let stale = view.card("Chess Club").unwrap().rows()[0].id();

        // Rebuilding hands out fresh rows.
        view.build_card("Chess Club", &chess(&["a@x.com"]));
        assert!(!view.remove_participant_row("Chess Club", stale));
        assert_eq!(view.card("Chess Club").unwrap().rows().len(), 1);
        assert_counts_consistent(&view);
    }

    #[test]
    fn test_row_of_other_activity_is_not_removed() {
        let mut view = RosterView::new();
        view.build_card("Chess Club", &chess(&["a@x.com"]));
        view.build_card("Art Club", &chess(&["z@x.com"]));
        let art_row = view.card("Art Club").unwrap().rows()[0].id();

        assert!(!view.remove_participant_row("Chess Club", art_row));
        assert!(!view.remove_participant_row("Drama", art_row));
        assert_eq!(view.card("Art Club").unwrap().rows().len(), 1);
    }

    #[test]
    fn test_unknown_activity_add_is_noop() {
        let mut view = RosterView::new();
        assert!(view.add_participant_row("Nope", "a@x.com").is_none());
        assert!(view.cards().is_empty());
    }

    #[test]
    fn test_list_status_transitions() {
        let mut view = RosterView::new();
        view.build_card("Chess Club", &chess(&[]));
        view.begin_loading();
        assert_eq!(view.status().message(), Some(LOADING_TEXT));
        assert!(view.cards().is_empty());

        view.show_load_error();
        assert_eq!(view.status().message(), Some("Unable to load activities."));
        assert!(view.card("Chess Club").is_none());

        view.reset();
        assert_eq!(view.status(), &ListStatus::Ready);
        assert_eq!(view.options().len(), 1);
        assert_eq!(view.options()[0].label, "-- Select an activity --");
    }
}
