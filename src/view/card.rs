use crate::model::{remaining_spots, Activity};

/// Identity of a rendered participant row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u64);

/// Context bound to a removal control when its row is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveControl {
    activity: String,
    email: String,
    row: RowId,
}

impl RemoveControl {
    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn row(&self) -> RowId {
        self.row
    }

    /// Tooltip and accessible label.
    pub fn label(&self) -> String {
        format!("Unregister {}", self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    id: RowId,
    email: String,
    remove: RemoveControl,
}

impl ParticipantRow {
    pub(crate) fn new(id: RowId, activity: &str, email: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
            remove: RemoveControl {
                activity: activity.to_string(),
                email: email.to_string(),
                row: id,
            },
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn remove_control(&self) -> &RemoveControl {
        &self.remove
    }
}

/// One activity's rendered card.
///
/// The count header and spots line are named fields rewritten from the
/// row count after every change to `rows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    name: String,
    description: String,
    schedule: String,
    max_participants: u32,
    participants_title: String,
    spots_remaining: String,
    rows: Vec<ParticipantRow>,
}

impl ActivityCard {
    pub(crate) fn new(name: &str, activity: &Activity, rows: Vec<ParticipantRow>) -> Self {
        let mut card = Self {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            max_participants: activity.max_participants,
            participants_title: String::new(),
            spots_remaining: String::new(),
            rows,
        };
        card.sync_counts();
        card
    }

    pub(crate) fn push_row(&mut self, row: ParticipantRow) {
        self.rows.push(row);
        self.sync_counts();
    }

    pub(crate) fn remove_row(&mut self, row: RowId) -> bool {
        let Some(position) = self.rows.iter().position(|r| r.id == row) else {
            return false;
        };
        self.rows.remove(position);
        self.sync_counts();
        true
    }

    fn sync_counts(&mut self) {
        let count = self.rows.len();
        self.participants_title = format!("Participants ({count})");
        self.spots_remaining = format!(
            "Spots remaining: {}/{}",
            remaining_spots(self.max_participants, count),
            self.max_participants
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schedule_line(&self) -> String {
        format!("Schedule: {}", self.schedule)
    }

    pub fn max_participants(&self) -> u32 {
        self.max_participants
    }

    pub fn participants_title(&self) -> &str {
        &self.participants_title
    }

    pub fn spots_remaining(&self) -> &str {
        &self.spots_remaining
    }

    pub fn rows(&self) -> &[ParticipantRow] {
        &self.rows
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(ParticipantRow::email)
    }

    /// Removal control of the first row for `email`.
    pub fn remove_control(&self, email: &str) -> Option<&RemoveControl> {
        self.rows
            .iter()
            .find(|r| r.email == email)
            .map(ParticipantRow::remove_control)
    }
}
