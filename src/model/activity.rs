use serde::Deserialize;

/// Metadata and roster of a single activity as served by `GET /activities`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Free places left, clamped at zero.
    pub fn remaining_spots(&self) -> u32 {
        remaining_spots(self.max_participants, self.participants.len())
    }
}

/// `max(0, capacity - count)`. Display-only; the server enforces capacity.
pub fn remaining_spots(max_participants: u32, participant_count: usize) -> u32 {
    let count = u32::try_from(participant_count).unwrap_or(u32::MAX);
    max_participants.saturating_sub(count)
}

/// Body of a successful signup or unregister.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}
