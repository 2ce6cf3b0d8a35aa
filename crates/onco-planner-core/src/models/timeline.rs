//! Dated clinical events on a patient timeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event kind shown on the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Medication,
    Surgery,
    Exam,
    Other,
}

/// A single dated clinical occurrence in a patient's record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentEvent {
    /// Unique event identifier
    pub id: String,
    /// Calendar day, no time-of-day
    pub date: NaiveDate,
    /// Short title, e.g. "穿刺活检"
    pub title: String,
    /// Free-text details
    pub description: String,
    /// Whether the event has taken place
    pub completed: bool,
    /// Event kind
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Recorded side-effect labels, keys into the side-effect catalogue
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub side_effects: Vec<String>,
}

impl TreatmentEvent {
    /// Create a new, not-yet-completed event.
    pub fn new(date: NaiveDate, title: String, description: String, kind: EventKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            title,
            description,
            completed: false,
            kind,
            side_effects: Vec::new(),
        }
    }

    /// Replace the recorded side-effect labels.
    ///
    /// Duplicates collapse (first occurrence wins), so re-saving the same
    /// set leaves the list unchanged.
    pub fn record_side_effects(&mut self, labels: &[String]) {
        let mut recorded: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels {
            if !recorded.contains(label) {
                recorded.push(label.clone());
            }
        }
        self.side_effects = recorded;
    }

    /// Mark the event as done.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}
