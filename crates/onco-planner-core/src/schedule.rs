//! Cycle-schedule projection from selected regimens.
//!
//! Projection is pure: it computes a dated preview without touching the
//! patient. Committing the preview is a separate step that assigns event
//! ids and appends to the timeline, so a discarded preview has no side
//! effects.

use chrono::{Duration, NaiveDate};

use crate::models::{EventKind, Patient, RegimenCategory, RegimenOption, TreatmentEvent};

/// A dated event computed by the projector, not yet committed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEvent {
    /// Administration day
    pub date: NaiveDate,
    /// Title with regimen name and 1-based cycle number
    pub title: String,
    /// Category label and cycle progress
    pub description: String,
    /// Always medication for projected cycles
    pub kind: EventKind,
    /// Owning regimen category, carries the calendar color tag
    pub category: RegimenCategory,
    /// 1-based cycle number
    pub cycle: u32,
    /// Total cycles of the owning regimen
    pub total_cycles: u32,
}

/// An uncommitted projection result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulePreview {
    events: Vec<PlannedEvent>,
}

impl SchedulePreview {
    /// The projected events, sorted ascending by date.
    pub fn events(&self) -> &[PlannedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append the previewed events to the patient timeline, each with a
    /// fresh unique id. Returns the number of events added.
    pub fn commit(self, patient: &mut Patient) -> usize {
        let added = self.events.len();
        for planned in self.events {
            patient.timeline.push(TreatmentEvent::new(
                planned.date,
                planned.title,
                planned.description,
                planned.kind,
            ));
        }
        added
    }
}

/// Project dated cycle events for the given regimens from a start date.
///
/// Cycles default to 1 and the inter-cycle interval to 0 days, so a
/// regimen without cycle metadata yields a single event on the start
/// date. Deterministic: identical inputs give identical previews, and the
/// sort is stable for equal dates.
pub fn project_schedule(regimens: &[&RegimenOption], start: NaiveDate) -> SchedulePreview {
    let mut events = Vec::new();

    for regimen in regimens {
        let cycles = regimen.total_cycles.unwrap_or(1).max(1);
        let interval = i64::from(regimen.frequency_days.unwrap_or(0));

        for cycle in 0..cycles {
            let date = start + Duration::days(i64::from(cycle) * interval);
            events.push(PlannedEvent {
                date,
                title: format!("{} (第{}次)", regimen.name, cycle + 1),
                description: format!("{} - 周期 {}/{}", regimen.category.label(), cycle + 1, cycles),
                kind: EventKind::Medication,
                category: regimen.category,
                cycle: cycle + 1,
                total_cycles: cycles,
            });
        }
    }

    events.sort_by_key(|e| e.date);
    SchedulePreview { events }
}
