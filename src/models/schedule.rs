//! Class schedules and the week-wide occupancy view.
//!
//! A [`ClassSchedule`] maps each teaching day to that class's sessions
//! in slot order. A [`WeekOccupancy`] is the union of every class's
//! committed sessions for one week — the accumulator each scheduling
//! run seeds from the store, mutates locally as it places sessions,
//! and discards at the end. It exists only so later placements (for
//! this class and for classes scheduled later in the same run) can see
//! earlier ones.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::grid::Day;
use super::session::PlacedSession;

/// One class's week: day → sessions, ordered by slot id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassSchedule {
    days: BTreeMap<Day, Vec<PlacedSession>>,
}

impl ClassSchedule {
    /// Creates an empty week: every day present, no sessions.
    pub fn new() -> Self {
        let mut days = BTreeMap::new();
        for day in Day::ALL {
            days.insert(day, Vec::new());
        }
        Self { days }
    }

    /// Sessions on a day, in stored order.
    pub fn sessions(&self, day: Day) -> &[PlacedSession] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends a session to a day.
    pub fn add(&mut self, day: Day, session: PlacedSession) {
        self.days.entry(day).or_default().push(session);
    }

    /// The session holding a (day, slot) cell, if any.
    pub fn session_at(&self, day: Day, slot_id: u8) -> Option<&PlacedSession> {
        self.sessions(day).iter().find(|s| s.time_slot_id == slot_id)
    }

    /// Whether a (day, slot) cell is taken. Placeholder rows hold
    /// their cell too.
    pub fn is_occupied(&self, day: Day, slot_id: u8) -> bool {
        self.session_at(day, slot_id).is_some()
    }

    /// Number of real lessons on a day.
    pub fn lessons_on(&self, day: Day) -> usize {
        self.sessions(day).iter().filter(|s| s.is_lesson()).count()
    }

    /// Number of real lessons across the week.
    pub fn total_lessons(&self) -> usize {
        Day::ALL.iter().map(|&d| self.lessons_on(d)).sum()
    }

    /// How often a subject appears across the week.
    pub fn subject_count(&self, subject: &str) -> usize {
        Day::ALL
            .iter()
            .flat_map(|&d| self.sessions(d))
            .filter(|s| s.is_lesson() && s.subject == subject)
            .count()
    }

    /// Sorts every day's sessions by slot id.
    pub fn sort_by_slot(&mut self) {
        for sessions in self.days.values_mut() {
            sessions.sort_by_key(|s| s.time_slot_id);
        }
    }

    /// Iterates days in week order with their sessions.
    pub fn iter_days(&self) -> impl Iterator<Item = (Day, &[PlacedSession])> {
        Day::ALL.into_iter().map(move |d| (d, self.sessions(d)))
    }
}

/// All committed sessions for one week, across every class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekOccupancy {
    classes: HashMap<String, ClassSchedule>,
}

impl WeekOccupancy {
    /// Creates an empty occupancy view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seeds one class's schedule.
    pub fn with_class(mut self, class_id: impl Into<String>, schedule: ClassSchedule) -> Self {
        self.classes.insert(class_id.into(), schedule);
        self
    }

    /// A class's schedule, if present.
    pub fn class(&self, class_id: &str) -> Option<&ClassSchedule> {
        self.classes.get(class_id)
    }

    /// Iterates all (class id, schedule) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassSchedule)> {
        self.classes.iter().map(|(id, s)| (id.as_str(), s))
    }

    /// Replaces a class's entry with an empty week. Done before
    /// regenerating a class whose persisted schedule will be
    /// overwritten, so classes scheduled later in the run conflict
    /// against the new sessions rather than the superseded ones.
    pub fn reset_class(&mut self, class_id: &str) {
        self.classes
            .insert(class_id.to_string(), ClassSchedule::new());
    }

    /// Records a freshly placed session for a class.
    pub fn record(&mut self, class_id: &str, day: Day, session: PlacedSession) {
        self.classes
            .entry(class_id.to_string())
            .or_insert_with(ClassSchedule::new)
            .add(day, session);
    }

    /// Number of classes with an entry.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
