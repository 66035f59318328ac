//! Scheduling policy: the tunable constraint set.
//!
//! A [`SchedulingConstraints`] value is supplied once per scheduling
//! run: compiled-in defaults merged with caller overrides, shallowly,
//! per key. Subjects the policy does not mention get default
//! treatment: no slot preference and a weekly frequency of 1.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-teacher workload limits.
///
/// Carried as policy surface; enforced by validation and analysis,
/// not by the placement scan itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherWorkload {
    /// Most sessions one teacher should take in a day.
    pub max_sessions_per_day: u32,
    /// Most sessions one teacher should take in a week.
    pub max_sessions_per_week: u32,
    /// Slot ids kept free of back-to-back load where possible.
    pub preferred_breaks: BTreeSet<u8>,
}

impl Default for TeacherWorkload {
    fn default() -> Self {
        Self {
            max_sessions_per_day: 6,
            max_sessions_per_week: 30,
            preferred_breaks: BTreeSet::from([5, 6]),
        }
    }
}

/// The scheduling policy for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConstraints {
    /// Most sessions a class should hold in one day.
    pub max_sessions_per_day: u32,
    /// Longest acceptable run of back-to-back sessions.
    pub max_consecutive_sessions: u32,
    /// Subject name → slot ids that suit the subject.
    pub preferred_time_slots: BTreeMap<String, BTreeSet<u8>>,
    /// Subject name → target sessions per week.
    pub subject_frequency: BTreeMap<String, u32>,
    /// Per-teacher workload limits.
    pub teacher_workload: TeacherWorkload,
}

impl Default for SchedulingConstraints {
    fn default() -> Self {
        let preferred_time_slots = BTreeMap::from([
            ("Mathematics".to_string(), BTreeSet::from([1, 2, 3, 4])),
            ("Physical Education".to_string(), BTreeSet::from([9, 10])),
            ("Music".to_string(), BTreeSet::from([8, 9, 10])),
        ]);
        let subject_frequency = BTreeMap::from([
            ("Mathematics".to_string(), 5),
            ("Physical Education".to_string(), 2),
            ("Music".to_string(), 2),
        ]);
        Self {
            max_sessions_per_day: 6,
            max_consecutive_sessions: 3,
            preferred_time_slots,
            subject_frequency,
            teacher_workload: TeacherWorkload::default(),
        }
    }
}

impl SchedulingConstraints {
    /// Weekly frequency target for a subject; 1 when unlisted.
    pub fn frequency_for(&self, subject: &str) -> u32 {
        self.subject_frequency.get(subject).copied().unwrap_or(1)
    }

    /// Preferred slot ids for a subject.
    ///
    /// Returns `None` when the subject is unlisted or its set is
    /// empty; either way no preference applies.
    pub fn preferred_slots(&self, subject: &str) -> Option<&BTreeSet<u8>> {
        self.preferred_time_slots
            .get(subject)
            .filter(|slots| !slots.is_empty())
    }

    /// Sets a subject's preferred slots.
    pub fn with_preferred_slots(
        mut self,
        subject: impl Into<String>,
        slots: impl IntoIterator<Item = u8>,
    ) -> Self {
        self.preferred_time_slots
            .insert(subject.into(), slots.into_iter().collect());
        self
    }

    /// Sets a subject's weekly frequency target.
    pub fn with_frequency(mut self, subject: impl Into<String>, per_week: u32) -> Self {
        self.subject_frequency.insert(subject.into(), per_week);
        self
    }

    /// Sets the back-to-back session cap.
    pub fn with_max_consecutive(mut self, max: u32) -> Self {
        self.max_consecutive_sessions = max;
        self
    }

    /// Applies caller overrides, shallowly, per key.
    ///
    /// An override replaces the whole value for its key; mappings are
    /// swapped out, not merged entry-wise.
    pub fn apply(mut self, overrides: &ConstraintOverrides) -> Self {
        if let Some(v) = overrides.max_sessions_per_day {
            self.max_sessions_per_day = v;
        }
        if let Some(v) = overrides.max_consecutive_sessions {
            self.max_consecutive_sessions = v;
        }
        if let Some(ref v) = overrides.preferred_time_slots {
            self.preferred_time_slots = v.clone();
        }
        if let Some(ref v) = overrides.subject_frequency {
            self.subject_frequency = v.clone();
        }
        if let Some(ref v) = overrides.teacher_workload {
            self.teacher_workload = v.clone();
        }
        self
    }
}

/// Caller-supplied constraint overrides for one run.
///
/// `None` fields keep the default; `Some` fields replace it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintOverrides {
    pub max_sessions_per_day: Option<u32>,
    pub max_consecutive_sessions: Option<u32>,
    pub preferred_time_slots: Option<BTreeMap<String, BTreeSet<u8>>>,
    pub subject_frequency: Option<BTreeMap<String, u32>>,
    pub teacher_workload: Option<TeacherWorkload>,
}
