//! Schedule statistics, analysis, and optimization suggestions.
//!
//! Post-hoc reporting over a generated or persisted week:
//!
//! - [`ScheduleStats`] compares what was placed against what was
//!   required. Under-scheduling is data here, never an error.
//! - [`analyze`] inspects a persisted week for structural problems
//!   (over-long back-to-back runs, overloaded days).
//! - [`suggest`] maps recognized problems to actionable suggestions;
//!   unrecognized kinds pass through without one.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ClassSchedule, Day, SchedulingConstraints, SessionRequirement, SLOTS_PER_DAY};

/// Longest run of back-to-back lessons tolerated before analysis
/// flags the day.
const COMFORTABLE_RUN: usize = 4;

/// Scheduled-versus-required tally for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubjectTally {
    /// Sessions placed this week.
    pub scheduled: usize,
    /// Sessions required this week.
    pub total: usize,
}

/// A subject that fell short of its requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnscheduledSubject {
    pub subject: String,
    /// Required sessions that found no cell.
    pub missing: usize,
}

/// How a generation run went for one class.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleStats {
    /// Sessions required.
    pub total_sessions: usize,
    /// Sessions placed.
    pub scheduled_sessions: usize,
    /// Lessons per day.
    pub daily_load: BTreeMap<Day, usize>,
    /// Per-subject scheduled/required tallies.
    pub subject_distribution: BTreeMap<String, SubjectTally>,
    /// Subjects with unplaced requirements.
    pub unscheduled_subjects: Vec<UnscheduledSubject>,
}

impl ScheduleStats {
    /// Computes statistics for a freshly generated week.
    pub fn calculate(schedule: &ClassSchedule, requirements: &[SessionRequirement]) -> Self {
        let mut required_per_subject: BTreeMap<String, usize> = BTreeMap::new();
        for req in requirements {
            *required_per_subject.entry(req.subject.clone()).or_insert(0) += 1;
        }

        let mut daily_load = BTreeMap::new();
        for day in Day::ALL {
            daily_load.insert(day, schedule.lessons_on(day));
        }

        let mut subject_distribution = BTreeMap::new();
        let mut unscheduled_subjects = Vec::new();
        for (subject, &total) in &required_per_subject {
            let scheduled = schedule.subject_count(subject);
            subject_distribution.insert(subject.clone(), SubjectTally { scheduled, total });
            if scheduled < total {
                unscheduled_subjects.push(UnscheduledSubject {
                    subject: subject.clone(),
                    missing: total - scheduled,
                });
            }
        }

        Self {
            total_sessions: requirements.len(),
            scheduled_sessions: schedule.total_lessons(),
            daily_load,
            subject_distribution,
            unscheduled_subjects,
        }
    }
}

/// Per-day usage found by [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayUsage {
    pub day: Day,
    /// Lessons held that day.
    pub utilization: usize,
    /// Longest run of contiguous occupied slots.
    pub max_consecutive: usize,
}

/// A structural problem in a persisted week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleConflict {
    /// A day holds more than [`COMFORTABLE_RUN`] back-to-back lessons.
    TooManyConsecutive { day: Day, count: usize },
    /// A day holds more lessons than the policy's per-day cap.
    DayOverloaded { day: Day, count: usize },
}

/// Result of analyzing one class's persisted week.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleAnalysis {
    pub days: Vec<DayUsage>,
    pub conflicts: Vec<ScheduleConflict>,
}

/// Inspects a persisted week for structural problems.
pub fn analyze(schedule: &ClassSchedule, constraints: &SchedulingConstraints) -> ScheduleAnalysis {
    let mut days = Vec::with_capacity(Day::ALL.len());
    let mut conflicts = Vec::new();

    for day in Day::ALL {
        let utilization = schedule.lessons_on(day);
        let max_consecutive = longest_run(schedule, day);
        days.push(DayUsage {
            day,
            utilization,
            max_consecutive,
        });

        if max_consecutive > COMFORTABLE_RUN {
            conflicts.push(ScheduleConflict::TooManyConsecutive {
                day,
                count: max_consecutive,
            });
        }
        if utilization > constraints.max_sessions_per_day as usize {
            conflicts.push(ScheduleConflict::DayOverloaded {
                day,
                count: utilization,
            });
        }
    }

    ScheduleAnalysis { days, conflicts }
}

/// Longest run of contiguous slot ids holding real lessons on `day`.
fn longest_run(schedule: &ClassSchedule, day: Day) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for slot_id in 1..=SLOTS_PER_DAY {
        let lesson = schedule
            .session_at(day, slot_id)
            .map(|s| s.is_lesson())
            .unwrap_or(false);
        if lesson {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Suggestion urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    Low,
    Medium,
    High,
}

/// What a suggestion asks the planner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    RedistributeSessions,
}

/// An actionable fix for a detected problem.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationSuggestion {
    pub kind: SuggestionKind,
    pub priority: SuggestionPriority,
    pub description: String,
    pub day: Day,
}

/// Maps detected conflicts to suggestions. Only over-long runs have a
/// rewrite rule today; other conflict kinds pass through with none.
pub fn suggest(analysis: &ScheduleAnalysis) -> Vec<OptimizationSuggestion> {
    analysis
        .conflicts
        .iter()
        .filter_map(|conflict| match conflict {
            ScheduleConflict::TooManyConsecutive { day, count } => Some(OptimizationSuggestion {
                kind: SuggestionKind::RedistributeSessions,
                priority: SuggestionPriority::High,
                description: format!(
                    "{count} back-to-back lessons on {day}; move some to lighter days"
                ),
                day: *day,
            }),
            ScheduleConflict::DayOverloaded { .. } => None,
        })
        .collect()
}
