//! Greedy slot placement.
//!
//! # Algorithm
//!
//! 1. Sort requirements by weekly frequency target, descending:
//!    subjects needing more sessions claim good cells first. The sort
//!    is stable, so equal targets keep derivation order.
//! 2. For each requirement, scan all 6 × 10 cells day-major,
//!    slot-minor, skipping cells the class already holds, and keep the
//!    strictly best positive score (first seen wins ties).
//! 3. Commit the winning cell into both the schedule under
//!    construction and the shared occupancy view, so every later
//!    requirement (and every class scheduled later in the same run)
//!    sees it.
//! 4. A requirement with no positive-scoring cell stays unplaced; that
//!    surfaces through statistics, not as an error.
//!
//! No randomness anywhere: identical inputs give identical output.

use chrono::{DateTime, Utc};
use log::debug;

use crate::models::{
    ClassSchedule, Day, PlacedSession, SchedulingConstraints, SessionRequirement, TimeSlot,
    WeekOccupancy, DAY_SLOTS,
};
use crate::scheduler::scoring::score_slot;

/// Note attached to sessions this engine places.
const PLACEMENT_NOTE: &str = "auto-scheduled";

/// Greedy best-slot-per-session placement engine.
///
/// # Example
///
/// ```
/// use timetabler::models::{SchedulingConstraints, SessionRequirement, TeacherRef, WeekOccupancy};
/// use timetabler::scheduler::GreedyScheduler;
///
/// let teacher = TeacherRef::new("t1", "Ada");
/// let requirements = vec![SessionRequirement::new("History", teacher, 1)];
/// let mut occupancy = WeekOccupancy::new();
///
/// let schedule = GreedyScheduler::new().schedule(
///     &requirements,
///     "7a",
///     &mut occupancy,
///     &SchedulingConstraints::default(),
/// );
/// assert_eq!(schedule.total_lessons(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyScheduler {
    timestamp: DateTime<Utc>,
}

impl GreedyScheduler {
    /// Creates an engine stamping sessions with the current time.
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }

    /// Sets the timestamp written into placed sessions. With a fixed
    /// timestamp the output is a pure function of the inputs.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = at;
        self
    }

    /// Places `requirements` for `class_id` into a fresh week.
    ///
    /// Clears and then rebuilds `occupancy[class_id]` as it goes: the
    /// caller persists the result with an overwrite, so the occupancy
    /// view must show the new sessions, not the superseded ones.
    /// Returns the completed schedule with each day in slot order.
    pub fn schedule(
        &self,
        requirements: &[SessionRequirement],
        class_id: &str,
        occupancy: &mut WeekOccupancy,
        constraints: &SchedulingConstraints,
    ) -> ClassSchedule {
        let mut schedule = ClassSchedule::new();
        occupancy.reset_class(class_id);

        let mut ordered: Vec<&SessionRequirement> = requirements.iter().collect();
        ordered.sort_by(|a, b| {
            constraints
                .frequency_for(&b.subject)
                .cmp(&constraints.frequency_for(&a.subject))
        });

        for req in ordered {
            match self.best_cell(req, &schedule, class_id, occupancy, constraints) {
                Some((day, slot, score)) => {
                    debug!(
                        "class {class_id}: {} -> {day} slot {} (score {score})",
                        req.requirement_id, slot.id
                    );
                    let session =
                        PlacedSession::new(&req.subject, req.teacher.clone(), slot, self.timestamp)
                            .with_note(PLACEMENT_NOTE);
                    schedule.add(day, session.clone());
                    occupancy.record(class_id, day, session);
                }
                None => {
                    debug!(
                        "class {class_id}: no positive-scoring cell for {}",
                        req.requirement_id
                    );
                }
            }
        }

        schedule.sort_by_slot();
        schedule
    }

    /// Best free cell for one requirement, or `None` when every free
    /// cell scores 0.
    fn best_cell(
        &self,
        req: &SessionRequirement,
        schedule: &ClassSchedule,
        class_id: &str,
        occupancy: &WeekOccupancy,
        constraints: &SchedulingConstraints,
    ) -> Option<(Day, &'static TimeSlot, i32)> {
        let mut best: Option<(Day, &'static TimeSlot, i32)> = None;
        let mut best_score = 0;

        for day in Day::ALL {
            for slot in &DAY_SLOTS {
                if schedule.is_occupied(day, slot.id) {
                    continue;
                }
                let score = score_slot(
                    &req.subject,
                    &req.teacher,
                    day,
                    slot,
                    occupancy,
                    class_id,
                    constraints,
                );
                if score > best_score {
                    best_score = score;
                    best = Some((day, slot, score));
                }
            }
        }

        best
    }
}

impl Default for GreedyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPeriod, SchedulingConstraints, TeacherRef};
    use chrono::TimeZone;

    fn run_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap()
    }

    fn engine() -> GreedyScheduler {
        GreedyScheduler::new().with_timestamp(run_time())
    }

    fn requirements_for(
        subject: &str,
        teacher: &TeacherRef,
        constraints: &SchedulingConstraints,
    ) -> Vec<SessionRequirement> {
        (1..=constraints.frequency_for(subject))
            .map(|i| SessionRequirement::new(subject, teacher.clone(), i))
            .collect()
    }

    #[test]
    fn test_single_requirement_lands_once() {
        let ada = TeacherRef::new("t1", "Ada");
        let reqs = vec![SessionRequirement::new("History", ada, 1)];
        let mut occ = WeekOccupancy::new();
        let schedule = engine().schedule(&reqs, "7a", &mut occ, &SchedulingConstraints::default());

        assert_eq!(schedule.total_lessons(), 1);
        // Mirrored into the occupancy view.
        assert_eq!(occ.class("7a").unwrap().total_lessons(), 1);
    }

    #[test]
    fn test_math_and_pe_example_week() {
        // Math twice, PE once, two teachers, empty week: three sessions,
        // Math in morning slots, PE in slot 9 or 10.
        let c = SchedulingConstraints::default()
            .with_frequency("Mathematics", 2)
            .with_frequency("Physical Education", 1);
        let ada = TeacherRef::new("t1", "Ada");
        let ben = TeacherRef::new("t2", "Ben");

        let mut reqs = requirements_for("Mathematics", &ada, &c);
        reqs.extend(requirements_for("Physical Education", &ben, &c));

        let mut occ = WeekOccupancy::new();
        let schedule = engine().schedule(&reqs, "7a", &mut occ, &c);

        assert_eq!(schedule.total_lessons(), 3);

        let mut cells = Vec::new();
        for (day, sessions) in schedule.iter_days() {
            for s in sessions {
                cells.push((day, s.time_slot_id));
                match s.subject.as_str() {
                    "Mathematics" => assert!(s.time_slot_id <= 4, "Math in slot {}", s.time_slot_id),
                    "Physical Education" => assert!(s.time_slot_id >= 9),
                    other => panic!("unexpected subject {other}"),
                }
            }
        }
        let mut unique = cells.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), cells.len(), "a (day, slot) cell was reused");
    }

    #[test]
    fn test_two_classes_sharing_a_teacher_never_collide() {
        let c = SchedulingConstraints::default().with_frequency("Mathematics", 1);
        let kim = TeacherRef::new("t1", "Kim");
        let reqs = requirements_for("Mathematics", &kim, &c);

        let mut occ = WeekOccupancy::new();
        let e = engine();
        let first = e.schedule(&reqs, "7a", &mut occ, &c);
        let second = e.schedule(&reqs, "7b", &mut occ, &c);

        let cell_of = |schedule: &ClassSchedule| {
            schedule
                .iter_days()
                .find_map(|(day, sessions)| sessions.first().map(|s| (day, s.time_slot_id)))
                .unwrap()
        };
        assert_ne!(cell_of(&first), cell_of(&second));
    }

    #[test]
    fn test_blocked_teacher_leaves_requirement_unplaced() {
        // Kim already teaches elsewhere in every cell of the week.
        let kim = TeacherRef::new("t1", "Kim");
        let mut occ = WeekOccupancy::new();
        for day in Day::ALL {
            for slot in &DAY_SLOTS {
                occ.record(
                    "7b",
                    day,
                    PlacedSession::new("Art", kim.clone(), slot, run_time()),
                );
            }
        }

        let reqs = vec![SessionRequirement::new("History", kim, 1)];
        let schedule = engine().schedule(&reqs, "7a", &mut occ, &SchedulingConstraints::default());
        assert_eq!(schedule.total_lessons(), 0);
    }

    #[test]
    fn test_high_frequency_subjects_go_first() {
        let c = SchedulingConstraints::default()
            .with_frequency("Mathematics", 5)
            .with_frequency("Art", 1);
        let ada = TeacherRef::new("t1", "Ada");

        // Art listed first, but Mathematics outranks it by frequency.
        let mut reqs = requirements_for("Art", &ada, &c);
        reqs.extend(requirements_for("Mathematics", &ada, &c));

        let mut occ = WeekOccupancy::new();
        let schedule = engine().schedule(&reqs, "7a", &mut occ, &c);

        // Mathematics got first pick: Monday slot 1 (its preferred,
        // morning-affine, first-scanned cell).
        let first = schedule.session_at(Day::Monday, 1).unwrap();
        assert_eq!(first.subject, "Mathematics");
        assert_eq!(schedule.total_lessons(), 6);
    }

    #[test]
    fn test_days_come_back_sorted_by_slot() {
        let c = SchedulingConstraints::default();
        let ada = TeacherRef::new("t1", "Ada");
        let reqs: Vec<SessionRequirement> = ["History", "Art", "Biology", "Geography"]
            .iter()
            .map(|s| SessionRequirement::new(*s, ada.clone(), 1))
            .collect();

        let mut occ = WeekOccupancy::new();
        let schedule = engine().schedule(&reqs, "7a", &mut occ, &c);

        for (_, sessions) in schedule.iter_days() {
            let ids: Vec<u8> = sessions.iter().map(|s| s.time_slot_id).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            assert_eq!(ids, sorted);
        }
    }

    #[test]
    fn test_deterministic_byte_identical_output() {
        let c = SchedulingConstraints::default();
        let ada = TeacherRef::new("t1", "Ada");
        let ben = TeacherRef::new("t2", "Ben");
        let mut reqs = requirements_for("Mathematics", &ada, &c);
        reqs.extend(requirements_for("Physical Education", &ben, &c));
        reqs.extend(requirements_for("Music", &ben, &c));

        let run = || {
            let mut occ = WeekOccupancy::new();
            let schedule = engine().schedule(&reqs, "7a", &mut occ, &c);
            serde_json::to_string(&schedule).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_regeneration_clears_stale_own_sessions() {
        let c = SchedulingConstraints::default().with_frequency("Mathematics", 1);
        let kim = TeacherRef::new("t1", "Kim");

        // 7a's superseded week holds Kim on Monday slot 1.
        let mut occ = WeekOccupancy::new();
        occ.record(
            "7a",
            Day::Monday,
            PlacedSession::new(
                "Mathematics",
                kim.clone(),
                &DAY_SLOTS[0],
                run_time(),
            ),
        );

        let reqs = requirements_for("Mathematics", &kim, &c);
        let schedule = engine().schedule(&reqs, "7a", &mut occ, &c);

        // The stale session is gone from the occupancy view; the fresh
        // one may land in the same best cell again.
        assert_eq!(occ.class("7a").unwrap().total_lessons(), 1);
        assert_eq!(schedule.total_lessons(), 1);
        assert!(schedule.session_at(Day::Monday, 1).is_some());
    }

    #[test]
    fn test_morning_subject_prefers_morning_cells() {
        let c = SchedulingConstraints::default();
        let ada = TeacherRef::new("t1", "Ada");
        let reqs = requirements_for("Mathematics", &ada, &c); // 5 per week

        let mut occ = WeekOccupancy::new();
        let schedule = engine().schedule(&reqs, "7a", &mut occ, &c);

        for (_, sessions) in schedule.iter_days() {
            for s in sessions {
                let slot = crate::models::slot_by_id(s.time_slot_id).unwrap();
                assert_eq!(slot.period, DayPeriod::Morning);
            }
        }
    }
}
