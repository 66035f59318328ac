//! Slot fitness scoring.
//!
//! Ranks a candidate (day, slot) cell for one (subject, teacher)
//! session within a class's partially built week. Terms apply in a
//! fixed order on a base of 100:
//!
//! 1. Teacher conflict anywhere else in the week → score 0, no further
//!    terms.
//! 2. Subject has preferred slots: in the set +20, outside it −10.
//! 3. The contiguous occupied run around the cell already reaches the
//!    back-to-back cap → −20.
//! 4. Weekly balance: subject below its weekly target +10, at or above
//!    it −15.
//! 5. Time-of-day affinity: the morning subject in a morning slot +15,
//!    an afternoon subject in an afternoon slot +10.
//! 6. Clamp at 0.
//!
//! The at-target penalty in term 4 fires even when later days remain
//! unfilled; callers rank slots with the formula as-is.

use crate::models::{
    ClassSchedule, Day, DayPeriod, SchedulingConstraints, TeacherRef, TimeSlot, WeekOccupancy,
    SLOTS_PER_DAY,
};
use crate::scheduler::conflict::has_teacher_conflict;

/// Starting score for a conflict-free cell.
pub const BASE_SCORE: i32 = 100;
/// Bonus for landing in a subject's preferred slot.
pub const PREFERRED_SLOT_BONUS: i32 = 20;
/// Penalty for missing the preferred set when one exists.
pub const OFF_PREFERENCE_PENALTY: i32 = 10;
/// Penalty once the back-to-back run reaches the cap.
pub const CONSECUTIVE_RUN_PENALTY: i32 = 20;
/// Bonus while a subject is below its weekly target.
pub const BELOW_TARGET_BONUS: i32 = 10;
/// Penalty once a subject reaches its weekly target.
pub const AT_TARGET_PENALTY: i32 = 15;
/// Bonus for the morning subject in a morning slot.
pub const MORNING_AFFINITY_BONUS: i32 = 15;
/// Bonus for an afternoon subject in an afternoon slot.
pub const AFTERNOON_AFFINITY_BONUS: i32 = 10;

/// The subject that benefits from morning placement.
pub const MORNING_SUBJECT: &str = "Mathematics";
/// Subjects that benefit from afternoon placement.
pub const AFTERNOON_SUBJECTS: [&str; 2] = ["Physical Education", "Music"];

/// Scores placing (`subject`, `teacher`) into `slot` on `day` for
/// `class_id`. Returns 0 for a vetoed (conflicting) cell; otherwise a
/// non-negative fitness value.
///
/// Consecutive-run and weekly-balance terms read the class's own
/// in-progress sessions from `occupancy[class_id]`, which the
/// placement engine keeps mirrored as it goes.
pub fn score_slot(
    subject: &str,
    teacher: &TeacherRef,
    day: Day,
    slot: &TimeSlot,
    occupancy: &WeekOccupancy,
    class_id: &str,
    constraints: &SchedulingConstraints,
) -> i32 {
    if has_teacher_conflict(occupancy, teacher, day, slot.id, class_id) {
        return 0;
    }

    let mut score = BASE_SCORE;

    if let Some(preferred) = constraints.preferred_slots(subject) {
        if preferred.contains(&slot.id) {
            score += PREFERRED_SLOT_BONUS;
        } else {
            score -= OFF_PREFERENCE_PENALTY;
        }
    }

    let own = occupancy.class(class_id);

    let run = adjacent_run(own, day, slot.id);
    if run >= constraints.max_consecutive_sessions as usize {
        score -= CONSECUTIVE_RUN_PENALTY;
    }

    let placed = own.map(|s| s.subject_count(subject)).unwrap_or(0);
    if (placed as u32) < constraints.frequency_for(subject) {
        score += BELOW_TARGET_BONUS;
    } else {
        score -= AT_TARGET_PENALTY;
    }

    if subject == MORNING_SUBJECT && slot.period == DayPeriod::Morning {
        score += MORNING_AFFINITY_BONUS;
    }
    if AFTERNOON_SUBJECTS.contains(&subject) && slot.period == DayPeriod::Afternoon {
        score += AFTERNOON_AFFINITY_BONUS;
    }

    score.max(0)
}

/// Length of the contiguous run of real lessons touching `slot_id` on
/// `day`: scan downward from `slot_id − 1` and upward from
/// `slot_id + 1`, each direction stopping at the first cell without a
/// lesson.
fn adjacent_run(schedule: Option<&ClassSchedule>, day: Day, slot_id: u8) -> usize {
    let Some(schedule) = schedule else {
        return 0;
    };
    let occupied = |id: u8| {
        schedule
            .session_at(day, id)
            .map(|s| s.is_lesson())
            .unwrap_or(false)
    };

    let mut run = 0;
    let mut below = slot_id;
    while below > 1 && occupied(below - 1) {
        run += 1;
        below -= 1;
    }
    let mut above = slot_id;
    while above < SLOTS_PER_DAY && occupied(above + 1) {
        run += 1;
        above += 1;
    }
    run
}
