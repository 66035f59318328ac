//! Timetable generation orchestration.
//!
//! Gathers inputs from the external collaborators, derives the
//! session requirements for a class, runs the placement engine, and
//! persists the result. Three entry points:
//!
//! - [`TimetableGenerator::generate_for_class`]: one class, one week.
//! - [`TimetableGenerator::generate_for_all_classes`]: every class,
//!   sequentially, threading one shared occupancy accumulator so each
//!   class's placements constrain the next. One class's failure is
//!   recorded in its report and never aborts the siblings.
//! - [`TimetableGenerator::optimize_existing`]: analyzes an already
//!   persisted week and proposes fixes without touching it.
//!
//! The store is a last-write-wins document store: the persist is an
//! overwrite, not a compare-and-swap, and concurrent runs against the
//! same class/week are not guarded here.

use chrono::{DateTime, Utc};
use log::{info, warn};
use thiserror::Error;

use crate::models::{
    ClassSchedule, ConstraintOverrides, SchedulingConstraints, SchoolClass, SessionRequirement,
    Subject, Teacher, TeacherRef, WeekOccupancy,
};
use crate::scheduler::{
    analyze, suggest, GreedyScheduler, OptimizationSuggestion, ScheduleAnalysis, ScheduleStats,
};
use crate::validation::{check_inputs, check_teacher_load};

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    /// Creates a collaborator failure with a descriptive message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced by the orchestration layer.
///
/// Under-scheduling is deliberately absent: a requirement with no
/// workable cell is reported through statistics, not as an error.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The referenced class does not exist.
    #[error("class not found: {0}")]
    ClassNotFound(String),
    /// An external fetch or persist failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A failure wrapped with the class it occurred for.
    #[error("timetable generation for class {class_id} failed: {source}")]
    ForClass {
        class_id: String,
        #[source]
        source: Box<SchedulerError>,
    },
}

impl SchedulerError {
    /// Wraps an error with class context. `ClassNotFound` already
    /// carries it and passes through unchanged.
    fn for_class(class_id: &str, source: SchedulerError) -> Self {
        match source {
            e @ SchedulerError::ClassNotFound(_) => e,
            e => SchedulerError::ForClass {
                class_id: class_id.to_string(),
                source: Box::new(e),
            },
        }
    }
}

/// Read access to the school directory.
pub trait SchoolDirectory {
    /// All classes.
    fn classes(&self) -> Result<Vec<SchoolClass>, StoreError>;
    /// All subjects, active or not.
    fn subjects(&self) -> Result<Vec<Subject>, StoreError>;
    /// All teachers.
    fn teachers(&self) -> Result<Vec<Teacher>, StoreError>;
}

/// Access to persisted week schedules.
pub trait ScheduleStore {
    /// The committed schedule of every class for a week.
    fn week_occupancy(&self, week_id: &str) -> Result<WeekOccupancy, StoreError>;
    /// One class's committed schedule for a week.
    fn class_schedule(&self, class_id: &str, week_id: &str)
        -> Result<ClassSchedule, StoreError>;
    /// Writes a class's schedule. With `overwrite`, the week's prior
    /// schedule for that class is replaced, not merged.
    fn persist_class_schedule(
        &self,
        class_id: &str,
        week_id: &str,
        schedule: &ClassSchedule,
        overwrite: bool,
    ) -> Result<(), StoreError>;
}

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Policy overrides, merged over the defaults per key.
    pub constraints: ConstraintOverrides,
    /// Timestamp written into placed sessions; `None` means now.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Outcome of generating one class's week.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub schedule: ClassSchedule,
    pub stats: ScheduleStats,
}

/// One entry in the all-classes result list.
#[derive(Debug)]
pub struct ClassRunReport {
    pub class_id: String,
    pub class_name: String,
    pub outcome: Result<GenerationReport, SchedulerError>,
}

impl ClassRunReport {
    /// Whether this class's run succeeded.
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Outcome of analyzing a persisted week.
#[derive(Debug, Clone)]
pub struct OptimizationReport {
    pub analysis: ScheduleAnalysis,
    pub suggestions: Vec<OptimizationSuggestion>,
    /// Whether analysis found anything worth changing.
    pub can_optimize: bool,
}

/// Orchestrates timetable generation over the collaborator seams.
pub struct TimetableGenerator<'a> {
    directory: &'a dyn SchoolDirectory,
    store: &'a dyn ScheduleStore,
}

impl<'a> TimetableGenerator<'a> {
    /// Creates a generator over the given collaborators.
    pub fn new(directory: &'a dyn SchoolDirectory, store: &'a dyn ScheduleStore) -> Self {
        Self { directory, store }
    }

    /// Generates and persists one class's week.
    ///
    /// Builds its own occupancy snapshot, so concurrent state from
    /// other runs is not observed. Fails fast when the class does not
    /// exist; any collaborator failure is wrapped with the class id.
    pub fn generate_for_class(
        &self,
        class_id: &str,
        week_id: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationReport, SchedulerError> {
        let run = || -> Result<GenerationReport, SchedulerError> {
            let classes = self.directory.classes()?;
            let class = classes
                .iter()
                .find(|c| c.id == class_id)
                .ok_or_else(|| SchedulerError::ClassNotFound(class_id.to_string()))?;
            let mut occupancy = self.store.week_occupancy(week_id)?;
            self.run_for_class(class, week_id, &mut occupancy, options)
        };
        run().map_err(|e| SchedulerError::for_class(class_id, e))
    }

    /// Generates and persists every class's week, sequentially.
    ///
    /// The occupancy accumulator is fetched once and threaded through
    /// the loop, so class N+1 conflict-checks against class N's fresh
    /// placements. Per-class failures are recorded in the returned
    /// list; only a failure to list classes or fetch the initial
    /// occupancy aborts the whole run.
    pub fn generate_for_all_classes(
        &self,
        week_id: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<ClassRunReport>, SchedulerError> {
        let classes = self.directory.classes()?;
        let mut occupancy = self.store.week_occupancy(week_id)?;
        info!("generating timetables for {} classes, week {week_id}", classes.len());

        let reports = classes
            .iter()
            .map(|class| ClassRunReport {
                class_id: class.id.clone(),
                class_name: class.name.clone(),
                outcome: self
                    .run_for_class(class, week_id, &mut occupancy, options)
                    .map_err(|e| SchedulerError::for_class(&class.id, e)),
            })
            .collect();
        Ok(reports)
    }

    /// Analyzes a persisted week and proposes fixes.
    pub fn optimize_existing(
        &self,
        class_id: &str,
        week_id: &str,
    ) -> Result<OptimizationReport, SchedulerError> {
        let schedule = self
            .store
            .class_schedule(class_id, week_id)
            .map_err(|e| SchedulerError::for_class(class_id, e.into()))?;

        let analysis = analyze(&schedule, &SchedulingConstraints::default());
        let suggestions = suggest(&analysis);
        Ok(OptimizationReport {
            can_optimize: !analysis.conflicts.is_empty(),
            analysis,
            suggestions,
        })
    }

    /// One class's generation against a caller-owned occupancy view.
    fn run_for_class(
        &self,
        class: &SchoolClass,
        week_id: &str,
        occupancy: &mut WeekOccupancy,
        options: &GenerationOptions,
    ) -> Result<GenerationReport, SchedulerError> {
        let constraints = SchedulingConstraints::default().apply(&options.constraints);

        let subjects = self.directory.subjects()?;
        let teachers = self.directory.teachers()?;
        for issue in check_inputs(&[class.clone()], &subjects, &teachers, &constraints) {
            warn!("class {}: {}", class.id, issue.message);
        }

        let requirements = build_requirements(class, &subjects, &teachers, &constraints);
        for issue in check_teacher_load(&requirements, &constraints) {
            warn!("class {}: {}", class.id, issue.message);
        }
        info!(
            "class {} ({}): {} session requirements",
            class.id,
            class.name,
            requirements.len()
        );

        let engine = match options.timestamp {
            Some(at) => GreedyScheduler::new().with_timestamp(at),
            None => GreedyScheduler::new(),
        };
        let schedule = engine.schedule(&requirements, &class.id, occupancy, &constraints);

        self.store
            .persist_class_schedule(&class.id, week_id, &schedule, true)?;

        let stats = ScheduleStats::calculate(&schedule, &requirements);
        info!(
            "class {}: placed {}/{} sessions",
            class.id, stats.scheduled_sessions, stats.total_sessions
        );
        Ok(GenerationReport { schedule, stats })
    }
}

/// Derives a class's session requirements: one per (subject,
/// repetition-index) for every active subject, repetition count taken
/// from the subject's weekly frequency target.
///
/// A teacher is eligible when their subject list or specialization
/// covers the subject, or when they are the class's homeroom teacher
/// (homeroom teachers may take any subject for their own class). The
/// first eligible teacher in directory order is assigned. Subjects
/// with no eligible teacher are skipped; they surface through
/// statistics only once a requirement exists, so here they are logged
/// and dropped.
fn build_requirements(
    class: &SchoolClass,
    subjects: &[Subject],
    teachers: &[Teacher],
    constraints: &SchedulingConstraints,
) -> Vec<SessionRequirement> {
    let mut requirements = Vec::new();

    for subject in subjects.iter().filter(|s| s.is_active) {
        let eligible = teachers.iter().find(|t| {
            t.teaches(&subject.name)
                || (!class.homeroom_teacher.is_empty() && t.name == class.homeroom_teacher)
        });
        let Some(teacher) = eligible else {
            warn!(
                "class {}: no eligible teacher for '{}', subject skipped",
                class.id, subject.name
            );
            continue;
        };

        let teacher = TeacherRef::from(teacher);
        for repetition in 1..=constraints.frequency_for(&subject.name) {
            requirements.push(SessionRequirement::new(
                &subject.name,
                teacher.clone(),
                repetition,
            ));
        }
    }

    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{slot_by_id, Day, PlacedSession, DAY_SLOTS};
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory collaborator double backing both seams.
    struct MemoryHost {
        classes: Vec<SchoolClass>,
        subjects: Vec<Subject>,
        teachers: Vec<Teacher>,
        persisted: RefCell<HashMap<(String, String), ClassSchedule>>,
        fail_persist_for: Option<String>,
    }

    impl MemoryHost {
        fn new() -> Self {
            Self {
                classes: vec![
                    SchoolClass::new("c1", "7A").with_homeroom("Ada"),
                    SchoolClass::new("c2", "7B").with_homeroom("Ben"),
                ],
                subjects: vec![
                    Subject::new("Mathematics"),
                    Subject::new("Physical Education"),
                    Subject::new("Chemistry").with_active(false),
                ],
                teachers: vec![
                    Teacher::new("t1", "Ada").with_subject("Mathematics"),
                    Teacher::new("t2", "Ben").with_subject("Physical Education"),
                ],
                persisted: RefCell::new(HashMap::new()),
                fail_persist_for: None,
            }
        }

        fn persisted_schedule(&self, class_id: &str, week_id: &str) -> Option<ClassSchedule> {
            self.persisted
                .borrow()
                .get(&(class_id.to_string(), week_id.to_string()))
                .cloned()
        }
    }

    impl SchoolDirectory for MemoryHost {
        fn classes(&self) -> Result<Vec<SchoolClass>, StoreError> {
            Ok(self.classes.clone())
        }
        fn subjects(&self) -> Result<Vec<Subject>, StoreError> {
            Ok(self.subjects.clone())
        }
        fn teachers(&self) -> Result<Vec<Teacher>, StoreError> {
            Ok(self.teachers.clone())
        }
    }

    impl ScheduleStore for MemoryHost {
        fn week_occupancy(&self, week_id: &str) -> Result<WeekOccupancy, StoreError> {
            let mut occupancy = WeekOccupancy::new();
            for ((class_id, week), schedule) in self.persisted.borrow().iter() {
                if week == week_id {
                    occupancy = occupancy.with_class(class_id.clone(), schedule.clone());
                }
            }
            Ok(occupancy)
        }

        fn class_schedule(
            &self,
            class_id: &str,
            week_id: &str,
        ) -> Result<ClassSchedule, StoreError> {
            Ok(self
                .persisted_schedule(class_id, week_id)
                .unwrap_or_default())
        }

        fn persist_class_schedule(
            &self,
            class_id: &str,
            week_id: &str,
            schedule: &ClassSchedule,
            overwrite: bool,
        ) -> Result<(), StoreError> {
            assert!(overwrite, "generation must replace the prior week");
            if self.fail_persist_for.as_deref() == Some(class_id) {
                return Err(StoreError::new("document store rejected the write"));
            }
            self.persisted.borrow_mut().insert(
                (class_id.to_string(), week_id.to_string()),
                schedule.clone(),
            );
            Ok(())
        }
    }

    fn options() -> GenerationOptions {
        GenerationOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_generate_for_class_persists_and_reports() {
        init_logs();
        let host = MemoryHost::new();
        let generator = TimetableGenerator::new(&host, &host);

        let report = generator
            .generate_for_class("c1", "2026-W10", &options())
            .unwrap();

        // Math (5) + PE (2); Chemistry is inactive.
        assert_eq!(report.stats.total_sessions, 7);
        assert_eq!(report.stats.scheduled_sessions, 7);
        assert!(report.stats.unscheduled_subjects.is_empty());

        let stored = host.persisted_schedule("c1", "2026-W10").unwrap();
        assert_eq!(stored, report.schedule);
    }

    #[test]
    fn test_unknown_class_fails_fast() {
        init_logs();
        let host = MemoryHost::new();
        let generator = TimetableGenerator::new(&host, &host);

        let err = generator
            .generate_for_class("nope", "2026-W10", &options())
            .unwrap_err();
        assert!(matches!(err, SchedulerError::ClassNotFound(id) if id == "nope"));
        assert!(host.persisted_schedule("nope", "2026-W10").is_none());
    }

    #[test]
    fn test_all_classes_share_one_occupancy() {
        init_logs();
        let host = MemoryHost::new();
        let generator = TimetableGenerator::new(&host, &host);

        let reports = generator
            .generate_for_all_classes("2026-W10", &options())
            .unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(ClassRunReport::succeeded));

        // Ada teaches Mathematics for both classes: no shared cell may
        // hold her twice.
        let a = host.persisted_schedule("c1", "2026-W10").unwrap();
        let b = host.persisted_schedule("c2", "2026-W10").unwrap();
        for day in Day::ALL {
            for s in a.sessions(day) {
                if let Some(other) = b.session_at(day, s.time_slot_id) {
                    assert!(
                        !other.teacher.same_teacher(&s.teacher),
                        "{} double-booked on {day} slot {}",
                        s.teacher.name,
                        s.time_slot_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_one_failing_class_does_not_abort_siblings() {
        init_logs();
        let mut host = MemoryHost::new();
        host.fail_persist_for = Some("c1".to_string());
        let generator = TimetableGenerator::new(&host, &host);

        let reports = generator
            .generate_for_all_classes("2026-W10", &options())
            .unwrap();
        assert_eq!(reports.len(), 2);

        let c1 = reports.iter().find(|r| r.class_id == "c1").unwrap();
        let c2 = reports.iter().find(|r| r.class_id == "c2").unwrap();
        assert!(!c1.succeeded());
        assert!(c2.succeeded());
        // The failure carries its class context.
        let err = c1.outcome.as_ref().unwrap_err();
        assert!(err.to_string().contains("c1"));
        assert!(host.persisted_schedule("c2", "2026-W10").is_some());
    }

    #[test]
    fn test_subject_without_teacher_is_skipped_not_fatal() {
        init_logs();
        let mut host = MemoryHost::new();
        host.subjects.push(Subject::new("Latin")); // nobody teaches it
        host.classes[0].homeroom_teacher = String::new(); // no homeroom fallback
        let generator = TimetableGenerator::new(&host, &host);

        let report = generator
            .generate_for_class("c1", "2026-W10", &options())
            .unwrap();
        assert!(!report
            .stats
            .subject_distribution
            .contains_key("Latin"));
    }

    #[test]
    fn test_homeroom_teacher_covers_any_subject() {
        init_logs();
        let mut host = MemoryHost::new();
        host.subjects.push(Subject::new("Latin"));
        // Ada is c1's homeroom teacher, so Latin falls to her.
        let generator = TimetableGenerator::new(&host, &host);

        let report = generator
            .generate_for_class("c1", "2026-W10", &options())
            .unwrap();
        let latin = report.stats.subject_distribution.get("Latin").unwrap();
        assert_eq!(latin.total, 1);
    }

    #[test]
    fn test_constraint_overrides_reach_the_engine() {
        init_logs();
        let host = MemoryHost::new();
        let generator = TimetableGenerator::new(&host, &host);

        let mut opts = options();
        opts.constraints.subject_frequency = Some(
            [("Mathematics".to_string(), 2)].into_iter().collect(),
        );

        let report = generator
            .generate_for_class("c1", "2026-W10", &opts)
            .unwrap();
        // Math now 2; PE's default frequency was replaced wholesale → 1.
        assert_eq!(report.stats.total_sessions, 3);
    }

    #[test]
    fn test_blocked_preferred_subject_reported_unscheduled() {
        init_logs();
        let mut host = MemoryHost::new();
        // No homeroom fallback: PE must go to Ben, its only teacher.
        host.classes[0].homeroom_teacher = String::new();
        let generator = TimetableGenerator::new(&host, &host);

        // Ben already teaches every cell of the week for another class.
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap();
        let mut other = ClassSchedule::new();
        for day in Day::ALL {
            for slot in &DAY_SLOTS {
                other.add(
                    day,
                    PlacedSession::new(
                        "Gym",
                        TeacherRef::new("t2", "Ben"),
                        slot,
                        at,
                    ),
                );
            }
        }
        host.persist_class_schedule("c9", "2026-W10", &other, true)
            .unwrap();

        let mut opts = options();
        opts.constraints.subject_frequency = Some(
            [
                ("Mathematics".to_string(), 1),
                ("Physical Education".to_string(), 1),
            ]
            .into_iter()
            .collect(),
        );

        let report = generator
            .generate_for_class("c1", "2026-W10", &opts)
            .unwrap();
        assert_eq!(
            report
                .stats
                .unscheduled_subjects
                .iter()
                .map(|u| (u.subject.as_str(), u.missing))
                .collect::<Vec<_>>(),
            vec![("Physical Education", 1)]
        );
    }

    #[test]
    fn test_optimize_existing_flags_long_runs() {
        init_logs();
        let host = MemoryHost::new();

        // Persist a week with six back-to-back lessons on Monday.
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap();
        let mut schedule = ClassSchedule::new();
        for slot_id in 1..=6 {
            schedule.add(
                Day::Monday,
                PlacedSession::new(
                    "History",
                    TeacherRef::new("t1", "Ada"),
                    slot_by_id(slot_id).unwrap(),
                    at,
                ),
            );
        }
        host.persist_class_schedule("c1", "2026-W10", &schedule, true)
            .unwrap();

        let generator = TimetableGenerator::new(&host, &host);
        let report = generator.optimize_existing("c1", "2026-W10").unwrap();
        assert!(report.can_optimize);
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.suggestions[0].day, Day::Monday);
    }

    #[test]
    fn test_optimize_clean_week_has_nothing_to_do() {
        init_logs();
        let host = MemoryHost::new();
        let generator = TimetableGenerator::new(&host, &host);
        let report = generator.optimize_existing("c1", "2026-W10").unwrap();
        assert!(!report.can_optimize);
        assert!(report.suggestions.is_empty());
    }
}
