//! Placement engine, scoring, conflict detection, and reporting.
//!
//! # Algorithm
//!
//! `GreedyScheduler` is a greedy, single-pass, best-slot-per-session
//! heuristic: every required session is scored against every free
//! (day, slot) cell and committed to the best positive one. It is not
//! optimal, but it is fast, deterministic, and never double-books a
//! teacher.
//!
//! # Reporting
//!
//! `ScheduleStats` compares placed against required sessions;
//! `analyze`/`suggest` inspect persisted weeks for structural problems.

pub mod conflict;
pub mod scoring;
pub mod stats;

mod engine;

pub use conflict::has_teacher_conflict;
pub use engine::GreedyScheduler;
pub use scoring::score_slot;
pub use stats::{
    analyze, suggest, DayUsage, OptimizationSuggestion, ScheduleAnalysis, ScheduleConflict,
    ScheduleStats, SubjectTally, SuggestionKind, SuggestionPriority, UnscheduledSubject,
};
