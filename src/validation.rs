//! Input integrity checks.
//!
//! Inspects directory records and the merged policy before a run and
//! reports everything questionable at once. Findings are warnings:
//! scheduling proceeds regardless (unknown subjects simply get default
//! treatment), but the generator logs each one so operators can fix
//! the data.

use std::collections::HashSet;

use crate::models::{
    SchedulingConstraints, SchoolClass, SessionRequirement, Subject, Teacher, TeacherRef,
    SLOTS_PER_DAY,
};

/// A data-quality finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Finding category.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of data-quality findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Two records share an identifier.
    DuplicateId,
    /// A policy key names a subject the directory does not know.
    UnknownSubject,
    /// A preferred slot id falls outside the grid.
    SlotOutOfRange,
    /// A teacher record lists no subjects and no specialization.
    UnqualifiedTeacher,
    /// One teacher's required load exceeds the weekly workload cap.
    TeacherOverloaded,
}

impl ValidationIssue {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks directory records and the merged policy.
///
/// Collects every finding rather than stopping at the first:
/// duplicate class/teacher ids, teachers with nothing to teach,
/// policy keys referencing unknown subjects, preferred slot ids
/// outside `1..=10`.
pub fn check_inputs(
    classes: &[SchoolClass],
    subjects: &[Subject],
    teachers: &[Teacher],
    constraints: &SchedulingConstraints,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut class_ids = HashSet::new();
    for class in classes {
        if !class_ids.insert(class.id.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicateId,
                format!("duplicate class id: {}", class.id),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for teacher in teachers {
        if !teacher_ids.insert(teacher.id.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicateId,
                format!("duplicate teacher id: {}", teacher.id),
            ));
        }
        if teacher.subjects.is_empty() && teacher.specialization.is_empty() {
            issues.push(ValidationIssue::new(
                IssueKind::UnqualifiedTeacher,
                format!("teacher '{}' lists no subjects", teacher.name),
            ));
        }
    }

    let known: HashSet<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
    for subject in constraints.preferred_time_slots.keys() {
        if !known.contains(subject.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::UnknownSubject,
                format!("preferred_time_slots names unknown subject '{subject}'"),
            ));
        }
    }
    for subject in constraints.subject_frequency.keys() {
        if !known.contains(subject.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::UnknownSubject,
                format!("subject_frequency names unknown subject '{subject}'"),
            ));
        }
    }

    for (subject, slots) in &constraints.preferred_time_slots {
        for &slot_id in slots {
            if !(1..=SLOTS_PER_DAY).contains(&slot_id) {
                issues.push(ValidationIssue::new(
                    IssueKind::SlotOutOfRange,
                    format!("preferred slot {slot_id} for '{subject}' is outside the grid"),
                ));
            }
        }
    }

    issues
}

/// Checks one class's derived requirements against the per-teacher
/// weekly workload cap.
pub fn check_teacher_load(
    requirements: &[SessionRequirement],
    constraints: &SchedulingConstraints,
) -> Vec<ValidationIssue> {
    let cap = constraints.teacher_workload.max_sessions_per_week as usize;
    let mut load: Vec<(&TeacherRef, usize)> = Vec::new();

    for req in requirements {
        match load.iter_mut().find(|(t, _)| t.same_teacher(&req.teacher)) {
            Some((_, count)) => *count += 1,
            None => load.push((&req.teacher, 1)),
        }
    }

    load.into_iter()
        .filter(|&(_, count)| count > cap)
        .map(|(teacher, count)| {
            ValidationIssue::new(
                IssueKind::TeacherOverloaded,
                format!(
                    "teacher '{}' is down for {count} sessions, above the weekly cap of {cap}",
                    teacher.name
                ),
            )
        })
        .collect()
}
