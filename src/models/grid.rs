//! Week grid: teaching days and the fixed ten-period day.
//!
//! The grid is static data — six days (Monday through Saturday, no
//! Sunday) of ten 45-minute periods each, identical across days.
//! Periods 1–5 fall in the morning, 6–10 in the afternoon.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of teaching periods per day.
pub const SLOTS_PER_DAY: u8 = 10;

/// A teaching day. The week runs Monday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Lowercase day name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse half of the teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Morning,
    Afternoon,
}

/// One fixed teaching period within a day.
///
/// Slots are compiled-in: ten per day, identified by id `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// Slot identifier, `1..=10`.
    pub id: u8,
    /// Display label.
    pub label: &'static str,
    /// Start of the period, `HH:MM`.
    pub start: &'static str,
    /// End of the period, `HH:MM`.
    pub end: &'static str,
    /// Morning or afternoon.
    pub period: DayPeriod,
}

const fn slot(
    id: u8,
    label: &'static str,
    start: &'static str,
    end: &'static str,
    period: DayPeriod,
) -> TimeSlot {
    TimeSlot {
        id,
        label,
        start,
        end,
        period,
    }
}

/// The ten periods of a teaching day, in slot-id order.
pub static DAY_SLOTS: [TimeSlot; 10] = [
    slot(1, "Period 1", "08:00", "08:45", DayPeriod::Morning),
    slot(2, "Period 2", "08:50", "09:35", DayPeriod::Morning),
    slot(3, "Period 3", "09:40", "10:25", DayPeriod::Morning),
    slot(4, "Period 4", "10:45", "11:30", DayPeriod::Morning),
    slot(5, "Period 5", "11:35", "12:20", DayPeriod::Morning),
    slot(6, "Period 6", "13:00", "13:45", DayPeriod::Afternoon),
    slot(7, "Period 7", "13:50", "14:35", DayPeriod::Afternoon),
    slot(8, "Period 8", "14:40", "15:25", DayPeriod::Afternoon),
    slot(9, "Period 9", "15:45", "16:30", DayPeriod::Afternoon),
    slot(10, "Period 10", "16:35", "17:20", DayPeriod::Afternoon),
];

/// Looks up a slot by id. Returns `None` for ids outside `1..=10`.
pub fn slot_by_id(id: u8) -> Option<&'static TimeSlot> {
    if (1..=SLOTS_PER_DAY).contains(&id) {
        Some(&DAY_SLOTS[(id - 1) as usize])
    } else {
        None
    }
}
