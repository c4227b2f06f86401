//! Weekly working hours.
//!
//! Each weekday (0 = Sunday .. 6 = Saturday) holds an ordered list of half-open
//! intervals in seconds since midnight. Order is kept exactly as assigned.

use serde::{Deserialize, Serialize};

use crate::error::{AttrError, Result};

pub const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkingHours {
    days: [Vec<(u32, u32)>; 7],
}

impl WorkingHours {
    /// All days off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Monday to Friday, 9:00 - 12:00 and 13:00 - 18:00.
    pub fn standard() -> Self {
        let mut hours = Self::new();
        for day in &mut hours.days[1..6] {
            *day = vec![(9 * 3600, 12 * 3600), (13 * 3600, 18 * 3600)];
        }
        hours
    }

    pub fn set_working_hours(&mut self, day: usize, intervals: Vec<(u32, u32)>) -> Result<()> {
        let slot = self
            .days
            .get_mut(day)
            .ok_or(AttrError::InvalidWeekday(day))?;
        *slot = intervals;
        Ok(())
    }

    /// Intervals of a weekday; empty for days off and out-of-range indices.
    pub fn working_hours(&self, day: usize) -> &[(u32, u32)] {
        self.days.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_off(&self, day: usize) -> bool {
        self.working_hours(day).is_empty()
    }

    pub fn weekly_seconds(&self) -> u64 {
        self.days
            .iter()
            .flatten()
            .map(|&(start, end)| u64::from(end.saturating_sub(start)))
            .sum()
    }

    /// One `workinghours <day> ...` line per weekday, Sunday first.
    ///
    /// The last line has no trailing newline.
    pub fn source_form(&self) -> String {
        let mut out = String::new();
        for (day, name) in DAY_NAMES.iter().enumerate() {
            out.push_str("workinghours ");
            out.push_str(name);
            out.push(' ');
            let intervals = self.working_hours(day);
            if intervals.is_empty() {
                out.push_str("off");
            } else {
                let ranges = intervals
                    .iter()
                    .map(|&(start, end)| format!("{} - {}", clock(start), clock(end)))
                    .collect::<Vec<_>>();
                out.push_str(&ranges.join(", "));
            }
            if day < 6 {
                out.push('\n');
            }
        }
        out
    }
}

// The minutes field is the raw remainder in seconds unless it is zero.
fn clock(seconds: u32) -> String {
    let rem = seconds % 3600;
    if rem == 0 {
        format!("{}:00", seconds / 3600)
    } else {
        format!("{}:{}", seconds / 3600, rem)
    }
}
