//! Values that keep a link to the project settings: limits and shift assignments.
//!
//! The link is a [`ProjectBinding`], a weak handle to the [`ProjectConfig`]
//! owned by a [`crate::config::ProjectContext`]. Binding again replaces the link.

use std::fmt;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::records::{full_id, Interval};
use crate::config::ProjectConfig;
use crate::model::{PropertyId, PropertyLookup};

/// Non-owning link to the project settings.
#[derive(Debug, Clone, Default)]
pub struct ProjectBinding(Option<Weak<ProjectConfig>>);

impl ProjectBinding {
    pub fn bind(&mut self, project: &Weak<ProjectConfig>) {
        self.0 = Some(project.clone());
    }

    /// The settings, if bound and still alive.
    pub fn get(&self) -> Option<Rc<ProjectConfig>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_bound(&self) -> bool {
        self.get().is_some()
    }

    fn take_over(&mut self, other: ProjectBinding) {
        if other.0.is_some() {
            self.0 = other.0;
        }
    }
}

impl PartialEq for ProjectBinding {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitKind {
    DailyMax,
    DailyMin,
    WeeklyMax,
    WeeklyMin,
    MonthlyMax,
    MonthlyMin,
}

impl LimitKind {
    pub fn name(self) -> &'static str {
        match self {
            LimitKind::DailyMax => "dailymax",
            LimitKind::DailyMin => "dailymin",
            LimitKind::WeeklyMax => "weeklymax",
            LimitKind::WeeklyMin => "weeklymin",
            LimitKind::MonthlyMax => "monthlymax",
            LimitKind::MonthlyMin => "monthlymin",
        }
    }

    pub fn is_upper_bound(self) -> bool {
        matches!(
            self,
            LimitKind::DailyMax | LimitKind::WeeklyMax | LimitKind::MonthlyMax
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub kind: LimitKind,
    pub hours: f64,
}

/// Upper and lower bounds on work per period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Limits {
    limits: Vec<Limit>,
    #[serde(skip)]
    project: ProjectBinding,
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a limit, replacing an earlier one of the same kind.
    pub fn set(&mut self, kind: LimitKind, hours: f64) {
        match self.limits.iter_mut().find(|l| l.kind == kind) {
            Some(limit) => limit.hours = hours,
            None => self.limits.push(Limit { kind, hours }),
        }
    }

    pub fn with(mut self, kind: LimitKind, hours: f64) -> Self {
        self.set(kind, hours);
        self
    }

    pub fn get(&self, kind: LimitKind) -> Option<f64> {
        self.limits.iter().find(|l| l.kind == kind).map(|l| l.hours)
    }

    pub fn limits(&self) -> &[Limit] {
        &self.limits
    }

    pub fn bind_project(&mut self, project: &Weak<ProjectConfig>) {
        self.project.bind(project);
    }

    pub fn is_bound(&self) -> bool {
        self.project.is_bound()
    }

    /// Take over the limits of `next`, keeping the current project link when
    /// `next` has none.
    pub(crate) fn replace(&mut self, next: Limits) {
        self.limits = next.limits;
        self.project.take_over(next.project);
    }

    /// The limits converted to scheduling slots of the bound project.
    ///
    /// `None` when no live project is bound.
    pub fn slot_limits(&self) -> Option<Vec<(LimitKind, u32)>> {
        let project = self.project.get()?;
        Some(
            self.limits
                .iter()
                .map(|l| (l.kind, project.hours_to_slots(l.hours)))
                .collect(),
        )
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .limits
            .iter()
            .map(|l| format!("{} {}h", l.kind.name(), l.hours))
            .collect::<Vec<_>>();
        f.write_str(&parts.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub shift: PropertyId,
    pub interval: Interval,
}

/// Shifts in effect for a property over given periods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShiftAssignments {
    assignments: Vec<ShiftAssignment>,
    #[serde(skip)]
    project: ProjectBinding,
}

impl ShiftAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, shift: PropertyId, interval: Interval) {
        self.assignments.push(ShiftAssignment { shift, interval });
    }

    pub fn with(mut self, shift: PropertyId, interval: Interval) -> Self {
        self.assign(shift, interval);
        self
    }

    pub fn assignments(&self) -> &[ShiftAssignment] {
        &self.assignments
    }

    /// The shift covering `time`. Later assignments win over earlier ones.
    pub fn shift_at(&self, time: DateTime<Utc>) -> Option<PropertyId> {
        self.assignments
            .iter()
            .rev()
            .find(|a| a.interval.contains(time))
            .map(|a| a.shift)
    }

    pub fn bind_project(&mut self, project: &Weak<ProjectConfig>) {
        self.project.bind(project);
    }

    pub fn is_bound(&self) -> bool {
        self.project.is_bound()
    }

    pub fn project(&self) -> Option<Rc<ProjectConfig>> {
        self.project.get()
    }

    pub(crate) fn replace(&mut self, next: ShiftAssignments) {
        self.assignments = next.assignments;
        self.project.take_over(next.project);
    }

    /// `<shift> <start> - <end>` per assignment.
    pub fn display_form(&self, lookup: &dyn PropertyLookup) -> String {
        self.assignments
            .iter()
            .map(|a| {
                format!(
                    "{} {}",
                    full_id(lookup, a.shift),
                    a.interval.format(lookup.time_format())
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
