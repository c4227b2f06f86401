//! Records held by the list-shaped attribute values.
//!
//! References to other properties are [`PropertyId`] handles. Rendering them
//! needs a [`PropertyLookup`]; handles that do not resolve render as empty text.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DSL_TIME_FORMAT;
use crate::error::AttrError;
use crate::model::{PropertyId, PropertyLookup};

pub(crate) fn full_id(lookup: &dyn PropertyLookup, id: PropertyId) -> String {
    lookup.full_id(id).unwrap_or_default()
}

/// Format a timestamp, falling back to [`DSL_TIME_FORMAT`] when `format` is invalid.
pub(crate) fn format_time(time: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", time.format(DSL_TIME_FORMAT));
    }
    out
}

/// How an allocation picks among its candidate resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// First available candidate in list order
    #[default]
    Order,
    /// Candidate least likely to be needed elsewhere
    LowProb,
    /// Candidate with the lowest load so far
    LowLoad,
    /// Candidate with the highest load so far
    HiLoad,
    Random,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 5] = [
        SelectionMode::Order,
        SelectionMode::LowProb,
        SelectionMode::LowLoad,
        SelectionMode::HiLoad,
        SelectionMode::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SelectionMode::Order => "order",
            SelectionMode::LowProb => "lowprob",
            SelectionMode::LowLoad => "lowload",
            SelectionMode::HiLoad => "hiload",
            SelectionMode::Random => "random",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionMode {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| AttrError::UnknownTypeTag(s.to_string()))
    }
}

/// One `allocate` statement: candidate resources in preference order plus options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Allocation {
    pub candidates: Vec<PropertyId>,
    pub selection_mode: SelectionMode,
    pub mandatory: bool,
    pub persistent: bool,
}

impl Allocation {
    pub fn new(candidates: Vec<PropertyId>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    pub fn select_by(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    fn candidate_ids(&self, lookup: &dyn PropertyLookup) -> String {
        self.candidates
            .iter()
            .map(|&r| full_id(lookup, r))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `[ r1, r2 ] select by <mode> ` followed by the set flags.
    pub fn display_form(&self, lookup: &dyn PropertyLookup) -> String {
        let mut out = format!(
            "[ {} ] select by {} ",
            self.candidate_ids(lookup),
            self.selection_mode
        );
        if self.mandatory {
            out.push_str("mandatory ");
        }
        if self.persistent {
            out.push_str("persistent ");
        }
        out
    }

    /// Candidate list as written after `allocate`.
    ///
    /// Lossy: the selection mode and the `mandatory` and `persistent` options
    /// are not rendered, so a re-read allocation falls back to their defaults.
    pub fn source_form(&self, lookup: &dyn PropertyLookup) -> String {
        self.candidate_ids(lookup)
    }
}

/// An entry of a `depends` or `precedes` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskDependency {
    /// `None` until the referenced task has been resolved
    pub task: Option<PropertyId>,
    /// Depend on the end of the task instead of its start
    pub on_end: bool,
}

impl TaskDependency {
    pub fn resolved(task: PropertyId) -> Self {
        Self {
            task: Some(task),
            on_end: true,
        }
    }

    pub fn unresolved() -> Self {
        Self {
            task: None,
            on_end: true,
        }
    }
}

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, swapping the bounds if they are reversed.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }

    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }

    /// `<start> - <end>` with both bounds in `format`.
    pub fn format(&self, format: &str) -> String {
        format!(
            "{} - {}",
            format_time(&self.start, format),
            format_time(&self.end, format)
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DSL_TIME_FORMAT))
    }
}

/// Time a resource has booked on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub resource: PropertyId,
    pub intervals: Vec<Interval>,
}

impl Booking {
    pub fn new(resource: PropertyId, intervals: Vec<Interval>) -> Self {
        Self {
            resource,
            intervals,
        }
    }

    /// `<resource> <start> +<hours>h` per booked interval.
    pub fn display_form(&self, lookup: &dyn PropertyLookup) -> String {
        let slots = self
            .intervals
            .iter()
            .map(|iv| {
                format!(
                    "{} +{}h",
                    format_time(&iv.start, lookup.time_format()),
                    iv.duration_hours()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}", full_id(lookup, self.resource), slots)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeMode {
    #[default]
    OnStart,
    OnEnd,
    PerDiem,
}

impl ChargeMode {
    pub fn name(self) -> &'static str {
        match self {
            ChargeMode::OnStart => "onstart",
            ChargeMode::OnEnd => "onend",
            ChargeMode::PerDiem => "perdiem",
        }
    }
}

/// A fixed or daily cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub amount: f64,
    pub mode: ChargeMode,
}

impl Charge {
    pub fn new(amount: f64, mode: ChargeMode) -> Self {
        Self { amount, mode }
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.mode.name())
    }
}

/// Accounts that share the cost of a property, each with a fraction of 1.0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChargeSet {
    pub shares: Vec<(PropertyId, f64)>,
}

impl ChargeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, account: PropertyId, share: f64) -> Self {
        self.shares.push((account, share));
        self
    }

    /// Sum of all shares; a complete set adds up to 1.0.
    pub fn total_share(&self) -> f64 {
        self.shares.iter().map(|(_, s)| s).sum()
    }

    /// `(<account> <percent>%, ...)`
    pub fn display_form(&self, lookup: &dyn PropertyLookup) -> String {
        let parts = self
            .shares
            .iter()
            .map(|&(account, share)| format!("{} {}%", full_id(lookup, account), share * 100.0))
            .collect::<Vec<_>>();
        format!("({})", parts.join(", "))
    }
}

/// Number formatting rules, as set by `numberformat` and `currencyformat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealFormat {
    pub sign_prefix: String,
    pub sign_suffix: String,
    pub thousands_separator: String,
    pub fraction_separator: String,
    pub fraction_digits: u32,
}

impl Default for RealFormat {
    fn default() -> Self {
        Self {
            sign_prefix: "-".to_string(),
            sign_suffix: String::new(),
            thousands_separator: String::new(),
            fraction_separator: ".".to_string(),
            fraction_digits: 0,
        }
    }
}

impl RealFormat {
    /// Render a number according to these rules.
    pub fn format(&self, value: f64) -> String {
        let digits = self.fraction_digits as usize;
        let plain = format!("{:.*}", digits, value.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let mut grouped = String::new();
        let len = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }
        if let Some(frac) = frac_part {
            grouped.push_str(&self.fraction_separator);
            grouped.push_str(frac);
        }

        let negative = value < 0.0 && plain.chars().any(|c| c.is_ascii_digit() && c != '0');
        if negative {
            format!("{}{}{}", self.sign_prefix, grouped, self.sign_suffix)
        } else {
            grouped
        }
    }
}

impl fmt::Display for RealFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" \"{}\" \"{}\" \"{}\" {}",
            self.sign_prefix,
            self.sign_suffix,
            self.thousands_separator,
            self.fraction_separator,
            self.fraction_digits
        )
    }
}

/// One sorting criterion of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Keep the tree structure
    Tree,
    Attribute { id: String, ascending: bool },
}

impl SortKey {
    pub fn up(id: impl Into<String>) -> Self {
        SortKey::Attribute {
            id: id.into(),
            ascending: true,
        }
    }

    pub fn down(id: impl Into<String>) -> Self {
        SortKey::Attribute {
            id: id.into(),
            ascending: false,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Tree => f.write_str("tree"),
            SortKey::Attribute { id, ascending } => {
                write!(f, "{}.{}", id, if *ascending { "up" } else { "down" })
            }
        }
    }
}
