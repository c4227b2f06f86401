//! Display and source rendering of attribute values.
//!
//! Both renderers are a single exhaustive `match` over [`AttrValue`], so a new
//! kind cannot be added without deciding how it is rendered.
//!
//! ## Source form outcomes
//!
//! | Outcome | Kinds | Caller handling |
//! |---------|-------|-----------------|
//! | [`SourceForm::Done`] | everything else | text parses back to an equal value |
//! | [`SourceForm::Unsupported`] | `bookinglist` | serialize bookings separately |
//! | [`SourceForm::Incomplete`] | `limits`, `shifts` | placeholder text, never feed it to a parser |

use super::records::{format_time, full_id};
use super::value::AttrValue;
use crate::config::DSL_TIME_FORMAT;
use crate::error::{AttrError, Result};
use crate::model::{PropertyId, PropertyLookup};

/// Placeholder returned for kinds whose source form is not written yet.
pub const MISSING_SOURCE: &str = "This code is still missing!";

/// Result of rendering a value as description-language source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceForm {
    /// Source text that reconstructs the value
    Done(String),
    /// The value cannot be rendered without context the attribute does not keep
    Unsupported,
    /// Only a placeholder exists; the text is not valid source
    Incomplete(&'static str),
}

impl SourceForm {
    pub fn is_done(&self) -> bool {
        matches!(self, SourceForm::Done(_))
    }

    /// Text for display purposes, including placeholders.
    pub fn text(&self) -> Option<&str> {
        match self {
            SourceForm::Done(text) => Some(text),
            SourceForm::Incomplete(sentinel) => Some(sentinel),
            SourceForm::Unsupported => None,
        }
    }

    /// Text that is safe to hand to a parser.
    pub fn into_text(self, tag: &'static str) -> Result<String> {
        match self {
            SourceForm::Done(text) => Ok(text),
            SourceForm::Unsupported => {
                tracing::warn!(tag, "source form requested for unsupported attribute");
                Err(AttrError::SourceUnsupported { tag })
            }
            SourceForm::Incomplete(_) => {
                tracing::warn!(tag, "source form of attribute is only a placeholder");
                Err(AttrError::SourceIncomplete { tag })
            }
        }
    }
}

fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn node_id(lookup: &dyn PropertyLookup, id: Option<PropertyId>) -> String {
    id.and_then(|id| lookup.node_id(id))
        .unwrap_or_default()
        .to_string()
}

fn full_ids(lookup: &dyn PropertyLookup, ids: impl IntoIterator<Item = PropertyId>) -> String {
    join(ids.into_iter().map(|id| full_id(lookup, id)))
}

impl AttrValue {
    /// Human readable rendering of the value.
    pub fn display_form(&self, lookup: &dyn PropertyLookup) -> String {
        match self {
            AttrValue::Account(id) | AttrValue::Property(id) | AttrValue::Reference(id) => {
                node_id(lookup, *id)
            }
            AttrValue::Allocation(allocations) => allocations
                .iter()
                .map(|a| a.display_form(lookup))
                .collect::<Vec<_>>()
                .join("\n"),
            AttrValue::BookingList(bookings) => {
                join(bookings.iter().map(|b| b.display_form(lookup)))
            }
            AttrValue::Boolean(v) => v.to_string(),
            AttrValue::ChargeList(charges) => join(charges),
            AttrValue::ChargeSetList(sets) => join(sets.iter().map(|s| s.display_form(lookup))),
            AttrValue::ColumnList(items)
            | AttrValue::FlagList(items)
            | AttrValue::FormatList(items)
            | AttrValue::ScenarioList(items) => items.join(", "),
            AttrValue::Date(date) => format_time(date, lookup.time_format()),
            AttrValue::DependencyList(deps) => {
                full_ids(lookup, deps.iter().filter_map(|d| d.task))
            }
            AttrValue::Duration(v) | AttrValue::Float(v) => v.to_string(),
            AttrValue::Integer(v) => v.to_string(),
            AttrValue::IntervalList(intervals) => {
                join(intervals.iter().map(|iv| iv.format(lookup.time_format())))
            }
            AttrValue::Limits(limits) => limits.to_string(),
            AttrValue::LogicalExpression(text)
            | AttrValue::RichText(text)
            | AttrValue::Text(text)
            | AttrValue::Symbol(text) => text.clone(),
            AttrValue::RealFormat(format) => format.to_string(),
            AttrValue::ResourceList(resources) => full_ids(lookup, resources.iter().copied()),
            AttrValue::ShiftAssignments(shifts) => shifts.display_form(lookup),
            AttrValue::SortList(keys) => join(keys),
            AttrValue::TaskList(tasks) => full_ids(lookup, tasks.iter().map(|&(task, _)| task)),
            AttrValue::WorkingHours(hours) => hours.source_form(),
        }
    }

    /// Description-language rendering of the value, written with `keyword`.
    pub fn source_form(&self, keyword: &str, lookup: &dyn PropertyLookup) -> SourceForm {
        let text = match self {
            AttrValue::Account(id) => node_id(lookup, *id),
            // Candidates only; allocation options are dropped.
            AttrValue::Allocation(allocations) => allocations
                .iter()
                .map(|a| format!("allocate {}\n", a.source_form(lookup)))
                .collect(),
            AttrValue::BookingList(_) => return SourceForm::Unsupported,
            AttrValue::Boolean(v) => format!("{} {}", keyword, if *v { "yes" } else { "no" }),
            AttrValue::Date(date) => format!("{} {}", keyword, format_time(date, DSL_TIME_FORMAT)),
            AttrValue::DependencyList(deps) => format!(
                "{} {}",
                keyword,
                join(deps.iter().map(|d| d.task.map(|t| full_id(lookup, t)).unwrap_or_default()))
            ),
            AttrValue::Duration(hours) => format!("{} {}h", keyword, hours),
            AttrValue::FlagList(flags) => format!("flags {}", flags.join(", ")),
            AttrValue::IntervalList(intervals) => format!("{} {}", keyword, join(intervals)),
            AttrValue::Limits(_) | AttrValue::ShiftAssignments(_) => {
                return SourceForm::Incomplete(MISSING_SOURCE)
            }
            // Not escaped: an embedded quote ends the string early.
            AttrValue::RichText(text) | AttrValue::Text(text) => {
                format!("{} \"{}\"", keyword, text)
            }
            AttrValue::WorkingHours(hours) => hours.source_form(),
            AttrValue::ChargeList(_)
            | AttrValue::ChargeSetList(_)
            | AttrValue::ColumnList(_)
            | AttrValue::Float(_)
            | AttrValue::FormatList(_)
            | AttrValue::Integer(_)
            | AttrValue::LogicalExpression(_)
            | AttrValue::Property(_)
            | AttrValue::RealFormat(_)
            | AttrValue::Reference(_)
            | AttrValue::ResourceList(_)
            | AttrValue::ScenarioList(_)
            | AttrValue::SortList(_)
            | AttrValue::Symbol(_)
            | AttrValue::TaskList(_) => format!("{} {}", keyword, self.display_form(lookup)),
        };
        SourceForm::Done(text)
    }
}
