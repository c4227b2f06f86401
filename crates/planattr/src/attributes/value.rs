//! Attribute values.
//!
//! [`AttrValue`] is the closed family of value kinds. Each variant corresponds to
//! one [`AttributeKind`]; a value never changes its kind once an attribute holds it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::limits::{Limits, ShiftAssignments};
use super::records::{
    Allocation, Booking, Charge, ChargeSet, Interval, RealFormat, SortKey, TaskDependency,
};
use super::spec::AttributeKind;
use super::working_hours::WorkingHours;
use crate::model::PropertyId;

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Account a property is charged to
    Account(Option<PropertyId>),
    /// `allocate` statements in order
    Allocation(Vec<Allocation>),
    BookingList(Vec<Booking>),
    Boolean(bool),
    ChargeList(Vec<Charge>),
    ChargeSetList(Vec<ChargeSet>),
    /// Report column ids
    ColumnList(Vec<String>),
    Date(DateTime<Utc>),
    DependencyList(Vec<TaskDependency>),
    /// Hours
    Duration(f64),
    Integer(i64),
    FlagList(Vec<String>),
    Float(f64),
    FormatList(Vec<String>),
    IntervalList(Vec<Interval>),
    Limits(Limits),
    LogicalExpression(String),
    Property(Option<PropertyId>),
    RealFormat(RealFormat),
    Reference(Option<PropertyId>),
    ResourceList(Vec<PropertyId>),
    /// Rich text markup. Written in double quotes without escaping, so text
    /// containing `"` does not read back.
    RichText(String),
    /// Scenario ids
    ScenarioList(Vec<String>),
    ShiftAssignments(ShiftAssignments),
    SortList(Vec<SortKey>),
    /// Plain text. Quoted like [`AttrValue::RichText`], with the same
    /// limitation for embedded `"`.
    Text(String),
    Symbol(String),
    /// Tasks paired with an on-end flag
    TaskList(Vec<(PropertyId, bool)>),
    WorkingHours(WorkingHours),
}

impl AttrValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttrValue::Account(_) => AttributeKind::Account,
            AttrValue::Allocation(_) => AttributeKind::Allocation,
            AttrValue::BookingList(_) => AttributeKind::BookingList,
            AttrValue::Boolean(_) => AttributeKind::Boolean,
            AttrValue::ChargeList(_) => AttributeKind::ChargeList,
            AttrValue::ChargeSetList(_) => AttributeKind::ChargeSetList,
            AttrValue::ColumnList(_) => AttributeKind::ColumnList,
            AttrValue::Date(_) => AttributeKind::Date,
            AttrValue::DependencyList(_) => AttributeKind::DependencyList,
            AttrValue::Duration(_) => AttributeKind::Duration,
            AttrValue::Integer(_) => AttributeKind::Integer,
            AttrValue::FlagList(_) => AttributeKind::FlagList,
            AttrValue::Float(_) => AttributeKind::Float,
            AttrValue::FormatList(_) => AttributeKind::FormatList,
            AttrValue::IntervalList(_) => AttributeKind::IntervalList,
            AttrValue::Limits(_) => AttributeKind::Limits,
            AttrValue::LogicalExpression(_) => AttributeKind::LogicalExpression,
            AttrValue::Property(_) => AttributeKind::Property,
            AttrValue::RealFormat(_) => AttributeKind::RealFormat,
            AttrValue::Reference(_) => AttributeKind::Reference,
            AttrValue::ResourceList(_) => AttributeKind::ResourceList,
            AttrValue::RichText(_) => AttributeKind::RichText,
            AttrValue::ScenarioList(_) => AttributeKind::ScenarioList,
            AttrValue::ShiftAssignments(_) => AttributeKind::ShiftAssignments,
            AttrValue::SortList(_) => AttributeKind::SortList,
            AttrValue::Text(_) => AttributeKind::Text,
            AttrValue::Symbol(_) => AttributeKind::Symbol,
            AttrValue::TaskList(_) => AttributeKind::TaskList,
            AttrValue::WorkingHours(_) => AttributeKind::WorkingHours,
        }
    }

    /// Number of elements for list-shaped values, `None` for everything else.
    pub fn element_count(&self) -> Option<usize> {
        match self {
            AttrValue::Allocation(v) => Some(v.len()),
            AttrValue::BookingList(v) => Some(v.len()),
            AttrValue::ChargeList(v) => Some(v.len()),
            AttrValue::ChargeSetList(v) => Some(v.len()),
            AttrValue::ColumnList(v) | AttrValue::FlagList(v) => Some(v.len()),
            AttrValue::FormatList(v) | AttrValue::ScenarioList(v) => Some(v.len()),
            AttrValue::DependencyList(v) => Some(v.len()),
            AttrValue::IntervalList(v) => Some(v.len()),
            AttrValue::ResourceList(v) => Some(v.len()),
            AttrValue::SortList(v) => Some(v.len()),
            AttrValue::TaskList(v) => Some(v.len()),
            _ => None,
        }
    }

    /// Fold `other` into this value.
    ///
    /// Lists of the same kind are extended, other values of the same kind are
    /// replaced. Replaced limits and shifts keep their project link unless the
    /// new value brings its own. A value of a different kind is handed back
    /// unchanged.
    pub(crate) fn absorb(&mut self, other: AttrValue) -> Result<(), AttrValue> {
        if self.kind() != other.kind() {
            return Err(other);
        }
        match (self, other) {
            (AttrValue::Allocation(a), AttrValue::Allocation(b)) => a.extend(b),
            (AttrValue::BookingList(a), AttrValue::BookingList(b)) => a.extend(b),
            (AttrValue::ChargeList(a), AttrValue::ChargeList(b)) => a.extend(b),
            (AttrValue::ChargeSetList(a), AttrValue::ChargeSetList(b)) => a.extend(b),
            (AttrValue::ColumnList(a), AttrValue::ColumnList(b)) => a.extend(b),
            (AttrValue::DependencyList(a), AttrValue::DependencyList(b)) => a.extend(b),
            (AttrValue::FlagList(a), AttrValue::FlagList(b)) => a.extend(b),
            (AttrValue::FormatList(a), AttrValue::FormatList(b)) => a.extend(b),
            (AttrValue::IntervalList(a), AttrValue::IntervalList(b)) => a.extend(b),
            (AttrValue::ResourceList(a), AttrValue::ResourceList(b)) => a.extend(b),
            (AttrValue::ScenarioList(a), AttrValue::ScenarioList(b)) => a.extend(b),
            (AttrValue::SortList(a), AttrValue::SortList(b)) => a.extend(b),
            (AttrValue::TaskList(a), AttrValue::TaskList(b)) => a.extend(b),
            (AttrValue::Limits(a), AttrValue::Limits(b)) => a.replace(b),
            (AttrValue::ShiftAssignments(a), AttrValue::ShiftAssignments(b)) => a.replace(b),
            (slot, value) => *slot = value,
        }
        Ok(())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// The referenced property of account, property and reference values.
    pub fn as_property(&self) -> Option<PropertyId> {
        match self {
            AttrValue::Account(v) | AttrValue::Property(v) | AttrValue::Reference(v) => *v,
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s)
            | AttrValue::RichText(s)
            | AttrValue::Symbol(s)
            | AttrValue::LogicalExpression(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::LimitKind;
    use crate::config::ProjectContext;

    #[test]
    fn absorb_extends_lists_in_order() {
        let mut value = AttrValue::FlagList(vec!["a".into(), "b".into()]);
        value
            .absorb(AttrValue::FlagList(vec!["c".into()]))
            .unwrap();
        assert_eq!(
            value,
            AttrValue::FlagList(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn absorb_replaces_scalars() {
        let mut value = AttrValue::Duration(3.0);
        value.absorb(AttrValue::Duration(5.0)).unwrap();
        assert_eq!(value, AttrValue::Duration(5.0));
    }

    #[test]
    fn absorb_rejects_other_kind() {
        let mut value = AttrValue::ResourceList(vec![PropertyId(1)]);
        let rejected = value.absorb(AttrValue::Symbol("x".into())).unwrap_err();
        assert_eq!(rejected, AttrValue::Symbol("x".into()));
        assert_eq!(value, AttrValue::ResourceList(vec![PropertyId(1)]));
    }

    #[test]
    fn absorb_keeps_project_link_of_limits() {
        let context = ProjectContext::default();
        let mut old = Limits::new().with(LimitKind::WeeklyMax, 30.0);
        old.bind_project(&context.handle());
        let mut value = AttrValue::Limits(old);
        value
            .absorb(AttrValue::Limits(Limits::new().with(LimitKind::DailyMax, 4.0)))
            .unwrap();
        match value {
            AttrValue::Limits(limits) => {
                assert!(limits.is_bound());
                assert_eq!(limits.get(LimitKind::WeeklyMax), None);
                assert_eq!(limits.get(LimitKind::DailyMax), Some(4.0));
            }
            other => panic!("Expected Limits, got {:?}", other),
        }
    }

    #[test]
    fn len_only_for_lists() {
        assert_eq!(AttrValue::TaskList(vec![(PropertyId(0), true)]).element_count(), Some(1));
        assert_eq!(AttrValue::Boolean(true).element_count(), None);
        assert_eq!(AttrValue::WorkingHours(WorkingHours::new()).element_count(), None);
    }

    #[test]
    fn accessors() {
        assert_eq!(AttrValue::Boolean(true).as_bool(), Some(true));
        assert_eq!(AttrValue::Integer(1).as_bool(), None);
        assert_eq!(
            AttrValue::Account(Some(PropertyId(3))).as_property(),
            Some(PropertyId(3))
        );
        assert_eq!(AttrValue::Reference(None).as_property(), None);
        assert_eq!(AttrValue::RichText("hi".into()).as_text(), Some("hi"));
        assert_eq!(AttrValue::Float(1.0).as_text(), None);
    }
}
