//! Attribute kinds, type tags and the registry of attribute specifications.
//!
//! [`AttributeKind`] is the closed set of value kinds. Each kind has a stable
//! type tag that parsers and registries use to pick a kind by name.
//!
//! [`AttributeSpec`] is the type descriptor an attribute is declared with: the
//! keyword it is written with, the property class it belongs to and its kind.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::limits::{Limits, ShiftAssignments};
use super::records::RealFormat;
use super::value::AttrValue;
use super::working_hours::WorkingHours;
use crate::error::AttrError;
use crate::model::PropertyKind;
use crate::model::PropertyKind::{Account, Report, Resource, Shift, Task};
use AttributeKind as K;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Account,
    Allocation,
    BookingList,
    Boolean,
    ChargeList,
    ChargeSetList,
    ColumnList,
    Date,
    DependencyList,
    Duration,
    Integer,
    FlagList,
    Float,
    FormatList,
    IntervalList,
    Limits,
    LogicalExpression,
    Property,
    RealFormat,
    Reference,
    ResourceList,
    RichText,
    ScenarioList,
    ShiftAssignments,
    SortList,
    Text,
    Symbol,
    TaskList,
    WorkingHours,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 29] = [
        AttributeKind::Account,
        AttributeKind::Allocation,
        AttributeKind::BookingList,
        AttributeKind::Boolean,
        AttributeKind::ChargeList,
        AttributeKind::ChargeSetList,
        AttributeKind::ColumnList,
        AttributeKind::Date,
        AttributeKind::DependencyList,
        AttributeKind::Duration,
        AttributeKind::Integer,
        AttributeKind::FlagList,
        AttributeKind::Float,
        AttributeKind::FormatList,
        AttributeKind::IntervalList,
        AttributeKind::Limits,
        AttributeKind::LogicalExpression,
        AttributeKind::Property,
        AttributeKind::RealFormat,
        AttributeKind::Reference,
        AttributeKind::ResourceList,
        AttributeKind::RichText,
        AttributeKind::ScenarioList,
        AttributeKind::ShiftAssignments,
        AttributeKind::SortList,
        AttributeKind::Text,
        AttributeKind::Symbol,
        AttributeKind::TaskList,
        AttributeKind::WorkingHours,
    ];

    /// Stable name of the kind, used by registries and parsers.
    pub fn type_tag(self) -> &'static str {
        match self {
            AttributeKind::Account => "account",
            AttributeKind::Allocation => "allocation",
            AttributeKind::BookingList => "bookinglist",
            AttributeKind::Boolean => "boolean",
            AttributeKind::ChargeList => "charge",
            AttributeKind::ChargeSetList => "chargeset",
            AttributeKind::ColumnList => "columns",
            AttributeKind::Date => "date",
            AttributeKind::DependencyList => "dependencylist",
            AttributeKind::Duration => "duration",
            AttributeKind::Integer => "integer",
            AttributeKind::FlagList => "flaglist",
            AttributeKind::Float => "float",
            AttributeKind::FormatList => "formatlist",
            AttributeKind::IntervalList => "intervallist",
            AttributeKind::Limits => "limits",
            AttributeKind::LogicalExpression => "logicalexpression",
            AttributeKind::Property => "property",
            AttributeKind::RealFormat => "realformat",
            AttributeKind::Reference => "reference",
            AttributeKind::ResourceList => "resourcelist",
            AttributeKind::RichText => "richtext",
            AttributeKind::ScenarioList => "scenarios",
            AttributeKind::ShiftAssignments => "shifts",
            AttributeKind::SortList => "sorting",
            AttributeKind::Text => "text",
            AttributeKind::Symbol => "symbol",
            AttributeKind::TaskList => "tasklist",
            AttributeKind::WorkingHours => "workinghours",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_tag() == tag)
    }

    /// Whether values of this kind are ordered sequences.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            AttributeKind::Allocation
                | AttributeKind::BookingList
                | AttributeKind::ChargeList
                | AttributeKind::ChargeSetList
                | AttributeKind::ColumnList
                | AttributeKind::DependencyList
                | AttributeKind::FlagList
                | AttributeKind::FormatList
                | AttributeKind::IntervalList
                | AttributeKind::ResourceList
                | AttributeKind::ScenarioList
                | AttributeKind::SortList
                | AttributeKind::TaskList
        )
    }

    /// Whether values of this kind keep a link to the project settings.
    pub fn needs_project(self) -> bool {
        matches!(
            self,
            AttributeKind::Limits | AttributeKind::ShiftAssignments
        )
    }

    /// The value a freshly declared attribute of this kind starts with.
    pub fn default_value(self) -> AttrValue {
        match self {
            AttributeKind::Account => AttrValue::Account(None),
            AttributeKind::Allocation => AttrValue::Allocation(Vec::new()),
            AttributeKind::BookingList => AttrValue::BookingList(Vec::new()),
            AttributeKind::Boolean => AttrValue::Boolean(false),
            AttributeKind::ChargeList => AttrValue::ChargeList(Vec::new()),
            AttributeKind::ChargeSetList => AttrValue::ChargeSetList(Vec::new()),
            AttributeKind::ColumnList => AttrValue::ColumnList(Vec::new()),
            AttributeKind::Date => AttrValue::Date(chrono::DateTime::UNIX_EPOCH),
            AttributeKind::DependencyList => AttrValue::DependencyList(Vec::new()),
            AttributeKind::Duration => AttrValue::Duration(0.0),
            AttributeKind::Integer => AttrValue::Integer(0),
            AttributeKind::FlagList => AttrValue::FlagList(Vec::new()),
            AttributeKind::Float => AttrValue::Float(0.0),
            AttributeKind::FormatList => AttrValue::FormatList(Vec::new()),
            AttributeKind::IntervalList => AttrValue::IntervalList(Vec::new()),
            AttributeKind::Limits => AttrValue::Limits(Limits::default()),
            AttributeKind::LogicalExpression => AttrValue::LogicalExpression(String::new()),
            AttributeKind::Property => AttrValue::Property(None),
            AttributeKind::RealFormat => AttrValue::RealFormat(RealFormat::default()),
            AttributeKind::Reference => AttrValue::Reference(None),
            AttributeKind::ResourceList => AttrValue::ResourceList(Vec::new()),
            AttributeKind::RichText => AttrValue::RichText(String::new()),
            AttributeKind::ScenarioList => AttrValue::ScenarioList(Vec::new()),
            AttributeKind::ShiftAssignments => {
                AttrValue::ShiftAssignments(ShiftAssignments::default())
            }
            AttributeKind::SortList => AttrValue::SortList(Vec::new()),
            AttributeKind::Text => AttrValue::Text(String::new()),
            AttributeKind::Symbol => AttrValue::Symbol(String::new()),
            AttributeKind::TaskList => AttrValue::TaskList(Vec::new()),
            AttributeKind::WorkingHours => AttrValue::WorkingHours(WorkingHours::default()),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

impl FromStr for AttributeKind {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| AttrError::UnknownTypeTag(s.to_string()))
    }
}

/// Index of an [`AttributeSpec`] in a tree's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecId(pub usize);

/// Specification for a single attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    /// Keyword the attribute is written with (e.g., "milestone", "allocate")
    pub id: Cow<'static, str>,

    /// Human readable name, used as report column header
    pub name: Cow<'static, str>,

    /// The property class the attribute belongs to
    pub class: PropertyKind,

    /// The kind of value this attribute holds
    pub kind: AttributeKind,

    /// Whether child properties inherit the value from their parent
    pub inheritable: bool,

    /// Whether each scenario keeps its own value
    pub scenario_specific: bool,
}

impl AttributeSpec {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        class: PropertyKind,
        kind: AttributeKind,
    ) -> Self {
        Self {
            id: Cow::Borrowed(id),
            name: Cow::Borrowed(name),
            class,
            kind,
            inheritable: false,
            scenario_specific: false,
        }
    }

    /// A user-defined attribute.
    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        class: PropertyKind,
        kind: AttributeKind,
    ) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            name: Cow::Owned(name.into()),
            class,
            kind,
            inheritable: false,
            scenario_specific: false,
        }
    }

    pub const fn inheritable(mut self) -> Self {
        self.inheritable = true;
        self
    }

    pub const fn scenario_specific(mut self) -> Self {
        self.scenario_specific = true;
        self
    }
}

/// Registry of the built-in attributes.
pub const BUILTIN_ATTRIBUTES: &[AttributeSpec] = &[
    // Tasks
    AttributeSpec::new("account", "Account", Task, K::Account)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("allocate", "Allocations", Task, K::Allocation).scenario_specific(),
    AttributeSpec::new("booking", "Bookings", Task, K::BookingList).scenario_specific(),
    AttributeSpec::new("charge", "Charges", Task, K::ChargeList).scenario_specific(),
    AttributeSpec::new("chargeset", "Charge Sets", Task, K::ChargeSetList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("complete", "Completion", Task, K::Float).scenario_specific(),
    AttributeSpec::new("depends", "Dependencies", Task, K::DependencyList).scenario_specific(),
    AttributeSpec::new("precedes", "Successors", Task, K::DependencyList).scenario_specific(),
    AttributeSpec::new("duration", "Duration", Task, K::Duration).scenario_specific(),
    AttributeSpec::new("effort", "Effort", Task, K::Duration).scenario_specific(),
    AttributeSpec::new("length", "Length", Task, K::Duration).scenario_specific(),
    AttributeSpec::new("start", "Start", Task, K::Date).scenario_specific(),
    AttributeSpec::new("end", "End", Task, K::Date).scenario_specific(),
    AttributeSpec::new("flags", "Flags", Task, K::FlagList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("milestone", "Milestone", Task, K::Boolean).scenario_specific(),
    AttributeSpec::new("note", "Note", Task, K::RichText),
    AttributeSpec::new("priority", "Priority", Task, K::Integer)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("projectid", "Project ID", Task, K::Symbol).inheritable(),
    AttributeSpec::new("reference", "Reference", Task, K::Reference),
    AttributeSpec::new("responsible", "Responsible", Task, K::ResourceList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("limits", "Limits", Task, K::Limits)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("shifts", "Shifts", Task, K::ShiftAssignments)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("startcredits", "Start Credits", Task, K::TaskList).scenario_specific(),
    // Resources
    AttributeSpec::new("booking", "Bookings", Resource, K::BookingList).scenario_specific(),
    AttributeSpec::new("chargeset", "Charge Sets", Resource, K::ChargeSetList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("efficiency", "Efficiency", Resource, K::Float)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("email", "Email", Resource, K::Text).inheritable(),
    AttributeSpec::new("flags", "Flags", Resource, K::FlagList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("limits", "Limits", Resource, K::Limits)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("managers", "Managers", Resource, K::ResourceList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("rate", "Rate", Resource, K::Float)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("shifts", "Shifts", Resource, K::ShiftAssignments)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("vacation", "Vacations", Resource, K::IntervalList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("workinghours", "Working Hours", Resource, K::WorkingHours)
        .inheritable()
        .scenario_specific(),
    // Accounts
    AttributeSpec::new("aggregate", "Aggregate", Account, K::Symbol).inheritable(),
    AttributeSpec::new("credits", "Credits", Account, K::ChargeList).scenario_specific(),
    AttributeSpec::new("flags", "Flags", Account, K::FlagList).inheritable(),
    // Shifts
    AttributeSpec::new("replace", "Replace", Shift, K::Boolean).scenario_specific(),
    AttributeSpec::new("timezone", "Time Zone", Shift, K::Text).inheritable(),
    AttributeSpec::new("vacation", "Vacations", Shift, K::IntervalList)
        .inheritable()
        .scenario_specific(),
    AttributeSpec::new("workinghours", "Working Hours", Shift, K::WorkingHours)
        .inheritable()
        .scenario_specific(),
    // Reports
    AttributeSpec::new("caption", "Caption", Report, K::RichText).inheritable(),
    AttributeSpec::new("columns", "Columns", Report, K::ColumnList).inheritable(),
    AttributeSpec::new("currencyformat", "Currency Format", Report, K::RealFormat).inheritable(),
    AttributeSpec::new("formats", "Formats", Report, K::FormatList).inheritable(),
    AttributeSpec::new("headline", "Headline", Report, K::RichText).inheritable(),
    AttributeSpec::new("hideresource", "Hide Resource", Report, K::LogicalExpression)
        .inheritable(),
    AttributeSpec::new("hidetask", "Hide Task", Report, K::LogicalExpression).inheritable(),
    AttributeSpec::new("interval", "Interval", Report, K::IntervalList).inheritable(),
    AttributeSpec::new("loadunit", "Load Unit", Report, K::Symbol).inheritable(),
    AttributeSpec::new("numberformat", "Number Format", Report, K::RealFormat).inheritable(),
    AttributeSpec::new("resourceroot", "Resource Root", Report, K::Property).inheritable(),
    AttributeSpec::new("scenarios", "Scenarios", Report, K::ScenarioList).inheritable(),
    AttributeSpec::new("sortresources", "Sort Resources", Report, K::SortList).inheritable(),
    AttributeSpec::new("sorttasks", "Sort Tasks", Report, K::SortList).inheritable(),
    AttributeSpec::new("taskroot", "Task Root", Report, K::Property).inheritable(),
];

/// Look up a built-in attribute spec by class and keyword.
pub fn get_spec(class: PropertyKind, id: &str) -> Option<&'static AttributeSpec> {
    BUILTIN_ATTRIBUTES
        .iter()
        .find(|spec| spec.class == class && spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_a_unique_non_empty_tag() {
        let tags: HashSet<_> = AttributeKind::ALL.iter().map(|k| k.type_tag()).collect();
        assert_eq!(tags.len(), AttributeKind::ALL.len());
        assert!(tags.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn from_tag_inverts_type_tag() {
        for kind in AttributeKind::ALL {
            assert_eq!(AttributeKind::from_tag(kind.type_tag()), Some(kind));
        }
        assert_eq!(AttributeKind::from_tag("nonexistent"), None);
    }

    #[test]
    fn parse_unknown_tag_fails() {
        let err = "colour".parse::<AttributeKind>().unwrap_err();
        assert!(matches!(err, AttrError::UnknownTypeTag(tag) if tag == "colour"));
        assert_eq!("tasklist".parse::<AttributeKind>().unwrap(), AttributeKind::TaskList);
    }

    #[test]
    fn default_value_matches_kind() {
        for kind in AttributeKind::ALL {
            let value = kind.default_value();
            assert_eq!(value.kind(), kind);
            assert_eq!(value.element_count().is_some(), kind.is_list());
        }
    }

    #[test]
    fn list_defaults_are_empty() {
        for kind in AttributeKind::ALL.into_iter().filter(|k| k.is_list()) {
            assert_eq!(kind.default_value().element_count(), Some(0));
        }
    }

    #[test]
    fn builtin_registry_has_expected_entries() {
        assert!(get_spec(PropertyKind::Task, "milestone").is_some());
        assert!(get_spec(PropertyKind::Task, "allocate").is_some());
        assert!(get_spec(PropertyKind::Resource, "workinghours").is_some());
        assert!(get_spec(PropertyKind::Report, "sorttasks").is_some());
        assert!(get_spec(PropertyKind::Account, "milestone").is_none());
    }

    #[test]
    fn builtin_keywords_are_unique_per_class() {
        let mut seen = HashSet::new();
        for spec in BUILTIN_ATTRIBUTES {
            assert!(
                seen.insert((spec.class, spec.id.clone())),
                "duplicate {} {}",
                spec.class,
                spec.id
            );
        }
    }

    #[test]
    fn flags_spec_is_correct() {
        let spec = get_spec(PropertyKind::Task, "flags").unwrap();
        assert_eq!(spec.kind, AttributeKind::FlagList);
        assert!(spec.inheritable);
        assert!(spec.scenario_specific);
        assert_eq!(spec.name, "Flags");
    }

    #[test]
    fn note_spec_is_not_scenario_specific() {
        let spec = get_spec(PropertyKind::Task, "note").unwrap();
        assert_eq!(spec.kind, AttributeKind::RichText);
        assert!(!spec.scenario_specific);
        assert!(!spec.inheritable);
    }
}
