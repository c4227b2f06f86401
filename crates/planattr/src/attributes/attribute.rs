//! A typed value attached to a property node.

use std::rc::Weak;

use serde::{Deserialize, Serialize};

use super::render::SourceForm;
use super::spec::{AttributeKind, SpecId};
use super::value::AttrValue;
use crate::config::ProjectConfig;
use crate::error::{AttrError, Result};
use crate::model::{PropertyId, PropertyLookup};

/// An attribute of a property node.
///
/// The attribute refers to its owner and its [`super::AttributeSpec`] by handle
/// only. Its value kind is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    spec: SpecId,
    owner: PropertyId,
    value: AttrValue,
}

impl Attribute {
    /// Create an attribute holding the default value of `kind`.
    pub fn new(spec: SpecId, kind: AttributeKind, owner: PropertyId) -> Self {
        Self {
            spec,
            owner,
            value: kind.default_value(),
        }
    }

    /// Create an attribute of `kind` holding `value`.
    ///
    /// Fails with [`AttrError::TypeMismatch`] when the value is of another kind.
    pub fn with_value(
        spec: SpecId,
        kind: AttributeKind,
        owner: PropertyId,
        value: AttrValue,
    ) -> Result<Self> {
        if value.kind() != kind {
            return Err(AttrError::TypeMismatch {
                expected: kind.type_tag(),
                found: value.kind().type_tag(),
            });
        }
        Ok(Self { spec, owner, value })
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind().type_tag()
    }

    pub fn kind(&self) -> AttributeKind {
        self.value.kind()
    }

    pub fn spec(&self) -> SpecId {
        self.spec
    }

    pub fn owner(&self) -> PropertyId {
        self.owner
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Accumulate into a list value or replace any other value.
    ///
    /// A replaced limits or shifts value keeps the project link of the old one.
    pub fn assign(&mut self, value: AttrValue) -> Result<()> {
        let expected = self.type_tag();
        self.value
            .absorb(value)
            .map_err(|rejected| AttrError::TypeMismatch {
                expected,
                found: rejected.kind().type_tag(),
            })
    }

    /// Forward a project link to values that keep one. Other kinds ignore it.
    pub fn bind_project(&mut self, project: &Weak<ProjectConfig>) {
        match &mut self.value {
            AttrValue::Limits(limits) => limits.bind_project(project),
            AttrValue::ShiftAssignments(shifts) => shifts.bind_project(project),
            _ => {}
        }
    }

    pub fn display_form(&self, lookup: &dyn PropertyLookup) -> String {
        self.value.display_form(lookup)
    }

    /// Source form written with the keyword of the attribute's spec.
    ///
    /// An unresolvable spec renders with an empty keyword.
    pub fn source_form(&self, lookup: &dyn PropertyLookup) -> SourceForm {
        let keyword = lookup.spec(self.spec).map(|s| &*s.id).unwrap_or("");
        tracing::trace!(tag = self.type_tag(), keyword, "rendering source form");
        self.value.source_form(keyword, lookup)
    }

    /// Source text safe to hand to a parser; see [`SourceForm::into_text`].
    pub fn source_text(&self, lookup: &dyn PropertyLookup) -> Result<String> {
        self.source_form(lookup).into_text(self.type_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{LimitKind, Limits, ShiftAssignments};
    use crate::config::ProjectContext;
    use crate::model::{PropertyKind, PropertyTree};

    fn task_tree() -> (PropertyTree, PropertyId) {
        let mut tree = PropertyTree::default();
        let task = tree
            .add_node(PropertyKind::Task, "t1", "Task 1", None)
            .unwrap();
        (tree, task)
    }

    #[test]
    fn new_attribute_holds_default() {
        let attr = Attribute::new(SpecId(0), AttributeKind::ResourceList, PropertyId(0));
        assert_eq!(attr.value(), &AttrValue::ResourceList(vec![]));
        assert_eq!(attr.type_tag(), "resourcelist");
    }

    #[test]
    fn assign_keeps_kind_on_mismatch() {
        let mut attr = Attribute::new(SpecId(0), AttributeKind::Boolean, PropertyId(0));
        let err = attr.assign(AttrValue::Text("yes".into())).unwrap_err();
        assert!(matches!(
            err,
            AttrError::TypeMismatch {
                expected: "boolean",
                found: "text"
            }
        ));
        assert_eq!(attr.kind(), AttributeKind::Boolean);
    }

    #[test]
    fn source_form_uses_spec_keyword() {
        let (mut tree, task) = task_tree();
        tree.assign(task, "length", AttrValue::Duration(5.0)).unwrap();
        let attr = tree.attribute(task, "length").unwrap();
        assert_eq!(attr.source_text(&tree).unwrap(), "length 5h");
    }

    #[test]
    fn unresolvable_spec_renders_empty_keyword() {
        let (tree, task) = task_tree();
        let attr = Attribute::with_value(
            SpecId(10_000),
            AttributeKind::Integer,
            task,
            AttrValue::Integer(3),
        )
        .unwrap();
        assert_eq!(attr.source_form(&tree), SourceForm::Done(" 3".into()));
    }

    #[test]
    fn source_text_rejects_bookings() {
        let (mut tree, task) = task_tree();
        tree.declare(task, "booking").unwrap();
        let attr = tree.attribute(task, "booking").unwrap();
        assert!(matches!(
            attr.source_text(&tree),
            Err(AttrError::SourceUnsupported { tag: "bookinglist" })
        ));
    }

    #[test]
    fn bind_project_reaches_limits() {
        let context = ProjectContext::default();
        let mut attr = Attribute::with_value(
            SpecId(0),
            AttributeKind::Limits,
            PropertyId(0),
            AttrValue::Limits(Limits::new().with(LimitKind::DailyMax, 4.0)),
        )
        .unwrap();
        attr.bind_project(&context.handle());
        match attr.value() {
            AttrValue::Limits(limits) => {
                assert_eq!(limits.slot_limits(), Some(vec![(LimitKind::DailyMax, 4)]))
            }
            other => panic!("Expected Limits, got {:?}", other),
        }
    }

    #[test]
    fn with_value_rejects_value_of_other_kind() {
        let (tree, task) = task_tree();
        let spec = tree.find_spec(PropertyKind::Task, "milestone").unwrap();
        let err = Attribute::with_value(spec, AttributeKind::Boolean, task, AttrValue::Integer(3))
            .unwrap_err();
        assert!(matches!(
            err,
            AttrError::TypeMismatch {
                expected: "boolean",
                found: "integer"
            }
        ));
    }

    #[test]
    fn with_value_accepts_matching_kind() {
        let (tree, task) = task_tree();
        let spec = tree.find_spec(PropertyKind::Task, "milestone").unwrap();
        let attr =
            Attribute::with_value(spec, AttributeKind::Boolean, task, AttrValue::Boolean(true))
                .unwrap();
        assert_eq!(attr.source_text(&tree).unwrap(), "milestone yes");
    }

    #[test]
    fn replacing_limits_keeps_project_link() {
        let context = ProjectContext::default();
        let mut attr = Attribute::new(SpecId(0), AttributeKind::Limits, PropertyId(0));
        attr.bind_project(&context.handle());
        attr.assign(AttrValue::Limits(Limits::new().with(LimitKind::DailyMax, 4.0)))
            .unwrap();
        match attr.value() {
            AttrValue::Limits(limits) => {
                assert!(limits.is_bound());
                assert_eq!(limits.get(LimitKind::DailyMax), Some(4.0));
            }
            other => panic!("Expected Limits, got {:?}", other),
        }
    }

    #[test]
    fn replacing_shifts_keeps_project_link() {
        let context = ProjectContext::default();
        let mut attr = Attribute::new(SpecId(0), AttributeKind::ShiftAssignments, PropertyId(0));
        attr.bind_project(&context.handle());
        attr.assign(AttrValue::ShiftAssignments(ShiftAssignments::new()))
            .unwrap();
        match attr.value() {
            AttrValue::ShiftAssignments(shifts) => assert!(shifts.is_bound()),
            other => panic!("Expected ShiftAssignments, got {:?}", other),
        }
    }

    #[test]
    fn bind_project_ignores_other_kinds() {
        let context = ProjectContext::default();
        let mut attr = Attribute::new(SpecId(0), AttributeKind::Float, PropertyId(0));
        attr.bind_project(&context.handle());
        assert_eq!(attr.value(), &AttrValue::Float(0.0));
    }
}
