//! # Property Tree
//!
//! The property tree is the owner of all attributes. It is an arena: nodes live
//! in a `Vec` and refer to each other (and are referred to by attribute values)
//! through [`PropertyId`] handles. Nothing in an attribute owns a node, so there
//! are no reference cycles between nodes and their attributes.
//!
//! ## Identifiers
//!
//! Each node has a local `id`. Its *full id* depends on the namespace of its kind:
//!
//! - **Hierarchical** (tasks, reports): ancestor ids joined with `.`, e.g. `prj.spec`.
//! - **Flat** (resources, accounts, shifts): the local id, since ids are unique
//!   across the whole tree for these kinds.
//!
//! ## Attributes
//!
//! [`PropertyTree::declare`] creates an attribute from the [`AttributeSpec`]
//! registered for the node's kind. [`PropertyTree::assign`] then accumulates into
//! list-shaped values or replaces scalar ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{
    AttrValue, Attribute, AttributeKind, AttributeSpec, SourceForm, SpecId, BUILTIN_ATTRIBUTES,
};
use crate::config::{ProjectConfig, ProjectContext};
use crate::error::{AttrError, Result};

/// Handle to a node in a [`PropertyTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub usize);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Task,
    Resource,
    Account,
    Shift,
    Report,
}

impl PropertyKind {
    /// Keyword introducing this kind of property in the description language.
    pub fn keyword(&self) -> &'static str {
        match self {
            PropertyKind::Task => "task",
            PropertyKind::Resource => "resource",
            PropertyKind::Account => "account",
            PropertyKind::Shift => "shift",
            PropertyKind::Report => "report",
        }
    }

    /// Whether ids of this kind are unique tree-wide.
    pub fn has_flat_namespace(&self) -> bool {
        matches!(
            self,
            PropertyKind::Resource | PropertyKind::Account | PropertyKind::Shift
        )
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone)]
pub struct PropertyNode {
    pub id: String,
    pub name: String,
    pub kind: PropertyKind,
    pub parent: Option<PropertyId>,
    attributes: Vec<(String, Attribute)>,
}

impl PropertyNode {
    /// Attributes in declaration order, keyed by keyword.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, a)| (k.as_str(), a))
    }

    pub fn attribute(&self, keyword: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, a)| a)
    }

    fn attribute_mut(&mut self, keyword: &str) -> Option<&mut Attribute> {
        self.attributes
            .iter_mut()
            .find(|(k, _)| k == keyword)
            .map(|(_, a)| a)
    }
}

/// What renderers need to resolve the handles stored in attribute values.
///
/// Unresolvable handles are not errors; renderers show them as empty text.
pub trait PropertyLookup {
    /// Local id of a node.
    fn node_id(&self, id: PropertyId) -> Option<&str>;

    /// Namespace-qualified id of a node.
    fn full_id(&self, id: PropertyId) -> Option<String>;

    /// The type descriptor an attribute was declared with.
    fn spec(&self, id: SpecId) -> Option<&AttributeSpec>;

    /// strftime format for dates in display forms.
    fn time_format(&self) -> &str;
}

/// Arena of property nodes plus the attribute registry they are declared against.
#[derive(Debug, Clone)]
pub struct PropertyTree {
    nodes: Vec<PropertyNode>,
    specs: Vec<AttributeSpec>,
    project: ProjectContext,
}

impl Default for PropertyTree {
    fn default() -> Self {
        Self::new(ProjectContext::default())
    }
}

impl PropertyTree {
    /// Create an empty tree with the built-in attribute registry.
    pub fn new(project: ProjectContext) -> Self {
        Self {
            nodes: Vec::new(),
            specs: BUILTIN_ATTRIBUTES.to_vec(),
            project,
        }
    }

    pub fn project(&self) -> &ProjectConfig {
        self.project.config()
    }

    /// Register a user-defined attribute.
    pub fn register_spec(&mut self, spec: AttributeSpec) -> Result<SpecId> {
        if self.find_spec(spec.class, &spec.id).is_some() {
            return Err(AttrError::DuplicateAttribute {
                keyword: spec.id.into_owned(),
                class: spec.class.keyword(),
            });
        }
        self.specs.push(spec);
        Ok(SpecId(self.specs.len() - 1))
    }

    pub fn find_spec(&self, class: PropertyKind, keyword: &str) -> Option<SpecId> {
        self.specs
            .iter()
            .position(|s| s.class == class && s.id == keyword)
            .map(SpecId)
    }

    /// Add a node. The parent, if any, must already be in the tree.
    pub fn add_node(
        &mut self,
        kind: PropertyKind,
        id: impl Into<String>,
        name: impl Into<String>,
        parent: Option<PropertyId>,
    ) -> Result<PropertyId> {
        if let Some(parent) = parent {
            self.node_checked(parent)?;
        }
        self.nodes.push(PropertyNode {
            id: id.into(),
            name: name.into(),
            kind,
            parent,
            attributes: Vec::new(),
        });
        Ok(PropertyId(self.nodes.len() - 1))
    }

    pub fn node(&self, id: PropertyId) -> Option<&PropertyNode> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: PropertyId) -> impl Iterator<Item = PropertyId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.parent == Some(id))
            .map(|(i, _)| PropertyId(i))
    }

    fn node_checked(&self, id: PropertyId) -> Result<&PropertyNode> {
        self.nodes.get(id.0).ok_or(AttrError::UnknownProperty(id))
    }

    /// Declare an attribute on a node.
    ///
    /// The value starts out as the kind's default. Declaring an attribute twice
    /// returns the existing one untouched.
    pub fn declare(&mut self, node: PropertyId, keyword: &str) -> Result<&mut Attribute> {
        let class = self.node_checked(node)?.kind;
        let spec_id =
            self.find_spec(class, keyword)
                .ok_or_else(|| AttrError::UnknownAttribute {
                    keyword: keyword.to_string(),
                    class: class.keyword(),
                })?;
        let kind = self.specs[spec_id.0].kind;
        let handle = self.project.handle();

        let entry = &mut self.nodes[node.0];
        if entry.attribute(keyword).is_none() {
            tracing::debug!(
                node = %node,
                keyword,
                tag = kind.type_tag(),
                "declared attribute"
            );
            let mut attribute = Attribute::new(spec_id, kind, node);
            attribute.bind_project(&handle);
            entry.attributes.push((keyword.to_string(), attribute));
        }
        entry
            .attribute_mut(keyword)
            .ok_or_else(|| AttrError::NotDeclared(keyword.to_string()))
    }

    /// Assign a value, declaring the attribute first if needed.
    ///
    /// List-shaped attributes accumulate, everything else is replaced.
    pub fn assign(&mut self, node: PropertyId, keyword: &str, value: AttrValue) -> Result<()> {
        let handle = self.project.handle();
        let attribute = self.declare(node, keyword)?;
        attribute.assign(value)?;
        attribute.bind_project(&handle);
        Ok(())
    }

    pub fn attribute(&self, node: PropertyId, keyword: &str) -> Option<&Attribute> {
        self.node(node)?.attribute(keyword)
    }

    fn declared(&self, node: PropertyId, keyword: &str) -> Result<&Attribute> {
        self.node_checked(node)?
            .attribute(keyword)
            .ok_or_else(|| AttrError::NotDeclared(keyword.to_string()))
    }

    pub fn display_form(&self, node: PropertyId, keyword: &str) -> Result<String> {
        Ok(self.declared(node, keyword)?.display_form(self))
    }

    pub fn source_form(&self, node: PropertyId, keyword: &str) -> Result<SourceForm> {
        Ok(self.declared(node, keyword)?.source_form(self))
    }

    /// Replace the project context and rebind every attribute that keeps a link to it.
    pub fn bind_project(&mut self, project: ProjectContext) {
        self.project = project;
        let handle = self.project.handle();
        let mut bound = 0usize;
        for node in &mut self.nodes {
            for (_, attribute) in &mut node.attributes {
                if attribute.kind().needs_project() {
                    attribute.bind_project(&handle);
                    bound += 1;
                }
            }
        }
        tracing::debug!(bound, "bound project to attributes");
    }

    /// Dump a node's attribute values as a JSON object keyed by keyword.
    pub fn attributes_json(&self, node: PropertyId) -> Result<serde_json::Value> {
        let mut map = serde_json::Map::new();
        for (keyword, attribute) in self.node_checked(node)?.attributes() {
            map.insert(keyword.to_string(), serde_json::to_value(attribute.value())?);
        }
        Ok(serde_json::Value::Object(map))
    }

    /// Kinds of every declared attribute on a node, in declaration order.
    pub fn declared_kinds(&self, node: PropertyId) -> Vec<AttributeKind> {
        self.node(node)
            .map(|n| n.attributes().map(|(_, a)| a.kind()).collect())
            .unwrap_or_default()
    }
}

impl PropertyLookup for PropertyTree {
    fn node_id(&self, id: PropertyId) -> Option<&str> {
        self.node(id).map(|n| n.id.as_str())
    }

    fn full_id(&self, id: PropertyId) -> Option<String> {
        let node = self.node(id)?;
        if node.kind.has_flat_namespace() {
            return Some(node.id.clone());
        }
        let mut parts = vec![node.id.as_str()];
        let mut current = node.parent;
        while let Some(parent) = current {
            let parent_node = self.node(parent)?;
            parts.push(parent_node.id.as_str());
            current = parent_node.parent;
        }
        parts.reverse();
        Some(parts.join("."))
    }

    fn spec(&self, id: SpecId) -> Option<&AttributeSpec> {
        self.specs.get(id.0)
    }

    fn time_format(&self) -> &str {
        &self.project.config().time_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_tasks() -> (PropertyTree, PropertyId, PropertyId) {
        let mut tree = PropertyTree::default();
        let prj = tree
            .add_node(PropertyKind::Task, "prj", "Project", None)
            .unwrap();
        let spec = tree
            .add_node(PropertyKind::Task, "spec", "Specification", Some(prj))
            .unwrap();
        (tree, prj, spec)
    }

    #[test]
    fn full_id_joins_task_ancestors() {
        let (tree, prj, spec) = tree_with_tasks();
        assert_eq!(tree.full_id(prj).as_deref(), Some("prj"));
        assert_eq!(tree.full_id(spec).as_deref(), Some("prj.spec"));
    }

    #[test]
    fn full_id_is_flat_for_resources() {
        let mut tree = PropertyTree::default();
        let team = tree
            .add_node(PropertyKind::Resource, "team", "Team", None)
            .unwrap();
        let dev = tree
            .add_node(PropertyKind::Resource, "dev1", "Developer", Some(team))
            .unwrap();
        assert_eq!(tree.full_id(dev).as_deref(), Some("dev1"));
    }

    #[test]
    fn add_node_rejects_unknown_parent() {
        let mut tree = PropertyTree::default();
        let result = tree.add_node(PropertyKind::Task, "t", "T", Some(PropertyId(7)));
        assert!(matches!(result, Err(AttrError::UnknownProperty(PropertyId(7)))));
    }

    #[test]
    fn children_lists_direct_children_only() {
        let (mut tree, prj, spec) = tree_with_tasks();
        let leaf = tree
            .add_node(PropertyKind::Task, "leaf", "Leaf", Some(spec))
            .unwrap();
        assert_eq!(tree.children(prj).collect::<Vec<_>>(), vec![spec]);
        assert_eq!(tree.children(spec).collect::<Vec<_>>(), vec![leaf]);
    }

    #[test]
    fn declare_uses_kind_default() {
        let (mut tree, _, spec) = tree_with_tasks();
        let attr = tree.declare(spec, "milestone").unwrap();
        assert_eq!(attr.value(), &AttrValue::Boolean(false));
        assert_eq!(attr.type_tag(), "boolean");
    }

    #[test]
    fn declare_is_idempotent() {
        let (mut tree, _, spec) = tree_with_tasks();
        tree.assign(spec, "flags", AttrValue::FlagList(vec!["a".into()]))
            .unwrap();
        tree.declare(spec, "flags").unwrap();
        assert_eq!(tree.display_form(spec, "flags").unwrap(), "a");
        assert_eq!(tree.declared_kinds(spec), vec![AttributeKind::FlagList]);
    }

    #[test]
    fn declare_rejects_attribute_of_other_class() {
        let mut tree = PropertyTree::default();
        let acc = tree
            .add_node(PropertyKind::Account, "acc", "Account", None)
            .unwrap();
        let result = tree.declare(acc, "milestone");
        assert!(matches!(result, Err(AttrError::UnknownAttribute { .. })));
    }

    #[test]
    fn assign_accumulates_lists() {
        let (mut tree, _, spec) = tree_with_tasks();
        tree.assign(spec, "flags", AttrValue::FlagList(vec!["a".into()]))
            .unwrap();
        tree.assign(spec, "flags", AttrValue::FlagList(vec!["b".into()]))
            .unwrap();
        assert_eq!(tree.display_form(spec, "flags").unwrap(), "a, b");
    }

    #[test]
    fn assign_replaces_scalars() {
        let (mut tree, _, spec) = tree_with_tasks();
        tree.assign(spec, "priority", AttrValue::Integer(500)).unwrap();
        tree.assign(spec, "priority", AttrValue::Integer(800)).unwrap();
        assert_eq!(tree.display_form(spec, "priority").unwrap(), "800");
    }

    #[test]
    fn assign_rejects_other_kind() {
        let (mut tree, _, spec) = tree_with_tasks();
        let result = tree.assign(spec, "milestone", AttrValue::Integer(1));
        assert!(matches!(
            result,
            Err(AttrError::TypeMismatch {
                expected: "boolean",
                found: "integer"
            })
        ));
    }

    #[test]
    fn undeclared_attribute_is_reported() {
        let (tree, _, spec) = tree_with_tasks();
        assert!(matches!(
            tree.display_form(spec, "milestone"),
            Err(AttrError::NotDeclared(_))
        ));
    }

    #[test]
    fn register_spec_rejects_duplicates() {
        let mut tree = PropertyTree::default();
        let dup = AttributeSpec::new("milestone", "Milestone", PropertyKind::Task, AttributeKind::Boolean);
        assert!(matches!(
            tree.register_spec(dup),
            Err(AttrError::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn custom_attribute_can_be_declared() {
        let (mut tree, _, spec) = tree_with_tasks();
        tree.register_spec(AttributeSpec::custom(
            "Phase",
            "Phase",
            PropertyKind::Task,
            AttributeKind::Text,
        ))
        .unwrap();
        tree.assign(spec, "Phase", AttrValue::Text("design".into()))
            .unwrap();
        assert_eq!(
            tree.source_form(spec, "Phase").unwrap(),
            SourceForm::Done("Phase \"design\"".into())
        );
    }

    #[test]
    fn attributes_json_is_keyed_by_keyword() {
        let (mut tree, _, spec) = tree_with_tasks();
        tree.assign(spec, "milestone", AttrValue::Boolean(true)).unwrap();
        let json = tree.attributes_json(spec).unwrap();
        assert_eq!(json["milestone"]["Boolean"], serde_json::json!(true));
    }
}
