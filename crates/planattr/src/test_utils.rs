use crate::model::{PropertyId, PropertyKind, PropertyTree};

/// A small project: two nested tasks, two resources and an account.
pub struct SampleProject {
    pub tree: PropertyTree,
    /// Task `prj`
    pub prj: PropertyId,
    /// Task `prj.spec`
    pub spec: PropertyId,
    pub dev1: PropertyId,
    pub dev2: PropertyId,
    /// Account `dev`
    pub acc: PropertyId,
}

impl Default for SampleProject {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleProject {
    pub fn new() -> Self {
        let mut tree = PropertyTree::default();
        let prj = tree
            .add_node(PropertyKind::Task, "prj", "Project", None)
            .expect("failed to add task");
        let spec = tree
            .add_node(PropertyKind::Task, "spec", "Specification", Some(prj))
            .expect("failed to add task");
        let dev1 = tree
            .add_node(PropertyKind::Resource, "dev1", "Developer 1", None)
            .expect("failed to add resource");
        let dev2 = tree
            .add_node(PropertyKind::Resource, "dev2", "Developer 2", None)
            .expect("failed to add resource");
        let acc = tree
            .add_node(PropertyKind::Account, "dev", "Development", None)
            .expect("failed to add account");
        Self {
            tree,
            prj,
            spec,
            dev1,
            dev2,
            acc,
        }
    }
}
