//! # Attribute System
//!
//! Property nodes carry typed attributes. Rather than handling each attribute
//! ad-hoc, the attribute system provides:
//!
//! - **Kinds**: [`AttributeKind`], the closed set of value kinds and their type tags
//! - **Values**: [`AttrValue`], one variant per kind
//! - **Specifications**: [`AttributeSpec`], the keyword, class and kind an attribute
//!   is declared with, plus the [`BUILTIN_ATTRIBUTES`] registry
//! - **Rendering**: display and source forms, with [`SourceForm`] making the
//!   unsupported and placeholder cases explicit
//!
//! ## Attribute Kinds
//!
//! | Shape | Kinds |
//! |-------|-------|
//! | Scalar | `boolean`, `duration`, `integer`, `float`, `date`, `text`, `richtext`, `symbol`, `logicalexpression` |
//! | Reference | `account`, `property`, `reference` |
//! | List | `allocation`, `bookinglist`, `charge`, `chargeset`, `columns`, `dependencylist`, `flaglist`, `formatlist`, `intervallist`, `resourcelist`, `scenarios`, `sorting`, `tasklist` |
//! | Structured | `limits`, `shifts`, `workinghours`, `realformat` |
//!
//! ## Usage
//!
//! ```ignore
//! let mut tree = PropertyTree::default();
//! let task = tree.add_node(PropertyKind::Task, "spec", "Specification", None)?;
//!
//! tree.assign(task, "milestone", AttrValue::Boolean(true))?;
//! assert_eq!(
//!     tree.source_form(task, "milestone")?,
//!     SourceForm::Done("milestone yes".into())
//! );
//! ```

mod attribute;
mod limits;
mod records;
mod render;
mod spec;
mod value;
mod working_hours;

pub use attribute::Attribute;
pub use limits::{Limit, LimitKind, Limits, ProjectBinding, ShiftAssignment, ShiftAssignments};
pub use records::{
    Allocation, Booking, Charge, ChargeMode, ChargeSet, Interval, RealFormat, SelectionMode,
    SortKey, TaskDependency,
};
pub use render::{SourceForm, MISSING_SOURCE};
pub use spec::{get_spec, AttributeKind, AttributeSpec, SpecId, BUILTIN_ATTRIBUTES};
pub use value::AttrValue;
pub use working_hours::{WorkingHours, DAY_NAMES};
