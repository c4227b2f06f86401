//! # planattr
//!
//! Typed attribute values for the property tree of a project-planning model.
//!
//! Tasks, resources, accounts, shifts and reports are [`model::PropertyNode`]s.
//! Each node owns a set of [`attributes::Attribute`]s, and every attribute holds
//! exactly one [`attributes::AttrValue`] of a fixed kind (boolean, duration,
//! resource list, working hours, ...).
//!
//! Every value can be rendered two ways:
//!
//! - **Display form**: a best-effort, human readable summary used by reports.
//! - **Source form**: text in the project description language that, when parsed
//!   again, yields an equivalent value. Some kinds cannot be rendered this way;
//!   the [`attributes::SourceForm`] result says so explicitly.
//!
//! ## Modules
//!
//! - [`attributes`]: the value family, its registry of type tags and renderers
//! - [`model`]: the property tree the attributes hang off
//! - [`config`]: project-wide settings shared with bound attribute values
//! - [`error`]: the crate error type

pub mod attributes;
pub mod config;
pub mod error;
pub mod model;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use attributes::{AttrValue, Attribute, AttributeKind, SourceForm};
pub use error::{AttrError, Result};
pub use model::{PropertyId, PropertyKind, PropertyTree};
