//! # schemaker-forms
//!
//! Builds form schema nodes from relational column metadata.
//!
//! ## Modules
//!
//! - [`column`] - Column metadata handed over by the ORM layer
//! - [`options`] - Per-column and call-time schema options
//! - [`transformer`] - [`ColumnSchemaTransformer`], the column-to-node mapping
//! - [`schema`] - Schema types, schema nodes, and input deserialization
//! - [`validators`] - Validation rules, including deferred ones
//! - [`widgets`] - Widget descriptors
//! - [`helpers`] - The `lengthen` sizing helper
//! - [`report`] - Flat error reports for validation failures

pub mod column;
pub mod helpers;
pub mod options;
pub mod report;
pub mod schema;
pub mod transformer;
pub mod validators;
pub mod widgets;

pub use column::{ColumnDescriptor, SqlType};
pub use helpers::{lengthen, Lengthen};
pub use options::Options;
pub use report::ErrorReport;
pub use schema::{MissingPolicy, SchemaNode, SchemaType};
pub use transformer::ColumnSchemaTransformer;
pub use validators::{BindContext, Validator};
pub use widgets::Widget;
