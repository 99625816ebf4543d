//! # schemaker
//!
//! Generates form schema nodes from relational column metadata.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `schemaker` to get everything, or on the individual
//! crates for finer-grained control.
//!
//! ```
//! use schemaker::forms::options::{keys, Options};
//! use schemaker::prelude::*;
//!
//! let transformer = ColumnSchemaTransformer::new();
//! let email = ColumnDescriptor::new("email", SqlType::Unicode)
//!     .length(120)
//!     .not_null()
//!     .info(keys::INPUT_TYPE, "email");
//!
//! let node = transformer
//!     .transform(&email, &Options::new().with(keys::TITLE, "E-mail"))
//!     .unwrap();
//! assert_eq!(node.title, "E-mail");
//! assert!(node.deserialize(None).is_err());
//! ```
//!
//! ## Startup
//!
//! The library only emits `tracing` events. A host that wants them printed
//! loads its settings, installs the subscriber and then publishes the
//! settings so transformers pick up the configured sizing rule:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use schemaker::core::{settings_loader, SETTINGS};
//! use schemaker::prelude::*;
//!
//! fn main() -> SchemakerResult<()> {
//!     let settings = settings_loader::load(Some(Path::new("schemaker.toml")))?;
//!     setup_logging(&settings);
//!     SETTINGS.install(settings)?;
//!
//!     let nodes = ColumnSchemaTransformer::new().transform_all(
//!         "Contact",
//!         &[ColumnDescriptor::new("email", SqlType::Unicode).length(120)],
//!         &Default::default(),
//!     )?;
//!     tracing::info!(fields = nodes.len(), "schema ready");
//!     Ok(())
//! }
//! ```

/// Core types, settings, logging, and error types.
pub use schemaker_core as core;

/// Column-to-schema transformation, validators, widgets and error reports.
pub use schemaker_forms as forms;

// Third-party re-exports
pub use chrono;
pub use rust_decimal;
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// Commonly used types.
pub mod prelude {
    pub use schemaker_core::logging::setup_logging;
    pub use schemaker_core::{Invalid, SchemakerError, SchemakerResult, Settings, Value};
    pub use schemaker_forms::column::{ColumnDescriptor, SqlType};
    pub use schemaker_forms::helpers::{lengthen, Lengthen};
    pub use schemaker_forms::report::ErrorReport;
    pub use schemaker_forms::schema::{MissingPolicy, SchemaNode, SchemaType};
    pub use schemaker_forms::transformer::ColumnSchemaTransformer;
    pub use schemaker_forms::validators::{BindContext, Validator};
    pub use schemaker_forms::widgets::Widget;
}
