//! Declared-type model for apidoc.
//!
//! Source extraction happens outside apidoc. Extractors emit a JSON document
//! listing every class, interface and exception with its namespace, package,
//! parent, declaring file and documentation; [`Model::load`] reads it into
//! read-only [`TypeEntity`] values for the site compiler.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use apidoc_model::{Model, TypeKind};
//!
//! let json = r#"{"types": [{"name": "App\\Error", "is_exception": true}]}"#;
//! let model = Model::from_json(json, Path::new(".")).unwrap();
//! let ty = model.get("App\\Error").unwrap();
//! assert_eq!(ty.kind, TypeKind::Exception);
//! assert_eq!(ty.namespace, "App");
//! ```

mod entity;
mod model;
mod record;

pub use entity::{Member, MemberKind, NAMESPACE_SEPARATOR, TypeEntity, TypeKind, split_name};
pub use model::{Model, ModelError, relative_path};
