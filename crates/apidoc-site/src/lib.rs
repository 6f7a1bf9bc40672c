//! Static API reference site compiler.
//!
//! Turns a [`apidoc_model::Model`] into cross-linked HTML pages:
//!
//! - [`SiteIndex`] groups types by namespace and package in a stable order.
//! - [`LinkResolver`] derives every output path from configured filename
//!   patterns.
//! - [`wipe_out_target`] removes what a previous run generated.
//! - [`Generator`] renders resources, common pages, namespace, package, type
//!   and source pages through a [`TemplateEngine`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use apidoc_config::Config;
//! use apidoc_model::Model;
//! use apidoc_site::{
//!     Generator, Highlighter, JinjaEngine, LinkResolver, PlainHighlighter, ProgressTracker,
//! };
//!
//! let config = Config::load(None, None)?;
//! let model = Arc::new(Model::load(Path::new("model.json"))?);
//! let links = Arc::new(LinkResolver::from_config(&config, model.root()));
//! let highlighter: Arc<dyn Highlighter> = Arc::new(PlainHighlighter::default());
//! let output = Path::new("api");
//! let engine = JinjaEngine::new(
//!     config.base_dir(),
//!     output,
//!     Arc::clone(&links),
//!     Arc::clone(&model),
//!     Arc::clone(&highlighter),
//! );
//!
//! let stats = Generator::new(&model, &config, &links, &engine, highlighter.as_ref())
//!     .generate(output, &mut ProgressTracker::disabled())?;
//! assert!(stats.pages() > 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod context;
mod docblock;
mod generator;
mod highlight;
mod index;
mod links;
mod progress;
mod template;
mod wipe;

pub use context::{ClassView, MemberView, PageContext, Partition, TypeView};
pub use docblock::{to_html, to_inline_html};
pub use generator::{GenerateError, GenerateStats, GeneratedFiles, Generator, VERSION};
pub use highlight::{Highlighter, PlainHighlighter, escape_html};
pub use index::{InheritanceCycle, NamespaceGroup, PackageGroup, SiteIndex, cmp_ignore_case};
pub use links::{EMPTY_NAME_TOKEN, LinkError, LinkResolver, sanitize};
pub use progress::{ProgressSink, ProgressTracker};
pub use template::{JinjaEngine, TemplateEngine, TemplateError, doclabel, replace_ns};
pub use wipe::wipe_out_target;
