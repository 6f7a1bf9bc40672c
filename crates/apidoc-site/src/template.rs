//! Template rendering.
//!
//! [`TemplateEngine`] is the seam between the generator and the markup
//! language. [`JinjaEngine`] is the default implementation: minijinja with a
//! file loader and the link, documentation and highlighting helpers
//! registered as filters.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use apidoc_model::{Model, NAMESPACE_SEPARATOR};
use minijinja::value::Value;
use minijinja::{Environment, ErrorKind};
use sha2::{Digest, Sha256};

use crate::context::PageContext;
use crate::docblock;
use crate::highlight::{Highlighter, escape_html};
use crate::links::{LinkError, LinkResolver};

/// Error returned when a template cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Jinja(#[from] minijinja::Error),
}

/// Renders one page from a template and a context.
pub trait TemplateEngine {
    /// Render `template` with `context` and return the page text.
    fn render(&self, template: &Path, context: &PageContext<'_>) -> Result<String, TemplateError>;
}

/// Strip `namespace` from `name` when the name sits directly inside it.
#[must_use]
pub fn replace_ns(name: &str, namespace: &str) -> String {
    let name = name.trim_start_matches(NAMESPACE_SEPARATOR);
    if namespace.is_empty() {
        return name.to_owned();
    }
    match name
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
    {
        Some(short) if !short.is_empty() && !short.contains(NAMESPACE_SEPARATOR) => {
            short.to_owned()
        }
        _ => name.to_owned(),
    }
}

/// Render a `"Type1|Type2 label"` annotation with linked types.
pub fn doclabel(
    doc: &str,
    namespace: &str,
    model: &Model,
    links: &LinkResolver,
) -> Result<String, LinkError> {
    let doc = doc.trim();
    let (names, label) = doc
        .split_once(char::is_whitespace)
        .map_or((doc, ""), |(names, label)| (names, label.trim_start()));

    let mut parts = Vec::new();
    for name in names.split('|') {
        let display = escape_html(&replace_ns(name, namespace));
        match model.resolve_type(name, namespace) {
            Some(ty) => parts.push(format!("<a href=\"{}\">{display}</a>", links.type_link(ty)?)),
            None => parts.push(display),
        }
    }

    let mut html = parts.join("|");
    if !label.is_empty() {
        html.push(' ');
        html.push_str(&escape_html(label));
    }
    Ok(html)
}

fn link_error(err: &LinkError) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string())
}

/// Short content hash used to bust caches of static files.
fn file_hash(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());
    Some(digest[..8].to_owned())
}

/// minijinja-backed engine.
pub struct JinjaEngine {
    env: Environment<'static>,
}

impl JinjaEngine {
    /// Create an engine.
    ///
    /// Relative template names resolve against `template_root`. The
    /// `static_file` function hashes files under `output_dir`.
    #[must_use]
    pub fn new(
        template_root: &Path,
        output_dir: &Path,
        links: Arc<LinkResolver>,
        model: Arc<Model>,
        highlighter: Arc<dyn Highlighter>,
    ) -> Self {
        let mut env = Environment::new();

        let root = template_root.to_path_buf();
        env.set_loader(move |name| {
            let path = root.join(name);
            match std::fs::read_to_string(&path) {
                Ok(source) => Ok(Some(source)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("failed to read template {}", path.display()),
                )
                .with_source(e)),
            }
        });

        let resolver = Arc::clone(&links);
        env.add_filter("namespace_link", move |name: String| {
            resolver.namespace_link(&name).map_err(|e| link_error(&e))
        });

        let resolver = Arc::clone(&links);
        env.add_filter("package_link", move |name: String| {
            resolver.package_link(&name).map_err(|e| link_error(&e))
        });

        let resolver = Arc::clone(&links);
        env.add_filter("class_link", move |value: Value| {
            if let Some(name) = value.as_str() {
                return resolver.class_link(name).map_err(|e| link_error(&e));
            }
            let link = value.get_attr("link")?;
            link.as_str().map(str::to_owned).ok_or_else(|| {
                minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    "class_link expects a name or a value with a link",
                )
            })
        });

        let samples = Arc::clone(&highlighter);
        env.add_filter("docblock", move |text: Option<String>| {
            Value::from_safe_string(docblock::to_html(&text.unwrap_or_default(), samples.as_ref()))
        });
        let samples = Arc::clone(&highlighter);
        env.add_filter("docline", move |text: Option<String>| {
            Value::from_safe_string(docblock::to_inline_html(
                &text.unwrap_or_default(),
                samples.as_ref(),
            ))
        });

        env.add_filter("doclabel", move |doc: String, namespace: Option<String>| {
            doclabel(&doc, &namespace.unwrap_or_default(), &model, &links)
                .map(Value::from_safe_string)
                .map_err(|e| link_error(&e))
        });

        env.add_filter("replace_ns", |name: String, namespace: Option<String>| {
            replace_ns(&name, &namespace.unwrap_or_default())
        });

        env.add_filter("highlight", move |code: String| {
            Value::from_safe_string(highlighter.highlight(&code))
        });

        let output = output_dir.to_path_buf();
        let hashes: Mutex<HashMap<String, String>> = Mutex::new(HashMap::new());
        env.add_function("static_file", move |name: String| -> String {
            let Ok(mut hashes) = hashes.lock() else {
                return name;
            };
            hashes
                .entry(name.clone())
                .or_insert_with(|| match file_hash(&output.join(&name)) {
                    Some(hash) => format!("{name}?{hash}"),
                    None => name.clone(),
                })
                .clone()
        });

        Self { env }
    }

    fn template_name(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }
}

impl TemplateEngine for JinjaEngine {
    fn render(&self, template: &Path, context: &PageContext<'_>) -> Result<String, TemplateError> {
        let name = Self::template_name(template);
        let template = self.env.get_template(&name)?;
        Ok(template.render(context)?)
    }
}

impl std::fmt::Debug for JinjaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaEngine").finish_non_exhaustive()
    }
}
