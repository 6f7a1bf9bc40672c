//! The queryable collection of declared types.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::entity::{NAMESPACE_SEPARATOR, TypeEntity};
use crate::record::ModelRecord;

/// Error returned when a model cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Model file not found.
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the model file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON.
    #[error("Model parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two types share a fully-qualified name.
    #[error("Duplicate type in model: {0}")]
    DuplicateType(String),
}

/// All declared types of a codebase plus the directory their files live under.
#[derive(Debug)]
pub struct Model {
    root: PathBuf,
    types: Vec<TypeEntity>,
    by_name: HashMap<String, usize>,
}

impl Model {
    /// Build a model from already extracted entities.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DuplicateType` if two entities share a name.
    pub fn new(root: impl Into<PathBuf>, types: Vec<TypeEntity>) -> Result<Self, ModelError> {
        let mut by_name = HashMap::with_capacity(types.len());
        for (idx, ty) in types.iter().enumerate() {
            if by_name.insert(ty.name.clone(), idx).is_some() {
                return Err(ModelError::DuplicateType(ty.name.clone()));
            }
        }
        Ok(Self {
            root: root.into(),
            types,
            by_name,
        })
    }

    /// Load an extractor's JSON output.
    ///
    /// The source root and declaring files are resolved relative to the
    /// directory containing `path`.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_json(&content, base_dir)
    }

    /// Parse extractor JSON with paths relative to `base_dir`.
    pub fn from_json(json: &str, base_dir: &Path) -> Result<Self, ModelError> {
        let record: ModelRecord = serde_json::from_str(json)?;
        let root = record
            .root
            .map_or_else(|| base_dir.to_path_buf(), |r| base_dir.join(r));
        let types: Vec<TypeEntity> = record
            .types
            .into_iter()
            .map(|t| t.into_entity(base_dir))
            .collect();
        tracing::debug!(types = types.len(), root = %root.display(), "Loaded model");
        Self::new(root, types)
    }

    /// Directory that declaring files are reported relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn types(&self) -> &[TypeEntity] {
        &self.types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a type by fully-qualified name. A leading separator is ignored.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeEntity> {
        let name = name.trim_start_matches(NAMESPACE_SEPARATOR);
        self.by_name.get(name).map(|&idx| &self.types[idx])
    }

    /// Resolve a type name as written in documentation inside `namespace`.
    ///
    /// Names starting with the separator are absolute. Otherwise the name is
    /// tried relative to `namespace` first, then as a global name. A trailing
    /// `[]` (array notation) is ignored.
    #[must_use]
    pub fn resolve_type(&self, name: &str, namespace: &str) -> Option<&TypeEntity> {
        let name = name.trim();
        let name = name.strip_suffix("[]").unwrap_or(name);
        if name.is_empty() {
            return None;
        }
        if name.starts_with(NAMESPACE_SEPARATOR) {
            return self.get(name);
        }
        if !namespace.is_empty()
            && let Some(ty) = self.get(&format!("{namespace}{NAMESPACE_SEPARATOR}{name}"))
        {
            return Some(ty);
        }
        self.get(name)
    }

    /// Path of `file` relative to the model root.
    #[must_use]
    pub fn relative_path(&self, file: &Path) -> String {
        relative_path(&self.root, file)
    }
}

/// Path of `file` relative to `root`, `/`-separated on every platform.
///
/// Files outside `root` are returned as given.
#[must_use]
pub fn relative_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
