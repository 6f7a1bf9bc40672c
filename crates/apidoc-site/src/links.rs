//! Output paths ("links") for namespaces, packages, types, members and sources.
//!
//! Every link is a configured filename pattern with a sanitized token in
//! place of the `%s` placeholder. Sanitizing replaces each byte that is not an
//! ASCII letter, digit or underscore with `.`, so `A\Foo` and `A.Foo` share
//! the token `A.Foo`. That collision is accepted.

use std::path::{Path, PathBuf};

use apidoc_config::{Config, FileKind, Filenames, PLACEHOLDER};
use apidoc_model::{Member, MemberKind, TypeEntity, relative_path};

/// Token used for the empty namespace and the empty package.
pub const EMPTY_NAME_TOKEN: &str = "None";

/// Error returned when a link cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The filename pattern for this kind of page is not configured.
    #[error("{0} output filename not defined")]
    MissingFilename(FileKind),
}

/// Replace every byte other than `[A-Za-z0-9_]` with `.`.
///
/// Works on bytes, so a multi-byte character becomes several dots.
#[must_use]
pub fn sanitize(name: &str) -> String {
    name.bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b == b'_' {
                char::from(b)
            } else {
                '.'
            }
        })
        .collect()
}

/// Maps entities to their output-relative paths.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    filenames: Filenames,
    source_root: PathBuf,
    external_docs_url: String,
}

impl LinkResolver {
    /// Create a resolver.
    ///
    /// `source_root` is the directory declaring files are made relative to.
    #[must_use]
    pub fn new(
        filenames: Filenames,
        source_root: impl Into<PathBuf>,
        external_docs_url: impl Into<String>,
    ) -> Self {
        Self {
            filenames,
            source_root: source_root.into(),
            external_docs_url: external_docs_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config, source_root: &Path) -> Self {
        Self::new(
            config.filenames.clone(),
            source_root,
            config.settings.external_docs_url.clone(),
        )
    }

    fn format(&self, kind: FileKind, token: &str) -> Result<String, LinkError> {
        let pattern = self
            .filenames
            .get(kind)
            .ok_or(LinkError::MissingFilename(kind))?;
        Ok(pattern.replacen(PLACEHOLDER, token, 1))
    }

    fn token_or_sentinel(name: &str) -> String {
        if name.is_empty() {
            EMPTY_NAME_TOKEN.to_owned()
        } else {
            sanitize(name)
        }
    }

    /// Link to a namespace page. The empty namespace maps to `None`.
    pub fn namespace_link(&self, namespace: &str) -> Result<String, LinkError> {
        self.format(FileKind::Namespace, &Self::token_or_sentinel(namespace))
    }

    /// Link to a package page. The empty package maps to `None`.
    pub fn package_link(&self, package: &str) -> Result<String, LinkError> {
        self.format(FileKind::Package, &Self::token_or_sentinel(package))
    }

    /// Link to the page of the type named `name`.
    pub fn class_link(&self, name: &str) -> Result<String, LinkError> {
        self.format(FileKind::Class, &sanitize(name))
    }

    pub fn type_link(&self, ty: &TypeEntity) -> Result<String, LinkError> {
        self.class_link(&ty.name)
    }

    /// Link to a member anchor on its declaring type's page.
    pub fn member_link(&self, ty: &TypeEntity, member: &Member) -> Result<String, LinkError> {
        let anchor = match member.kind {
            MemberKind::Property => format!("#${}", member.name),
            MemberKind::Method => format!("#_{}", member.name),
            MemberKind::Constant => format!("#{}", member.name),
        };
        Ok(self.type_link(ty)? + &anchor)
    }

    /// Link to the source of a type.
    ///
    /// Built-in types resolve to their external reference page. User-defined
    /// types resolve to their source mirror, with a `#line` anchor when
    /// `with_line` is set and the line is known.
    pub fn source_link(&self, ty: &TypeEntity, with_line: bool) -> Result<String, LinkError> {
        match self.source_file(ty) {
            Some(file) => self.mirror_link(file, with_line.then_some(ty.line).flatten()),
            None => {
                self.ensure_source_pattern()?;
                Ok(format!("{}class.{}.php", self.external_docs_url, ty.name).to_lowercase())
            }
        }
    }

    /// Link to the source of a member, anchored at the member's line.
    pub fn member_source_link(
        &self,
        ty: &TypeEntity,
        member: &Member,
    ) -> Result<String, LinkError> {
        match self.source_file(ty) {
            Some(file) => self.mirror_link(file, member.line),
            None => {
                self.ensure_source_pattern()?;
                let page = member.name.trim_start_matches('_').replace('_', "-");
                Ok(format!("{}{}.{page}.php", self.external_docs_url, ty.name).to_lowercase())
            }
        }
    }

    /// Path of the source mirror page for `file`, without a line anchor.
    pub fn source_page(&self, file: &Path) -> Result<String, LinkError> {
        self.mirror_link(file, None)
    }

    /// Declaring file of a user-defined type. A user-defined type without a
    /// known file is linked like a built-in one.
    fn source_file<'t>(&self, ty: &'t TypeEntity) -> Option<&'t Path> {
        if ty.is_internal() {
            None
        } else {
            ty.file.as_deref()
        }
    }

    fn mirror_link(&self, file: &Path, line: Option<u32>) -> Result<String, LinkError> {
        let relative = relative_path(&self.source_root, file);
        let link = self.format(FileKind::Source, &sanitize(&relative))?;
        Ok(match line {
            Some(line) => format!("{link}#{line}"),
            None => link,
        })
    }

    // Source links fail the same way for built-in and user-defined types.
    fn ensure_source_pattern(&self) -> Result<(), LinkError> {
        self.filenames
            .get(FileKind::Source)
            .map(|_| ())
            .ok_or(LinkError::MissingFilename(FileKind::Source))
    }
}
