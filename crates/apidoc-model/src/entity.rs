//! Type and member entities.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Separator between namespace segments in fully-qualified names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Closed classification of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Exception,
}

impl TypeKind {
    /// Classify the flags reported by an extractor.
    ///
    /// A type flagged as an exception is always an exception, even when it is
    /// also flagged as an interface.
    #[must_use]
    pub fn classify(is_interface: bool, is_exception: bool) -> Self {
        if is_exception {
            Self::Exception
        } else if is_interface {
            Self::Interface
        } else {
            Self::Class
        }
    }
}

/// Kind of a type member. Determines the anchor prefix of member links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Property,
    Method,
    Constant,
}

/// A property, method or constant declared by a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// Line of the declaration in the declaring type's file.
    pub line: Option<u32>,
    pub summary: String,
    pub description: String,
    /// Raw annotation values keyed by annotation name (`param`, `return`, ...).
    pub annotations: BTreeMap<String, Vec<String>>,
}

impl Member {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            line: None,
            summary: String::new(),
            description: String::new(),
            annotations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// A documented class, interface or exception declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntity {
    /// Fully-qualified name, e.g. `A\B\Foo`.
    pub name: String,
    pub short_name: String,
    /// Namespace name; empty for the global namespace.
    pub namespace: String,
    /// Package name; empty when the type declares none.
    pub package: String,
    pub kind: TypeKind,
    /// Fully-qualified name of the parent type. Resolved by lookup, never owned.
    pub parent: Option<String>,
    /// Interfaces implemented directly by this type.
    pub interfaces: Vec<String>,
    /// Declaring file. `None` for built-in types.
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
    pub user_defined: bool,
    pub summary: String,
    pub description: String,
    pub annotations: BTreeMap<String, Vec<String>>,
    pub members: Vec<Member>,
}

impl TypeEntity {
    /// Create a built-in type with the namespace and short name derived from `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let name = name.into();
        let name = name.trim_start_matches(NAMESPACE_SEPARATOR).to_owned();
        let (namespace, short_name) = split_name(&name);
        Self {
            short_name: short_name.to_owned(),
            namespace: namespace.to_owned(),
            name,
            package: String::new(),
            kind,
            parent: None,
            interfaces: Vec::new(),
            file: None,
            line: None,
            user_defined: false,
            summary: String::new(),
            description: String::new(),
            annotations: BTreeMap::new(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Mark the type as user-defined and declared in `file`.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self.user_defined = true;
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn in_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Built-in types are documented externally and have no source mirror.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !self.user_defined
    }

    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.kind == kind)
    }
}

/// Split a fully-qualified name into `(namespace, short_name)`.
#[must_use]
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("", name),
    }
}
