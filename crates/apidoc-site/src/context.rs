//! Page contexts handed to the template engine.
//!
//! A [`PageContext`] is built fresh for every page. Types and members are
//! flattened into serializable views with their links already resolved, so
//! templates never need to call back into the model for navigation.

use std::collections::BTreeMap;

use apidoc_model::{Member, MemberKind, TypeEntity, TypeKind};
use serde::Serialize;

use crate::links::{LinkError, LinkResolver};

/// A type as seen by templates.
#[derive(Debug, Clone, Serialize)]
pub struct TypeView {
    pub name: String,
    pub short_name: String,
    pub namespace: String,
    pub package: String,
    pub kind: TypeKind,
    pub link: String,
    pub source_link: String,
    pub user_defined: bool,
    pub line: Option<u32>,
    pub summary: String,
    pub description: String,
    pub parent: Option<String>,
    pub interfaces: Vec<String>,
}

impl TypeView {
    pub fn new(ty: &TypeEntity, links: &LinkResolver) -> Result<Self, LinkError> {
        Ok(Self {
            name: ty.name.clone(),
            short_name: ty.short_name.clone(),
            namespace: ty.namespace.clone(),
            package: ty.package.clone(),
            kind: ty.kind,
            link: links.type_link(ty)?,
            source_link: links.source_link(ty, true)?,
            user_defined: ty.user_defined,
            line: ty.line,
            summary: ty.summary.clone(),
            description: ty.description.clone(),
            parent: ty.parent.clone(),
            interfaces: ty.interfaces.clone(),
        })
    }
}

/// A property, method or constant as seen by templates.
#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub name: String,
    pub kind: MemberKind,
    pub link: String,
    /// Fragment of `link` without the `#`.
    pub anchor: String,
    pub source_link: String,
    pub line: Option<u32>,
    pub summary: String,
    pub description: String,
    pub annotations: BTreeMap<String, Vec<String>>,
}

impl MemberView {
    pub fn new(ty: &TypeEntity, member: &Member, links: &LinkResolver) -> Result<Self, LinkError> {
        let link = links.member_link(ty, member)?;
        let anchor = link
            .split_once('#')
            .map(|(_, anchor)| anchor.to_owned())
            .unwrap_or_default();
        Ok(Self {
            name: member.name.clone(),
            kind: member.kind,
            link,
            anchor,
            source_link: links.member_source_link(ty, member)?,
            line: member.line,
            summary: member.summary.clone(),
            description: member.description.clone(),
            annotations: member.annotations.clone(),
        })
    }
}

/// Detail of the type a class page documents.
#[derive(Debug, Clone, Serialize)]
pub struct ClassView {
    #[serde(flatten)]
    pub info: TypeView,
    pub annotations: BTreeMap<String, Vec<String>>,
    /// Ancestors root first, ending with the type itself.
    pub tree: Vec<TypeView>,
    pub subclasses: Vec<TypeView>,
    pub implementers: Vec<TypeView>,
    pub constants: Vec<MemberView>,
    pub properties: Vec<MemberView>,
    pub methods: Vec<MemberView>,
}

impl ClassView {
    pub fn new(
        ty: &TypeEntity,
        tree: &[&TypeEntity],
        subclasses: &[&TypeEntity],
        implementers: &[&TypeEntity],
        links: &LinkResolver,
    ) -> Result<Self, LinkError> {
        let views = |types: &[&TypeEntity]| -> Result<Vec<TypeView>, LinkError> {
            types.iter().map(|t| TypeView::new(t, links)).collect()
        };
        let members = |kind: MemberKind| -> Result<Vec<MemberView>, LinkError> {
            ty.members_of(kind)
                .map(|m| MemberView::new(ty, m, links))
                .collect()
        };
        Ok(Self {
            info: TypeView::new(ty, links)?,
            annotations: ty.annotations.clone(),
            tree: views(tree)?,
            subclasses: views(subclasses)?,
            implementers: views(implementers)?,
            constants: members(MemberKind::Constant)?,
            properties: members(MemberKind::Property)?,
            methods: members(MemberKind::Method)?,
        })
    }
}

/// Types split by kind. Every type lands in exactly one list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Partition {
    pub classes: Vec<TypeView>,
    pub interfaces: Vec<TypeView>,
    pub exceptions: Vec<TypeView>,
}

impl Partition {
    pub fn of<'t, I>(types: I, links: &LinkResolver) -> Result<Self, LinkError>
    where
        I: IntoIterator<Item = &'t TypeEntity>,
    {
        let mut partition = Self::default();
        for ty in types {
            let view = TypeView::new(ty, links)?;
            match ty.kind {
                TypeKind::Class => partition.classes.push(view),
                TypeKind::Interface => partition.interfaces.push(view),
                TypeKind::Exception => partition.exceptions.push(view),
            }
        }
        Ok(partition)
    }
}

/// Everything one template render sees.
///
/// Configured variables are flattened first, so the fixed keys win on clash.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    #[serde(flatten)]
    pub variables: &'a BTreeMap<String, serde_json::Value>,
    pub version: &'static str,
    /// Directory declaring files are relative to.
    pub file_root: String,
    pub namespaces: Vec<String>,
    pub packages: Vec<String>,
    pub namespace: Option<String>,
    pub package: Option<String>,
    #[serde(flatten)]
    pub types: Partition,
    pub class: Option<ClassView>,
    /// Highlighted source of a source mirror page.
    pub source: Option<String>,
    /// Path of the mirrored file relative to `file_root`.
    pub file_name: Option<String>,
}

impl<'a> PageContext<'a> {
    #[must_use]
    pub fn new(
        variables: &'a BTreeMap<String, serde_json::Value>,
        version: &'static str,
        file_root: String,
    ) -> Self {
        Self {
            variables,
            version,
            file_root,
            namespaces: Vec::new(),
            packages: Vec::new(),
            namespace: None,
            package: None,
            types: Partition::default(),
            class: None,
            source: None,
            file_name: None,
        }
    }
}
