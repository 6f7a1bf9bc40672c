//! JSON records written by source extractors.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::entity::{Member, MemberKind, TypeEntity, TypeKind, split_name};

/// Top-level document produced by an extractor.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelRecord {
    /// Source root, relative to the model file.
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub types: Vec<TypeRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypeRecord {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    package: String,
    #[serde(default)]
    is_interface: bool,
    #[serde(default)]
    is_exception: bool,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    #[serde(default)]
    user_defined: Option<bool>,
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    annotations: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    members: Vec<MemberRecord>,
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    name: String,
    kind: MemberKind,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    annotations: BTreeMap<String, Vec<String>>,
}

impl TypeRecord {
    /// Convert into an entity, resolving `file` against `base_dir`.
    ///
    /// `user_defined` defaults to whether a declaring file is known.
    pub(crate) fn into_entity(self, base_dir: &Path) -> TypeEntity {
        let name = self.name.trim_start_matches('\\').to_owned();
        let (derived_namespace, short_name) = split_name(&name);
        let short_name = short_name.to_owned();
        let namespace = self
            .namespace
            .map(|ns| ns.trim_matches('\\').to_owned())
            .unwrap_or_else(|| derived_namespace.to_owned());
        let file = self.file.map(|f| base_dir.join(f));
        let user_defined = self.user_defined.unwrap_or(file.is_some());

        TypeEntity {
            name,
            short_name,
            namespace,
            package: self.package,
            kind: TypeKind::classify(self.is_interface, self.is_exception),
            parent: self
                .parent
                .map(|p| p.trim_start_matches('\\').to_owned()),
            interfaces: self
                .interfaces
                .into_iter()
                .map(|i| i.trim_start_matches('\\').to_owned())
                .collect(),
            file,
            line: self.line,
            user_defined,
            summary: self.summary,
            description: self.description,
            annotations: self.annotations,
            members: self.members.into_iter().map(MemberRecord::into_member).collect(),
        }
    }
}

impl MemberRecord {
    fn into_member(self) -> Member {
        Member {
            name: self.name,
            kind: self.kind,
            line: self.line,
            summary: self.summary,
            description: self.description,
            annotations: self.annotations,
        }
    }
}
