//! Grouping of types by namespace and package.
//!
//! [`SiteIndex::build`] makes one pass over the model and produces three
//! case-insensitively sorted views (all types, namespaces, packages) plus the
//! reverse inheritance lookups used on type pages. Every later phase iterates
//! these views, so output order only depends on the input names.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use apidoc_model::TypeEntity;

/// Case-insensitive ASCII ordering with a byte-wise tie-break.
///
/// The tie-break keeps names that differ only in case in a stable order.
#[must_use]
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
        .then_with(|| a.cmp(b))
}

fn sort_types_by<F>(types: &mut [&TypeEntity], key: F)
where
    F: Fn(&TypeEntity) -> &str,
{
    types.sort_by(|a, b| cmp_ignore_case(key(a), key(b)).then_with(|| a.name.cmp(&b.name)));
}

fn sort_names(names: &mut Vec<String>) {
    names.sort_by(|a, b| cmp_ignore_case(a, b));
    names.dedup();
}

/// Types declared in one namespace.
#[derive(Debug)]
pub struct NamespaceGroup<'a> {
    pub name: String,
    /// Member types, sorted by short name.
    pub types: Vec<&'a TypeEntity>,
    /// Packages with at least one type in this namespace.
    pub packages: Vec<String>,
}

/// Types declared in one package.
#[derive(Debug)]
pub struct PackageGroup<'a> {
    pub name: String,
    /// Member types, sorted by fully-qualified name.
    pub types: Vec<&'a TypeEntity>,
    /// Namespaces with at least one type in this package.
    pub namespaces: Vec<String>,
}

/// A parent chain that loops back on itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cyclic inheritance detected while walking the parents of {0}")]
pub struct InheritanceCycle(pub String);

/// Sorted groupings over every type of a run.
#[derive(Debug)]
pub struct SiteIndex<'a> {
    types: Vec<&'a TypeEntity>,
    namespaces: Vec<NamespaceGroup<'a>>,
    packages: Vec<PackageGroup<'a>>,
    by_name: HashMap<&'a str, &'a TypeEntity>,
    subclasses: HashMap<&'a str, Vec<&'a TypeEntity>>,
    implementers: HashMap<&'a str, Vec<&'a TypeEntity>>,
}

impl<'a> SiteIndex<'a> {
    /// Index all types.
    ///
    /// Types without a namespace or package are left out of that grouping.
    /// Should a name appear twice, the first entity wins.
    #[must_use]
    pub fn build(all_types: &'a [TypeEntity]) -> Self {
        let mut types = Vec::with_capacity(all_types.len());
        let mut by_name = HashMap::with_capacity(all_types.len());
        let mut namespaces: HashMap<&'a str, NamespaceGroup<'a>> = HashMap::new();
        let mut packages: HashMap<&'a str, PackageGroup<'a>> = HashMap::new();
        let mut subclasses: HashMap<&'a str, Vec<&'a TypeEntity>> = HashMap::new();
        let mut implementers: HashMap<&'a str, Vec<&'a TypeEntity>> = HashMap::new();

        for ty in all_types {
            if by_name.contains_key(ty.name.as_str()) {
                tracing::warn!(name = %ty.name, "Duplicate type name, keeping the first");
                continue;
            }
            by_name.insert(ty.name.as_str(), ty);
            types.push(ty);

            if !ty.package.is_empty() {
                let group = packages
                    .entry(ty.package.as_str())
                    .or_insert_with(|| PackageGroup {
                        name: ty.package.clone(),
                        types: Vec::new(),
                        namespaces: Vec::new(),
                    });
                group.types.push(ty);
                if ty.in_namespace() {
                    group.namespaces.push(ty.namespace.clone());
                }
            }

            if ty.in_namespace() {
                let group = namespaces
                    .entry(ty.namespace.as_str())
                    .or_insert_with(|| NamespaceGroup {
                        name: ty.namespace.clone(),
                        types: Vec::new(),
                        packages: Vec::new(),
                    });
                group.types.push(ty);
                if !ty.package.is_empty() {
                    group.packages.push(ty.package.clone());
                }
            }

            if let Some(parent) = ty.parent.as_deref() {
                subclasses.entry(parent).or_default().push(ty);
            }
            for interface in &ty.interfaces {
                implementers.entry(interface.as_str()).or_default().push(ty);
            }
        }

        sort_types_by(&mut types, |t| &t.name);

        let mut namespaces: Vec<_> = namespaces.into_values().collect();
        namespaces.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
        for group in &mut namespaces {
            sort_types_by(&mut group.types, |t| &t.short_name);
            sort_names(&mut group.packages);
        }

        let mut packages: Vec<_> = packages.into_values().collect();
        packages.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
        for group in &mut packages {
            sort_types_by(&mut group.types, |t| &t.name);
            sort_names(&mut group.namespaces);
        }

        for list in subclasses.values_mut().chain(implementers.values_mut()) {
            sort_types_by(list, |t| &t.name);
        }

        Self {
            types,
            namespaces,
            packages,
            by_name,
            subclasses,
            implementers,
        }
    }

    /// All types sorted by fully-qualified name.
    #[must_use]
    pub fn types(&self) -> &[&'a TypeEntity] {
        &self.types
    }

    #[must_use]
    pub fn namespaces(&self) -> &[NamespaceGroup<'a>] {
        &self.namespaces
    }

    #[must_use]
    pub fn packages(&self) -> &[PackageGroup<'a>] {
        &self.packages
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a TypeEntity> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&NamespaceGroup<'a>> {
        self.namespaces.iter().find(|g| g.name == name)
    }

    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageGroup<'a>> {
        self.packages.iter().find(|g| g.name == name)
    }

    #[must_use]
    pub fn namespace_names(&self) -> Vec<String> {
        self.namespaces.iter().map(|g| g.name.clone()).collect()
    }

    #[must_use]
    pub fn package_names(&self) -> Vec<String> {
        self.packages.iter().map(|g| g.name.clone()).collect()
    }

    /// Namespaces that are a string prefix of `namespace` or have it as one.
    #[must_use]
    pub fn related_namespaces(&self, namespace: &str) -> Vec<String> {
        self.namespaces
            .iter()
            .filter(|g| g.name.starts_with(namespace) || namespace.starts_with(g.name.as_str()))
            .map(|g| g.name.clone())
            .collect()
    }

    /// Types whose parent is `ty`, sorted by name.
    #[must_use]
    pub fn subclasses(&self, ty: &TypeEntity) -> &[&'a TypeEntity] {
        self.subclasses
            .get(ty.name.as_str())
            .map_or(&[], Vec::as_slice)
    }

    /// Types that list `ty` among their directly implemented interfaces.
    #[must_use]
    pub fn implementers(&self, ty: &TypeEntity) -> &[&'a TypeEntity] {
        self.implementers
            .get(ty.name.as_str())
            .map_or(&[], Vec::as_slice)
    }

    /// The parent chain of `ty`, root first and `ty` last.
    ///
    /// Parents missing from the model end the chain.
    pub fn ancestry(&self, ty: &'a TypeEntity) -> Result<Vec<&'a TypeEntity>, InheritanceCycle> {
        let mut chain = vec![ty];
        let mut seen: HashSet<&'a str> = HashSet::from([ty.name.as_str()]);
        let mut current = ty;
        while let Some(parent) = current.parent.as_deref().and_then(|name| self.get(name)) {
            if !seen.insert(parent.name.as_str()) {
                return Err(InheritanceCycle(ty.name.clone()));
            }
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Number of distinct declaring files of user-defined types.
    #[must_use]
    pub fn source_file_count(&self) -> usize {
        self.types
            .iter()
            .filter(|t| t.user_defined)
            .filter_map(|t| t.file.as_deref())
            .collect::<HashSet<&Path>>()
            .len()
    }
}
