//! The render pipeline.
//!
//! Phases run in a fixed order: resources, common pages, namespace pages,
//! package pages, then type pages each followed by the source mirror of its
//! declaring file. Every page gets its own [`PageContext`]; nothing carries
//! over from one page to the next.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use apidoc_config::Config;
use apidoc_model::{Model, TypeEntity};
use walkdir::WalkDir;

use crate::context::{ClassView, PageContext, Partition};
use crate::highlight::Highlighter;
use crate::index::{InheritanceCycle, SiteIndex};
use crate::links::{LinkError, LinkResolver};
use crate::progress::ProgressTracker;
use crate::template::{TemplateEngine, TemplateError};

/// Version exposed to templates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error returned when generation aborts.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Output directory not found: {}", .0.display())]
    OutputDirNotFound(PathBuf),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("Failed to render {}: {source}", template.display())]
    Template {
        template: PathBuf,
        source: TemplateError,
    },
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    CyclicInheritance(#[from] InheritanceCycle),
}

impl GenerateError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Counts of what a run emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// Files copied from resource directories.
    pub resources: usize,
    pub common: usize,
    pub namespaces: usize,
    pub packages: usize,
    pub classes: usize,
    /// Source mirror pages.
    pub sources: usize,
}

impl GenerateStats {
    /// Rendered pages of every kind.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.common + self.namespaces + self.packages + self.classes + self.sources
    }
}

/// Declaring files already mirrored during this run.
#[derive(Debug, Default)]
pub struct GeneratedFiles {
    files: HashSet<PathBuf>,
}

impl GeneratedFiles {
    #[must_use]
    pub fn contains(&self, file: &Path) -> bool {
        self.files.contains(file)
    }

    /// Record `file` as mirrored. Returns `false` if it already was.
    pub fn mark(&mut self, file: &Path) -> bool {
        self.files.insert(file.to_path_buf())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Compiles a model into a static site.
pub struct Generator<'a> {
    model: &'a Model,
    config: &'a Config,
    links: &'a LinkResolver,
    engine: &'a dyn TemplateEngine,
    highlighter: &'a dyn Highlighter,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(
        model: &'a Model,
        config: &'a Config,
        links: &'a LinkResolver,
        engine: &'a dyn TemplateEngine,
        highlighter: &'a dyn Highlighter,
    ) -> Self {
        Self {
            model,
            config,
            links,
            engine,
            highlighter,
        }
    }

    /// Generate every page into `output`, which must already exist.
    ///
    /// # Errors
    ///
    /// Fails on the first missing filename pattern, template error, I/O error
    /// or cyclic parent chain. Pages written before the failure stay on disk.
    pub fn generate(
        &self,
        output: &Path,
        progress: &mut ProgressTracker,
    ) -> Result<GenerateStats, GenerateError> {
        if !output.is_dir() {
            return Err(GenerateError::OutputDirNotFound(output.to_path_buf()));
        }

        let index = SiteIndex::build(self.model.types());
        let templates = &self.config.templates_resolved;
        progress.start(
            templates.common.len()
                + index.namespaces().len()
                + index.packages().len()
                + index.types().len()
                + index.source_file_count(),
        );

        let mut stats = GenerateStats {
            resources: self.copy_resources(output)?,
            ..GenerateStats::default()
        };

        let base = PageContext {
            namespaces: index.namespace_names(),
            packages: index.package_names(),
            ..PageContext::new(
                &self.config.variables,
                VERSION,
                self.model.root().display().to_string(),
            )
        };

        stats.common = self.render_common(output, &index, &base, progress)?;
        stats.namespaces = self.render_namespaces(output, &index, &base, progress)?;
        stats.packages = self.render_packages(output, &index, &base, progress)?;
        (stats.classes, stats.sources) = self.render_types(output, &index, &base, progress)?;

        progress.finish();
        tracing::info!(
            pages = stats.pages(),
            sources = stats.sources,
            resources = stats.resources,
            "Generated site"
        );
        Ok(stats)
    }

    fn copy_resources(&self, output: &Path) -> Result<usize, GenerateError> {
        let mut copied = 0;
        for resource in &self.config.resources_resolved {
            let dest_root = output.join(&resource.destination);
            for entry in WalkDir::new(&resource.source).min_depth(1) {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(&resource.source).to_path_buf();
                    GenerateError::Io {
                        path,
                        source: e.into(),
                    }
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Ok(relative) = entry.path().strip_prefix(&resource.source) else {
                    continue;
                };
                let dest = dest_root.join(relative);
                ensure_parent(&dest)?;
                fs::copy(entry.path(), &dest).map_err(|e| GenerateError::io(entry.path(), e))?;
                copied += 1;
            }
            tracing::debug!(
                source = %resource.source.display(),
                destination = %resource.destination,
                "Copied resources"
            );
        }
        Ok(copied)
    }

    fn render_common(
        &self,
        output: &Path,
        index: &SiteIndex<'_>,
        base: &PageContext<'a>,
        progress: &mut ProgressTracker,
    ) -> Result<usize, GenerateError> {
        let common = &self.config.templates_resolved.common;
        if common.is_empty() {
            return Ok(0);
        }
        let context = PageContext {
            types: Partition::of(index.types().iter().copied(), self.links)?,
            ..base.clone()
        };
        for (destination, template) in common {
            self.render_page(template, &context, output, destination)?;
            progress.increment();
        }
        Ok(common.len())
    }

    fn render_namespaces(
        &self,
        output: &Path,
        index: &SiteIndex<'_>,
        base: &PageContext<'a>,
        progress: &mut ProgressTracker,
    ) -> Result<usize, GenerateError> {
        let template = &self.config.templates_resolved.namespace;
        for group in index.namespaces() {
            let package = match group.packages.as_slice() {
                [only] => Some(only.clone()),
                _ => None,
            };
            let context = PageContext {
                namespaces: index.related_namespaces(&group.name),
                packages: group.packages.clone(),
                namespace: Some(group.name.clone()),
                package,
                types: Partition::of(group.types.iter().copied(), self.links)?,
                ..base.clone()
            };
            let link = self.links.namespace_link(&group.name)?;
            self.render_page(template, &context, output, &link)?;
            progress.increment();
        }
        Ok(index.namespaces().len())
    }

    fn render_packages(
        &self,
        output: &Path,
        index: &SiteIndex<'_>,
        base: &PageContext<'a>,
        progress: &mut ProgressTracker,
    ) -> Result<usize, GenerateError> {
        let template = &self.config.templates_resolved.package;
        for group in index.packages() {
            let context = PageContext {
                namespaces: group.namespaces.clone(),
                packages: vec![group.name.clone()],
                namespace: None,
                package: Some(group.name.clone()),
                types: Partition::of(group.types.iter().copied(), self.links)?,
                ..base.clone()
            };
            let link = self.links.package_link(&group.name)?;
            self.render_page(template, &context, output, &link)?;
            progress.increment();
        }
        Ok(index.packages().len())
    }

    fn render_types(
        &self,
        output: &Path,
        index: &SiteIndex<'_>,
        base: &PageContext<'a>,
        progress: &mut ProgressTracker,
    ) -> Result<(usize, usize), GenerateError> {
        let mut generated = GeneratedFiles::default();
        for &ty in index.types() {
            let context = self.type_context(ty, index, base)?;
            let link = self.links.type_link(ty)?;
            self.render_page(&self.config.templates_resolved.class, &context, output, &link)?;
            progress.increment();

            if ty.is_internal() {
                continue;
            }
            let Some(file) = ty.file.as_deref() else {
                continue;
            };
            if generated.contains(file) {
                continue;
            }
            self.render_source(ty, file, context, output)?;
            generated.mark(file);
            progress.increment();
        }
        Ok((index.types().len(), generated.len()))
    }

    fn type_context<'i>(
        &self,
        ty: &'i TypeEntity,
        index: &SiteIndex<'i>,
        base: &PageContext<'a>,
    ) -> Result<PageContext<'a>, GenerateError> {
        let namespaces = if ty.in_namespace() {
            index.related_namespaces(&ty.namespace)
        } else {
            Vec::new()
        };
        let packages = if ty.package.is_empty() {
            Vec::new()
        } else {
            vec![ty.package.clone()]
        };
        let tree = index.ancestry(ty)?;
        let class = ClassView::new(
            ty,
            &tree,
            index.subclasses(ty),
            index.implementers(ty),
            self.links,
        )?;
        Ok(PageContext {
            namespaces,
            package: packages.first().cloned(),
            packages,
            namespace: ty.in_namespace().then(|| ty.namespace.clone()),
            types: Partition::of([ty], self.links)?,
            class: Some(class),
            ..base.clone()
        })
    }

    fn render_source(
        &self,
        ty: &TypeEntity,
        file: &Path,
        context: PageContext<'a>,
        output: &Path,
    ) -> Result<(), GenerateError> {
        let bytes = fs::read(file).map_err(|e| GenerateError::io(file, e))?;
        let source = String::from_utf8_lossy(&bytes);
        let context = PageContext {
            source: Some(self.highlighter.highlight_file(&source)),
            file_name: Some(self.model.relative_path(file)),
            ..context
        };
        let link = self.links.source_link(ty, false)?;
        self.render_page(&self.config.templates_resolved.source, &context, output, &link)
    }

    fn render_page(
        &self,
        template: &Path,
        context: &PageContext<'_>,
        output: &Path,
        link: &str,
    ) -> Result<(), GenerateError> {
        let html = self
            .engine
            .render(template, context)
            .map_err(|source| GenerateError::Template {
                template: template.to_path_buf(),
                source,
            })?;
        let path = output.join(link);
        ensure_parent(&path)?;
        fs::write(&path, html).map_err(|e| GenerateError::io(&path, e))?;
        tracing::debug!(page = %link, "Rendered page");
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<(), GenerateError> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;
    use crate::progress::ProgressSink;
    use crate::template::JinjaEngine;
    use apidoc_config::{Filenames, ResourceMapping};
    use apidoc_model::{Member, MemberKind, TypeKind};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Writes the page context as JSON, tagged with the template name.
    struct RecordingEngine;

    impl TemplateEngine for RecordingEngine {
        fn render(
            &self,
            template: &Path,
            context: &PageContext<'_>,
        ) -> Result<String, TemplateError> {
            let mut value = serde_json::to_value(context).unwrap();
            value["template"] = json!(template.file_name().unwrap().to_string_lossy());
            Ok(serde_json::to_string_pretty(&value).unwrap())
        }
    }

    struct Fixture {
        dir: TempDir,
        config: Config,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir_all(dir.path().join("out")).unwrap();
            let mut config = Config::default_with_base(&dir.path().join("theme"));
            config
                .templates_resolved
                .common
                .insert("index.html".to_owned(), dir.path().join("theme/overview.html"));
            Self { dir, config }
        }

        fn src(&self, relative: &str) -> PathBuf {
            let path = self.dir.path().join("src").join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "<?php\nclass X {}\n").unwrap();
            path
        }

        fn out(&self) -> PathBuf {
            self.dir.path().join("out")
        }

        fn model(&self, types: Vec<TypeEntity>) -> Model {
            Model::new(self.dir.path().join("src"), types).unwrap()
        }

        fn generate(&self, model: &Model, output: &Path) -> Result<GenerateStats, GenerateError> {
            let links = LinkResolver::from_config(&self.config, model.root());
            let highlighter = PlainHighlighter::default();
            Generator::new(model, &self.config, &links, &RecordingEngine, &highlighter)
                .generate(output, &mut ProgressTracker::disabled())
        }

        fn page(&self, link: &str) -> Value {
            let content = fs::read_to_string(self.out().join(link)).unwrap();
            serde_json::from_str(&content).unwrap()
        }
    }

    fn names(list: &Value, key: &str) -> Vec<String> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|v| v[key].as_str().unwrap().to_owned())
            .collect()
    }

    fn example(fixture: &Fixture) -> Model {
        fixture.model(vec![
            TypeEntity::new("A\\Foo", TypeKind::Class)
                .with_package("P1")
                .with_file(fixture.src("A/Foo.php"), 3),
            TypeEntity::new("A\\Bar", TypeKind::Class)
                .with_package("P1")
                .with_parent("A\\Foo")
                .with_file(fixture.src("A/Bar.php"), 3),
            TypeEntity::new("B\\Baz", TypeKind::Class)
                .with_package("P2")
                .with_file(fixture.src("B/Baz.php"), 3),
        ])
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let fixture = Fixture::new();
        let model = fixture.model(Vec::new());
        let result = fixture.generate(&model, &fixture.dir.path().join("missing"));
        assert!(matches!(result, Err(GenerateError::OutputDirNotFound(_))));
    }

    #[test]
    fn test_example_pages() {
        let fixture = Fixture::new();
        let model = example(&fixture);
        let stats = fixture.generate(&model, &fixture.out()).unwrap();

        assert_eq!(
            stats,
            GenerateStats {
                resources: 0,
                common: 1,
                namespaces: 2,
                packages: 2,
                classes: 3,
                sources: 3,
            }
        );

        let namespace = fixture.page("namespace-A.html");
        assert_eq!(namespace["template"], json!("namespace.html"));
        assert_eq!(names(&namespace["classes"], "short_name"), vec!["Bar", "Foo"]);
        assert_eq!(namespace["packages"], json!(["P1"]));
        assert_eq!(namespace["package"], json!("P1"));
        assert_eq!(namespace["namespaces"], json!(["A"]));

        let bar = fixture.page("class-A.Bar.html");
        assert_eq!(names(&bar["class"]["tree"], "name"), vec!["A\\Foo", "A\\Bar"]);
        assert_eq!(bar["namespace"], json!("A"));
        assert_eq!(bar["packages"], json!(["P1"]));
        let foo = fixture.page("class-A.Foo.html");
        assert_eq!(names(&foo["class"]["subclasses"], "name"), vec!["A\\Bar"]);

        let package = fixture.page("package-P1.html");
        assert_eq!(package["namespaces"], json!(["A"]));
        assert_eq!(package["namespace"], json!(null));
        assert_eq!(names(&package["classes"], "name"), vec!["A\\Bar", "A\\Foo"]);

        let index = fixture.page("index.html");
        assert_eq!(index["namespaces"], json!(["A", "B"]));
        assert_eq!(index["packages"], json!(["P1", "P2"]));
        assert_eq!(names(&index["classes"], "name"), vec!["A\\Bar", "A\\Foo", "B\\Baz"]);

        let source = fixture.page("source-A.Bar.php.html");
        assert_eq!(source["file_name"], json!("A/Bar.php"));
        assert!(source["source"].as_str().unwrap().contains("class X {}"));
    }

    #[test]
    fn test_variables_reach_every_page() {
        let mut fixture = Fixture::new();
        fixture
            .config
            .variables
            .insert("title".to_owned(), json!("Acme API"));
        let model = example(&fixture);
        fixture.generate(&model, &fixture.out()).unwrap();

        for link in [
            "index.html",
            "namespace-A.html",
            "package-P1.html",
            "class-A.Bar.html",
            "source-A.Bar.php.html",
        ] {
            assert_eq!(fixture.page(link)["title"], json!("Acme API"), "{link}");
        }
    }

    #[test]
    fn test_shared_file_is_mirrored_once() {
        let fixture = Fixture::new();
        let file = fixture.src("A/all.php");
        let model = fixture.model(vec![
            TypeEntity::new("A\\One", TypeKind::Class).with_file(&file, 2),
            TypeEntity::new("A\\Two", TypeKind::Interface).with_file(&file, 10),
            TypeEntity::new("A\\Three", TypeKind::Exception).with_file(&file, 20),
            TypeEntity::new("Exception", TypeKind::Exception),
        ]);
        let stats = fixture.generate(&model, &fixture.out()).unwrap();
        assert_eq!(stats.sources, 1);

        let sources: Vec<_> = fs::read_dir(fixture.out())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("source-"))
            .collect();
        assert_eq!(sources, vec!["source-A.all.php.html"]);

        let exception = fixture.page("class-Exception.html");
        assert_eq!(
            exception["class"]["source_link"],
            json!("http://php.net/manual/class.exception.php")
        );
        assert_eq!(exception["namespaces"], json!([]));
    }

    #[test]
    fn test_namespace_page_filters_related_namespaces() {
        let fixture = Fixture::new();
        let model = fixture.model(vec![
            TypeEntity::new("A\\X", TypeKind::Class).with_package("P1"),
            TypeEntity::new("A\\Y", TypeKind::Class).with_package("P2"),
            TypeEntity::new("A\\B\\X", TypeKind::Class).with_package("P1"),
            TypeEntity::new("C\\X", TypeKind::Class).with_package("P1"),
        ]);
        fixture.generate(&model, &fixture.out()).unwrap();

        let a = fixture.page("namespace-A.html");
        assert_eq!(a["namespaces"], json!(["A", "A\\B"]));
        assert_eq!(a["packages"], json!(["P1", "P2"]));
        assert_eq!(a["package"], json!(null));

        let p1 = fixture.page("package-P1.html");
        assert_eq!(p1["namespaces"], json!(["A", "A\\B", "C"]));
    }

    #[test]
    fn test_resources_are_copied() {
        let mut fixture = Fixture::new();
        let resources = fixture.dir.path().join("theme/resources");
        fs::create_dir_all(resources.join("css")).unwrap();
        fs::write(resources.join("css/style.css"), "body {}").unwrap();
        fs::write(resources.join("logo.png"), [0u8, 1, 2]).unwrap();
        fixture.config.resources_resolved.push(ResourceMapping {
            source: resources,
            destination: "assets".to_owned(),
        });

        let model = fixture.model(Vec::new());
        let stats = fixture.generate(&model, &fixture.out()).unwrap();

        assert_eq!(stats.resources, 2);
        assert_eq!(
            fs::read_to_string(fixture.out().join("assets/css/style.css")).unwrap(),
            "body {}"
        );
        assert!(fixture.out().join("assets/logo.png").is_file());
    }

    #[test]
    fn test_cyclic_parents_fail() {
        let fixture = Fixture::new();
        let model = fixture.model(vec![
            TypeEntity::new("A", TypeKind::Class).with_parent("B"),
            TypeEntity::new("B", TypeKind::Class).with_parent("A"),
        ]);
        let result = fixture.generate(&model, &fixture.out());
        assert!(matches!(result, Err(GenerateError::CyclicInheritance(_))));
    }

    #[test]
    fn test_missing_pattern_aborts() {
        let mut fixture = Fixture::new();
        fixture.config.filenames = Filenames {
            package: None,
            ..Filenames::default()
        };
        let model = fixture.model(vec![TypeEntity::new("A\\Foo", TypeKind::Class).with_package("P")]);
        let result = fixture.generate(&model, &fixture.out());
        assert!(matches!(result, Err(GenerateError::Link(_))));
    }

    #[test]
    fn test_rerun_is_identical() {
        let fixture = Fixture::new();
        let model = example(&fixture);
        let second = fixture.dir.path().join("second");
        fs::create_dir_all(&second).unwrap();

        fixture.generate(&model, &fixture.out()).unwrap();
        fixture.generate(&model, &second).unwrap();

        let listing = |dir: &Path| {
            let mut files: Vec<(String, String)> = fs::read_dir(dir)
                .unwrap()
                .map(|e| {
                    let path = e.unwrap().path();
                    let name = path.file_name().unwrap().to_string_lossy().into_owned();
                    (name, fs::read_to_string(&path).unwrap())
                })
                .collect();
            files.sort();
            files
        };
        assert_eq!(listing(&fixture.out()), listing(&second));
    }

    #[test]
    fn test_progress_reaches_total() {
        struct Last(Arc<Mutex<(usize, usize)>>);
        impl ProgressSink for Last {
            fn update(&mut self, current: usize, total: usize) {
                *self.0.lock().unwrap() = (current, total);
            }
        }

        let fixture = Fixture::new();
        let model = example(&fixture);
        let last = Arc::new(Mutex::new((0, 0)));
        let mut progress = ProgressTracker::new(Box::new(Last(Arc::clone(&last))));
        let links = LinkResolver::from_config(&fixture.config, model.root());
        let highlighter = PlainHighlighter::default();
        Generator::new(&model, &fixture.config, &links, &RecordingEngine, &highlighter)
            .generate(&fixture.out(), &mut progress)
            .unwrap();

        // 1 common + 2 namespaces + 2 packages + 3 types + 3 sources
        assert_eq!(*last.lock().unwrap(), (11, 11));
    }

    #[test]
    fn test_default_theme_renders() {
        let theme = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../theme");
        let config = Config::load(Some(theme.join("apidoc.toml").as_path()), None).unwrap();

        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        fs::create_dir_all(src.join("A")).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(
            src.join("A/Foo.php"),
            "<?php\nnamespace A;\n\nclass Foo {\n\tfunction run() {}\n}\n",
        )
        .unwrap();

        let mut run = Member::new("run", MemberKind::Method).with_line(5);
        run.annotations
            .insert("return".to_owned(), vec!["Failure|null when <done>".to_owned()]);
        let mut foo = TypeEntity::new("A\\Foo", TypeKind::Class)
            .with_package("Core")
            .with_file(src.join("A/Foo.php"), 4)
            .with_member(run);
        foo.summary = "Runs `things`.".to_owned();
        let model = Arc::new(
            Model::new(
                &src,
                vec![
                    foo,
                    TypeEntity::new("A\\Failure", TypeKind::Exception)
                        .with_package("Core")
                        .with_parent("Exception"),
                    TypeEntity::new("Exception", TypeKind::Exception),
                ],
            )
            .unwrap(),
        );

        let links = Arc::new(LinkResolver::from_config(&config, model.root()));
        let highlighter: Arc<dyn Highlighter> = Arc::new(PlainHighlighter::default());
        let engine = JinjaEngine::new(
            config.base_dir(),
            &out,
            Arc::clone(&links),
            Arc::clone(&model),
            Arc::clone(&highlighter),
        );
        let stats = Generator::new(&model, &config, &links, &engine, highlighter.as_ref())
            .generate(&out, &mut ProgressTracker::disabled())
            .unwrap();
        assert_eq!(stats.sources, 1);
        assert!(stats.resources >= 1);

        let read = |name: &str| fs::read_to_string(out.join(name)).unwrap();

        let index = read("index.html");
        assert!(index.contains("<title>API reference</title>"));
        assert!(index.contains("href=\"namespace-A.html\""));
        assert!(index.contains("style.css?"));

        let class = read("class-A.Foo.html");
        assert!(class.contains("<tr id=\"_run\">"));
        assert!(class.contains("Runs <code>things</code>."));
        assert!(class.contains("<a href=\"class-A.Failure.html\">Failure</a>|null when &lt;done&gt;"));
        assert!(class.contains("href=\"source-A.Foo.php.html#4\""));

        let failure = read("class-A.Failure.html");
        assert!(failure.contains("href=\"class-Exception.html\""));
        let exception = read("class-Exception.html");
        assert!(exception.contains("class.exception.php"));

        let source = read("source-A.Foo.php.html");
        assert!(source.contains("<span id=\"4\" class=\"line\">"));
        assert!(source.contains("    function run() {}"));

        let elements = read("elementlist.js");
        assert!(elements.contains("\"class-A.Foo.html\""));
    }
}
