//! `apidoc generate` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use apidoc_config::{CliSettings, Config};
use apidoc_model::Model;
use apidoc_site::{
    Generator, Highlighter, JinjaEngine, LinkResolver, PlainHighlighter, ProgressTracker,
    wipe_out_target,
};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;
use crate::progress::ProgressBar;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Extracted source model (JSON).
    #[arg(short, long)]
    model: PathBuf,

    /// Output directory for the generated site.
    #[arg(short, long)]
    output: PathBuf,

    /// Path to configuration file (default: auto-discover apidoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep existing files in the output directory.
    #[arg(long)]
    no_wipe: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progressbar: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            progressbar: self.no_progressbar.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let model = Arc::new(Model::load(&self.model)?);
        if model.is_empty() {
            output.warning(&format!("No types in {}", self.model.display()));
        } else {
            output.info(&format!(
                "Loaded {} types from {}",
                model.len(),
                self.model.display()
            ));
        }

        if self.no_wipe {
            output.warning("Keeping existing output, stale pages may remain");
        } else if !wipe_out_target(&self.output, &config) {
            return Err(CliError::Wipe(self.output));
        }
        std::fs::create_dir_all(&self.output)?;

        let links = Arc::new(LinkResolver::from_config(&config, model.root()));
        let highlighter: Arc<dyn Highlighter> = Arc::new(PlainHighlighter::default());
        let engine = JinjaEngine::new(
            config.base_dir(),
            &self.output,
            Arc::clone(&links),
            Arc::clone(&model),
            Arc::clone(&highlighter),
        );

        let mut progress = if config.settings.progressbar {
            ProgressTracker::new(Box::new(ProgressBar::new()))
        } else {
            ProgressTracker::disabled()
        };

        let stats = Generator::new(&model, &config, &links, &engine, highlighter.as_ref())
            .generate(&self.output, &mut progress)?;

        output.success(&format!(
            "Generated {} pages ({} sources, {} resources) to {}",
            stats.pages(),
            stats.sources,
            stats.resources,
            self.output.display()
        ));
        Ok(())
    }
}
