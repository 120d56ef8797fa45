//! wp-breadcrumbs CLI
//!
//! Resolves breadcrumb trails for page contexts against a site snapshot.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use wp_breadcrumbs_core::{
    format_batch, format_output, format_value, BatchReport, BreadcrumbConfig, BreadcrumbGenerator,
    CommerceExtension, ExtensionProbe, ExtensionStatus, NamedBreadcrumb, OutputFormat, PageContext,
    SiteSnapshot,
};

/// Breadcrumb trails for site snapshots and page contexts
#[derive(Parser)]
#[command(name = "wp-breadcrumbs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Breadcrumb trails for site snapshots and page contexts")]
#[command(long_about = r#"
wp-breadcrumbs: Breadcrumb Trail Resolution

Computes the "Home > Category > Subcategory > Article" trail for the page
being viewed. Site content is read from a JSON or YAML snapshot; the view is
described by a page context file.

Output formats:
  - JSON (default) - Structured JSON for programmatic use
  - YAML - Human-readable YAML format
  - ANSI - Colorful terminal output
  - Summary - Plain "A > B > C" paths

Examples:
  wp-breadcrumbs trail --site site.yaml --context single.yaml
  wp-breadcrumbs --format ansi batch --site site.yaml --contexts views.yaml
  wp-breadcrumbs extension --plugins-dir wp-content/plugins
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Json, global = true)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by the trail-producing subcommands
#[derive(clap::Args, Clone, Debug)]
pub struct SiteArgs {
    /// Site snapshot (JSON or YAML)
    #[arg(short, long)]
    pub site: PathBuf,

    /// Label and limit configuration (JSON or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Plugins directory; commerce rules only run when the extension is installed there
    #[arg(long)]
    pub plugins_dir: Option<PathBuf>,

    /// Admin base URL used for the extension activation link
    #[arg(long, default_value = "/wp-admin/")]
    pub admin_url: String,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the trail for a single page context
    Trail {
        #[command(flatten)]
        site: SiteArgs,

        /// Page context (JSON or YAML)
        #[arg(long)]
        context: PathBuf,
    },

    /// Resolve trails for a list of named page contexts
    Batch {
        #[command(flatten)]
        site: SiteArgs,

        /// List of page contexts, each with a `name` (JSON or YAML)
        #[arg(long)]
        contexts: PathBuf,

        /// Number of threads for parallel processing (default: auto)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Check whether the commerce extension is installed
    Extension {
        /// Plugins directory
        #[arg(long)]
        plugins_dir: PathBuf,

        /// Admin base URL used for the activation link
        #[arg(long, default_value = "/wp-admin/")]
        admin_url: String,

        /// Extension directory name
        #[arg(long, default_value = wp_breadcrumbs_core::extension::DEFAULT_EXTENSION_SLUG)]
        slug: String,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

/// Batch entry: a page context with a display name
#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,

    #[serde(flatten)]
    context: PageContext,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match &args.command {
        Commands::Trail { site, context } => run_trail(site, context, &args),
        Commands::Batch {
            site,
            contexts,
            threads,
        } => run_batch(site, contexts, *threads, &args),
        Commands::Extension {
            plugins_dir,
            admin_url,
            slug,
        } => run_extension(plugins_dir, admin_url, slug, &args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Snapshot, configuration and commerce switch loaded from the site options
struct LoadedSite {
    snapshot: SiteSnapshot,
    config: BreadcrumbConfig,
    commerce_enabled: bool,
}

impl LoadedSite {
    fn load(args: &SiteArgs) -> Result<Self> {
        let snapshot = SiteSnapshot::from_path(&args.site)
            .with_context(|| format!("Failed to load site snapshot {}", args.site.display()))?;

        let config = match &args.config {
            Some(path) => BreadcrumbConfig::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => BreadcrumbConfig::default(),
        };

        let installed = match &args.plugins_dir {
            Some(dir) => {
                let status = ExtensionProbe::new(dir.clone())
                    .with_admin_url(args.admin_url.clone())
                    .detect();
                tracing::debug!(installed = status.installed, "commerce extension probe");
                status.installed
            }
            None => true,
        };
        let commerce_enabled = installed && snapshot.commerce.is_some();

        if !installed {
            if let Some(url) = snapshot.commerce().and_then(|c| c.activation_url()) {
                tracing::warn!(
                    activation_url = %url,
                    "commerce extension not installed, commerce rules disabled"
                );
            }
        }

        Ok(Self {
            snapshot,
            config,
            commerce_enabled,
        })
    }

    fn generator(&self) -> BreadcrumbGenerator<'_> {
        let commerce = if self.commerce_enabled {
            self.snapshot.commerce()
        } else {
            None
        };

        BreadcrumbGenerator::new(&self.snapshot)
            .with_config(self.config.clone())
            .with_commerce(commerce)
    }
}

fn run_trail(site_args: &SiteArgs, context: &Path, args: &Args) -> Result<()> {
    let site = LoadedSite::load(site_args)?;
    let ctx: PageContext = load_document(context)
        .with_context(|| format!("Failed to load page context {}", context.display()))?;

    let breadcrumb = site.generator().resolve(&ctx);

    let output = format_output(&breadcrumb, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())?;

    Ok(())
}

fn run_batch(
    site_args: &SiteArgs,
    contexts: &Path,
    threads: Option<usize>,
    args: &Args,
) -> Result<()> {
    let site = LoadedSite::load(site_args)?;
    let entries: Vec<NamedContext> = load_document(contexts)
        .with_context(|| format!("Failed to load page contexts {}", contexts.display()))?;

    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    // Show progress spinner
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Resolving {} contexts...", entries.len()));
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let trails: Vec<NamedBreadcrumb> = entries
        .par_iter()
        .map(|entry| NamedBreadcrumb {
            name: entry.name.clone(),
            breadcrumb: site.generator().resolve(&entry.context),
        })
        .collect();
    let report = BatchReport::new(trails, start.elapsed());

    // Finish spinner
    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Resolved {} contexts in {}ms",
            report.stats.total_contexts, report.metadata.duration_ms
        ));
    }

    let output = format_batch(&report, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())?;

    Ok(())
}

fn run_extension(plugins_dir: &Path, admin_url: &str, slug: &str, args: &Args) -> Result<()> {
    let status = ExtensionProbe::new(plugins_dir.to_path_buf())
        .with_slug(slug)
        .with_admin_url(admin_url)
        .detect();

    let output = match args.format {
        OutputFormatArg::Json | OutputFormatArg::Yaml => {
            format_value(&status, args.format.clone().into())?
        }
        OutputFormatArg::Ansi | OutputFormatArg::Summary => format_status_summary(slug, &status),
    };
    write_output(&output, args.output.as_ref())?;

    Ok(())
}

fn format_status_summary(slug: &str, status: &ExtensionStatus) -> String {
    match (&status.plugin_file, &status.activation_url) {
        (Some(file), Some(url)) => format!("{}: installed ({})\nActivate: {}", slug, file, url),
        _ => format!("{}: not installed", slug),
    }
}

/// Deserialize a JSON or YAML document, chosen by file extension
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}
