use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cardstyle", version)]
struct Cli {
    /// Studio config file (defaults to `$XDG_CONFIG_HOME/cardstyle/config.json`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a customization to its rendered model (JSON).
    Compile(CompileArgs),
    /// Render an HTML preview of a customization.
    Preview(PreviewArgs),
    /// Rewrite a stored customization in the current vocabulary.
    Migrate(MigrateArgs),
    /// Classify card text and print the derived background prompt.
    Classify(ClassifyArgs),
    /// Request one generated background and print the resulting patch.
    Generate(GenerateArgs),
    /// List templates, or print one as customization JSON.
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Customization JSON.
    #[arg(long)]
    spec: PathBuf,

    /// Card content JSON (`title`, `description`, `date`, `location`).
    #[arg(long)]
    content: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Customization JSON.
    #[arg(long)]
    spec: PathBuf,

    /// Card content JSON.
    #[arg(long)]
    content: PathBuf,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MigrateArgs {
    /// Stored customization JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the migrated JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    #[arg(long)]
    title: String,

    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[arg(long)]
    title: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Explicit prompt; derived from the title and description when omitted.
    #[arg(long)]
    prompt: Option<String>,

    /// Generator endpoint; falls back to `generation_endpoint` in the studio config.
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(Parser, Debug)]
struct TemplatesArgs {
    /// Template to print; lists every template when omitted.
    #[arg(long)]
    name: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let studio = match &cli.config {
        Some(path) => cardstyle::load_studio_config_from(path),
        None => cardstyle::load_studio_config(),
    };
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args, &studio),
        Command::Preview(args) => cmd_preview(args, &studio),
        Command::Migrate(args) => cmd_migrate(args),
        Command::Classify(args) => cmd_classify(args),
        Command::Generate(args) => cmd_generate(args, &studio),
        Command::Templates(args) => cmd_templates(args, &studio),
    }
}

fn read_spec(path: &Path) -> anyhow::Result<cardstyle::CustomizationSpec> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read spec '{}'", path.display()))?;
    let migrated = cardstyle::migrate_str(&text)
        .with_context(|| format!("parse spec '{}'", path.display()))?;
    for note in &migrated.notes {
        eprintln!("note: {note}");
    }
    Ok(migrated.spec)
}

fn read_content(path: &Path) -> anyhow::Result<cardstyle::CardContent> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read content '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse content '{}'", path.display()))
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_compile(args: CompileArgs, studio: &cardstyle::StudioConfig) -> anyhow::Result<()> {
    let spec = read_spec(&args.spec)?;
    let content = read_content(&args.content)?;
    let model = cardstyle::compile(&spec, &content, studio.unit_px);
    let json = serde_json::to_string_pretty(&model).context("serialize model")?;
    match args.out {
        Some(out) => write_output(&out, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn cmd_preview(args: PreviewArgs, studio: &cardstyle::StudioConfig) -> anyhow::Result<()> {
    let spec = read_spec(&args.spec)?;
    let content = read_content(&args.content)?;
    let session = cardstyle::EditingSession::new(
        spec,
        content,
        cardstyle::CssSurface::new(),
        studio.session_opts(),
    )?;
    let html = session.preview().surface().document().to_owned();
    write_output(&args.out, &html)
}

fn cmd_migrate(args: MigrateArgs) -> anyhow::Result<()> {
    let spec = read_spec(&args.in_path)?;
    let json = serde_json::to_string_pretty(&spec).context("serialize spec")?;
    write_output(&args.out, &json)
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let category = cardstyle::classify(&args.title, &args.description);
    println!("category: {category}");
    println!("prompt: {}", cardstyle::derive_prompt(category, &args.title));
    Ok(())
}

fn cmd_generate(args: GenerateArgs, studio: &cardstyle::StudioConfig) -> anyhow::Result<()> {
    let endpoint = args
        .endpoint
        .or_else(|| studio.generation_endpoint.clone())
        .context("no generator endpoint: pass --endpoint or set generation_endpoint")?;
    let generator = Arc::new(cardstyle::HttpBackgroundGenerator::new(endpoint)?);
    let prompt =
        cardstyle::resolve_prompt(args.prompt.as_deref(), &args.title, &args.description);
    eprintln!("prompt: {prompt}");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let timeout = Duration::from_secs(studio.generation_timeout_secs);

    let mut tracker = cardstyle::GenerationTracker::default();
    let request = tracker.submit();
    tracker.mark_pending(request)?;
    let outcome = runtime.block_on(cardstyle::run_generation(
        generator.as_ref(),
        request,
        &prompt,
        timeout,
    ));
    tracker.complete(outcome.request, &outcome.result);

    match outcome.result {
        cardstyle::GenerationResult::Succeeded { image_url } => {
            let patch = cardstyle::image_background_patch(&image_url);
            let json = serde_json::to_string_pretty(&patch).context("serialize patch")?;
            println!("{json}");
            Ok(())
        }
        cardstyle::GenerationResult::Failed { message } => {
            anyhow::bail!("background generation failed: {message}")
        }
    }
}

fn cmd_templates(args: TemplatesArgs, studio: &cardstyle::StudioConfig) -> anyhow::Result<()> {
    let catalog: Box<dyn cardstyle::TemplateCatalog> = match &studio.templates_dir {
        Some(dir) => Box::new(cardstyle::JsonDirTemplates::open(dir)?),
        None => Box::new(cardstyle::BuiltinTemplates),
    };
    match args.name {
        Some(name) => {
            let spec = catalog
                .template(&name)
                .with_context(|| format!("unknown template '{name}'"))?;
            let json = serde_json::to_string_pretty(&spec).context("serialize template")?;
            println!("{json}");
        }
        None => {
            for name in catalog.names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
