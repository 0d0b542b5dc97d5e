use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use xregistry::{
    ArtifactId, ArtifactType, FormatSelection, FsSourceConfig, IndexReport, RegistryFormat,
    index_fs, output,
};

/// Conventional registry source directory of a project.
pub const DEFAULT_SOURCE_DIR: &str = "src/main/xregistry";

/// Index and validate file-system registry trees.
#[derive(Debug, Parser)]
#[command(name = "xregistry", author, version, about, long_about = None)]
pub struct Cli {
    /// Registry root directory.
    #[arg(short, long, global = true, default_value = DEFAULT_SOURCE_DIR)]
    pub root: PathBuf,

    /// Registry layout.
    #[arg(long, global = true, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Report compact filenames that do not parse as problems instead of skipping them.
    #[arg(long, global = true)]
    pub report_unparseable: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Detect from the directory tree.
    Auto,
    Compact,
    Expanded,
}

impl From<FormatArg> for FormatSelection {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => Self::Auto,
            FormatArg::Compact => Self::Fixed(RegistryFormat::Compact),
            FormatArg::Expanded => Self::Fixed(RegistryFormat::Expanded),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk the registry and report problems. Exits non-zero on any problem.
    Validate(OutputArgs),
    /// List discovered artifacts.
    List(ListArgs),
    /// Print the content of one artifact.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only list artifacts of this type (policy, schema or rule).
    #[arg(long = "type")]
    pub artifact_type: Option<ArtifactType>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Artifact group.
    pub group: String,
    /// Artifact (resource) name.
    pub name: String,
    /// Artifact version, exactly as indexed.
    #[arg(value_name = "VERSION")]
    pub artifact_version: String,

    /// Look the artifact up among this type only.
    #[arg(long = "type")]
    pub artifact_type: Option<ArtifactType>,
}

impl Cli {
    fn source_config(&self) -> FsSourceConfig {
        let mut config = FsSourceConfig::new(self.root.clone());
        config.format = self.format.into();
        config.options.report_unparseable = self.report_unparseable;
        config
    }
}

/// Run the parsed command.
///
/// # Errors
///
/// Returns an error if output cannot be written or a requested artifact
/// cannot be found or read.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let report = index_fs(&cli.source_config());
    tracing::info!(
        outcome = ?report.outcome,
        artifacts = report.index.len(),
        problems = report.errors_count(),
        "registry indexed"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let ok = match &cli.command {
        Commands::Validate(args) => validate(&report, args, &mut out)?,
        Commands::List(args) => list(&report, args, &mut out)?,
        Commands::Show(args) => show(&report, args, cli, &mut out)?,
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn validate(report: &IndexReport, args: &OutputArgs, out: &mut dyn Write) -> Result<bool> {
    if args.json {
        output::write_json(report, false, out)?;
    } else {
        output::write_human(report, false, out)?;
    }
    Ok(report.is_ok())
}

fn list(report: &IndexReport, args: &ListArgs, out: &mut dyn Write) -> Result<bool> {
    let Some(wanted) = args.artifact_type else {
        if args.output.json {
            output::write_json(report, true, out)?;
        } else {
            output::write_human(report, true, out)?;
        }
        return Ok(report.is_ok());
    };

    let selected = report.index.entries().filter(|(ty, _, _)| *ty == wanted);

    if args.output.json {
        let entries: Vec<serde_json::Value> = selected
            .map(|(ty, id, content)| {
                serde_json::json!({
                    "type": ty.as_str(),
                    "group": id.group(),
                    "name": id.name(),
                    "version": id.version(),
                    "source": content.source(),
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        for (ty, id, _) in selected {
            writeln!(out, "{ty:<7} {id}")?;
        }
    }

    for error in &report.errors {
        eprintln!("{}", error.format_human_readable());
    }
    Ok(report.is_ok())
}

fn show(report: &IndexReport, args: &ShowArgs, cli: &Cli, out: &mut dyn Write) -> Result<bool> {
    let artifact = ArtifactId::new(&*args.group, &*args.name, &*args.artifact_version)?;
    let found = match args.artifact_type {
        Some(ty) => report.index.find(ty, &artifact),
        None => report.index.find_artifact(&artifact),
    };
    let Some(content) = found else {
        for error in &report.errors {
            eprintln!("{}", error.format_human_readable());
        }
        bail!("Artifact {artifact} not found in {}", cli.root.display());
    };

    let mut stream = content
        .open()
        .with_context(|| format!("Failed to open artifact {artifact}"))?;
    io::copy(&mut stream, out).with_context(|| format!("Failed to read artifact {artifact}"))?;
    out.flush()?;
    Ok(true)
}
