//! wrapgen command line
//!
//! Loads a parsed-header source model, resolves its version families and
//! reports or emits the resulting dispatch plan.

#![warn(missing_docs)]

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::{Path, PathBuf};
use wrapgen_capture::DispatchTable;
use wrapgen_family::{DispatchPlan, FamilyResolver, GenerationConfig};
use wrapgen_model::{enum_to_text, Iid, InterfaceGraph, InterfaceNames, SourceModel};

/// Default log filter when neither `--log` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Command line definition
#[must_use]
pub fn command() -> Command {
    let model = || {
        Arg::new("model")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Source model (.json, .yaml or .yml)")
    };

    Command::new("wrapgen")
        .version(wrapgen_family::VERSION)
        .about("Interface family analysis and wrapper dispatch generation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Generation config (TOML)"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Log filter, e.g. `wrapgen_family=debug`"),
        )
        .subcommand(
            Command::new("validate")
                .about("Check that the model's families are well formed")
                .arg(model()),
        )
        .subcommand(
            Command::new("families")
                .about("List leaves and their version chains")
                .arg(model()),
        )
        .subcommand(
            Command::new("plan")
                .about("Emit the dispatch plan as JSON")
                .arg(model())
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print JSON"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write to file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("iid")
                .about("Print the symbolic name of an interface id")
                .arg(model())
                .arg(Arg::new("iid").required(true).help("Interface id, braces optional")),
        )
        .subcommand(
            Command::new("enum")
                .about("Print the symbolic name of an enum value")
                .arg(model())
                .arg(Arg::new("type").required(true).help("Enum type name"))
                .arg(
                    Arg::new("value")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                        .help("Numeric value"),
                ),
        )
}

/// Install the global tracing subscriber
///
/// `filter` takes precedence over `RUST_LOG`.
pub fn init_tracing(filter: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    // Ignore a second install, e.g. from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run parsed command line, writing results to `out`
///
/// # Errors
/// Returns any load, parse, resolution or output error
pub fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let config = load_config(matches.get_one::<PathBuf>("config"))?;

    match matches.subcommand() {
        Some(("validate", args)) => validate(&model_path(args)?, &config, out),
        Some(("families", args)) => families(&model_path(args)?, &config, out),
        Some(("plan", args)) => plan(
            &model_path(args)?,
            &config,
            args.get_flag("pretty"),
            args.get_one::<PathBuf>("output").map(PathBuf::as_path),
            out,
        ),
        Some(("iid", args)) => {
            let text = args.get_one::<String>("iid").context("missing interface id")?;
            iid(&model_path(args)?, text, out)
        }
        Some(("enum", args)) => {
            let name = args.get_one::<String>("type").context("missing enum type")?;
            let value = *args.get_one::<i64>("value").context("missing enum value")?;
            enum_text(&model_path(args)?, name, value, out)
        }
        Some((other, _)) => bail!("unknown subcommand `{other}`"),
        None => bail!("no subcommand given"),
    }
}

fn model_path(args: &ArgMatches) -> Result<PathBuf> {
    args.get_one::<PathBuf>("model").cloned().context("missing model path")
}

fn load_config(path: Option<&PathBuf>) -> Result<GenerationConfig> {
    match path {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GenerationConfig::default()),
    }
}

fn load_graph(path: &Path) -> Result<(SourceModel, InterfaceGraph)> {
    let source = SourceModel::load(path).with_context(|| format!("failed to load model {}", path.display()))?;
    let graph = InterfaceGraph::from_source(&source);
    tracing::info!(path = %path.display(), interfaces = graph.len(), "loaded interface graph");
    Ok((source, graph))
}

fn validate(path: &Path, config: &GenerationConfig, out: &mut dyn Write) -> Result<()> {
    let (_, graph) = load_graph(path)?;
    let table = DispatchTable::generate(&graph, config).context("model has malformed families")?;

    writeln!(
        out,
        "ok: {} interfaces, {} families, {} dispatchable ids",
        graph.len(),
        table.families().count(),
        table.len()
    )?;
    Ok(())
}

fn families(path: &Path, config: &GenerationConfig, out: &mut dyn Write) -> Result<()> {
    let (_, graph) = load_graph(path)?;
    let families = FamilyResolver::new(&graph, config)
        .resolve()
        .context("model has malformed families")?;

    for family in &families {
        writeln!(out, "{}: {}", config.constructor_name(family.base()), family.names().join(" -> "))?;
    }
    Ok(())
}

fn plan(
    path: &Path,
    config: &GenerationConfig,
    pretty: bool,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let (_, graph) = load_graph(path)?;
    let plan = DispatchPlan::generate(&graph, config).context("model has malformed families")?;
    let json = plan.to_json(pretty)?;

    match output {
        Some(file) => {
            std::fs::write(file, json).with_context(|| format!("failed to write {}", file.display()))?;
            tracing::info!(path = %file.display(), "wrote dispatch plan");
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

fn iid(path: &Path, text: &str, out: &mut dyn Write) -> Result<()> {
    let iid: Iid = text.parse().with_context(|| format!("invalid interface id `{text}`"))?;
    let (source, _) = load_graph(path)?;

    let names = InterfaceNames::from_source(&source);
    writeln!(out, "{}", names.iid_to_text(&iid))?;
    Ok(())
}

fn enum_text(path: &Path, name: &str, value: i64, out: &mut dyn Write) -> Result<()> {
    let (source, _) = load_graph(path)?;
    let Some(decl) = source.find_enum(name) else {
        bail!("no enum named `{name}` in {}", path.display());
    };
    writeln!(out, "{}", enum_to_text(decl, value))?;
    Ok(())
}
