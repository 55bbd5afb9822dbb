//! improb - decision making under imprecise probability
//!
//! The main entry point, handling:
//! - Problem evaluation (previsions, Gamma-maxi sets, maximality, E-admissibility)
//! - Problem validation
//! - Settings inspection and presets
//! - Shell completions

use clap::{Args, CommandFactory, Parser, Subcommand};
use ip_common::{format_error_human, Error, OutputFormat, StructuredError, SCHEMA_VERSION};
use ip_core::config::{list_presets, load_config, ConfigOptions, PresetName, ResolvedConfig};
use ip_core::credal::Criterion;
use ip_core::exit_codes::ExitCode;
use ip_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage,
};
use ip_core::Problem;
use std::io::IsTerminal;
use std::path::PathBuf;

/// improb - evaluate decision criteria over a credal set
#[derive(Parser)]
#[command(name = "improb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Settings file (JSON or TOML)
    #[arg(long, global = true, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Use a named tolerance preset instead of a settings file
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<PresetName>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every decision criterion for a problem file
    Evaluate(EvaluateArgs),

    /// Validate a problem file without evaluating it
    Check(CheckArgs),

    /// Settings inspection
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Problem file (.json or .toml)
    problem: PathBuf,

    /// Only report the acts selected by this criterion
    #[arg(long, value_enum)]
    criterion: Option<Criterion>,

    /// Hurwicz optimism coefficient in [0, 1]
    #[arg(long)]
    optimism: Option<f64>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Problem file (.json or .toml)
    problem: PathBuf,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved settings and where they came from
    Show,
    /// List the built-in presets
    Presets,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Target shell
    shell: clap_complete::Shell,
}

fn parse_preset(s: &str) -> Result<PresetName, String> {
    s.parse::<PresetName>().map_err(|e| e.to_string())
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            return code.into();
        }
    };

    let cli_level = if cli.global.verbose > 0 || cli.global.quiet {
        Some(LogLevel::Warn.adjusted(cli.global.verbose, u8::from(cli.global.quiet)))
    } else {
        None
    };
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let ctx = LogContext::new(generate_run_id());
    ctx.debug(event_names::RUN_STARTED, Stage::Init, "improb started")
        .with_field("version", env!("CARGO_PKG_VERSION"))
        .emit();

    let exit_code = match &cli.command {
        Commands::Evaluate(args) => run_evaluate(&cli.global, &ctx, args),
        Commands::Check(args) => run_check(&cli.global, &ctx, args),
        Commands::Config(args) => run_config(&cli.global, &ctx, args),
        Commands::Completions(args) => run_completions(args),
    };

    ctx.debug(event_names::RUN_FINISHED, Stage::Report, "improb finished")
        .with_field("exit_code", exit_code.as_i32())
        .with_field("success", exit_code.is_success())
        .emit();

    exit_code.into()
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_evaluate(global: &GlobalOpts, ctx: &LogContext, args: &EvaluateArgs) -> ExitCode {
    let config = match resolve_settings(global, ctx) {
        Ok(config) => config,
        Err(err) => return output_error(global, ctx, &err),
    };
    let problem = match load_problem(ctx, &args.problem) {
        Ok(problem) => problem,
        Err(err) => return output_error(global, ctx, &err),
    };

    let mut settings = config.settings.clone();
    if let Some(optimism) = args.optimism {
        settings.hurwicz.optimism = optimism;
    }

    ctx.debug(event_names::EVALUATE_STARTED, Stage::Evaluate, "evaluating criteria")
        .with_field("acts", problem.acts.len())
        .with_field("pmfs", problem.pmfs.len())
        .emit();

    let report = match problem.evaluate(&settings) {
        Ok(report) => report,
        Err(err) => {
            ctx.warn(event_names::PROBLEM_INVALID, Stage::Evaluate, err.to_string())
                .with_field("code", err.code())
                .emit();
            return output_error(global, ctx, &err);
        }
    };

    ctx.info(event_names::EVALUATE_FINISHED, Stage::Evaluate, "criteria evaluated")
        .with_field("acts", report.acts)
        .emit();

    let header = envelope(ctx, &config, &args.problem);

    match (args.criterion, global.format) {
        (Some(criterion), OutputFormat::Json) => {
            let mut response = header;
            response["selection"] = serde_json::json!(report.selection(criterion));
            print_json(&response);
        }
        (Some(criterion), OutputFormat::Md) => {
            let selection = report.selection(criterion);
            println!("# {}\n", criterion);
            println!("{}\n", criterion.description());
            for (i, label) in selection.indices.iter().zip(&selection.labels) {
                println!("- {} (act {})", label, i);
            }
        }
        (Some(criterion), OutputFormat::Summary) => {
            println!("{} {}", criterion, report.selection(criterion).labels.join(" "));
        }
        (None, OutputFormat::Json) => {
            let mut response = header;
            response["report"] = serde_json::json!(report);
            print_json(&response);
        }
        (None, OutputFormat::Md) => print!("{}", report.to_markdown()),
        (None, OutputFormat::Summary) => print!("{}", report.to_summary()),
    }

    ExitCode::Clean
}

fn run_check(global: &GlobalOpts, ctx: &LogContext, args: &CheckArgs) -> ExitCode {
    let config = match resolve_settings(global, ctx) {
        Ok(config) => config,
        Err(err) => return output_error(global, ctx, &err),
    };
    let checked = load_problem(ctx, &args.problem)
        .and_then(|problem| problem.check(&config.settings));
    let (engine, acts) = match checked {
        Ok(pair) => pair,
        Err(err) => return output_error(global, ctx, &err),
    };

    match global.format {
        OutputFormat::Json => {
            let mut response = envelope(ctx, &config, &args.problem);
            response["status"] = serde_json::json!("ok");
            response["pmfs"] = serde_json::json!(engine.pmfs().len());
            response["outcomes"] = serde_json::json!(engine.pmfs().outcomes());
            response["acts"] = serde_json::json!(acts.len());
            print_json(&response);
        }
        OutputFormat::Md => {
            println!("# Problem check\n");
            println!("| Field | Value |");
            println!("|-------|-------|");
            println!("| status | ok |");
            println!("| pmfs | {} |", engine.pmfs().len());
            println!("| outcomes | {} |", engine.pmfs().outcomes());
            println!("| acts | {} |", acts.len());
        }
        OutputFormat::Summary => {
            println!(
                "ok: {} pmfs, {} outcomes, {} acts",
                engine.pmfs().len(),
                engine.pmfs().outcomes(),
                acts.len()
            );
        }
    }

    ExitCode::Clean
}

fn run_config(global: &GlobalOpts, ctx: &LogContext, args: &ConfigArgs) -> ExitCode {
    match args.command {
        ConfigCommands::Show => {
            let config = match resolve_settings(global, ctx) {
                Ok(config) => config,
                Err(err) => return output_error(global, ctx, &err),
            };
            let snapshot = config.snapshot();
            match global.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "schema_version": SCHEMA_VERSION,
                    "config": snapshot,
                    "settings": config.settings,
                })),
                OutputFormat::Md => {
                    let t = &config.settings.tolerances;
                    println!("# Settings\n");
                    println!("Source: {}\n", snapshot.source);
                    println!("| Setting | Value |");
                    println!("|---------|-------|");
                    println!("| tolerances.normalization | {:e} |", t.normalization);
                    println!("| tolerances.optimality | {:e} |", t.optimality);
                    println!("| tolerances.dominance | {:e} |", t.dominance);
                    println!("| tolerances.robust_bayes | {:e} |", t.robust_bayes);
                    println!("| hurwicz.optimism | {} |", config.settings.hurwicz.optimism);
                }
                OutputFormat::Summary => {
                    let t = &config.settings.tolerances;
                    println!(
                        "{}: normalization={:e} optimality={:e} dominance={:e} robust_bayes={:e} optimism={}",
                        snapshot.source,
                        t.normalization,
                        t.optimality,
                        t.dominance,
                        t.robust_bayes,
                        config.settings.hurwicz.optimism
                    );
                }
            }
        }
        ConfigCommands::Presets => {
            let presets = list_presets();
            match global.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "schema_version": SCHEMA_VERSION,
                    "presets": presets,
                })),
                OutputFormat::Md => {
                    println!("| Preset | Description |");
                    println!("|--------|-------------|");
                    for p in &presets {
                        println!("| {} | {} |", p.name, p.description);
                    }
                }
                OutputFormat::Summary => {
                    for p in &presets {
                        println!("{:<8} {}", p.name, p.description);
                    }
                }
            }
        }
    }
    ExitCode::Clean
}

fn run_completions(args: &CompletionsArgs) -> ExitCode {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "improb", &mut std::io::stdout());
    ExitCode::Clean
}

// ============================================================================
// Helpers
// ============================================================================

fn resolve_settings(global: &GlobalOpts, ctx: &LogContext) -> Result<ResolvedConfig, Error> {
    let options = ConfigOptions {
        settings_path: global.config.clone(),
        preset: global.preset,
    };
    match load_config(&options) {
        Ok(config) => {
            let event = if config.settings_path.is_some() || config.preset.is_some() {
                event_names::CONFIG_LOADED
            } else {
                event_names::CONFIG_DEFAULT_USED
            };
            ctx.debug(event, Stage::Init, "settings resolved")
                .with_field("source", config.snapshot().source)
                .emit();
            Ok(config)
        }
        Err(err) => {
            ctx.error(event_names::CONFIG_ERROR, Stage::Init, err.to_string())
                .emit();
            Err(err.into())
        }
    }
}

fn load_problem(ctx: &LogContext, path: &std::path::Path) -> Result<Problem, Error> {
    let problem = Problem::from_file(path)?;
    ctx.debug(event_names::PROBLEM_LOADED, Stage::Load, "problem file loaded")
        .with_field("path", path.display().to_string())
        .emit();
    Ok(problem)
}

fn envelope(ctx: &LogContext, config: &ResolvedConfig, problem: &std::path::Path) -> serde_json::Value {
    serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "run_id": ctx.run_id,
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "problem": problem.display().to_string(),
        "config": config.snapshot(),
    })
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("failed to serialize output: {}", err),
    }
}

fn output_error(global: &GlobalOpts, ctx: &LogContext, error: &Error) -> ExitCode {
    let exit_code = ExitCode::for_error(error);
    if exit_code.is_internal_error() {
        ctx.error(event_names::INTERNAL_ERROR, Stage::Report, error.to_string())
            .with_field("exit_code", exit_code.code_name())
            .with_field("recoverable", error.is_recoverable())
            .emit();
    }
    match global.format {
        OutputFormat::Json => {
            let structured = StructuredError::from(error).with_context("exit_code", exit_code.code_name());
            eprintln!("{}", structured.to_json_pretty());
        }
        _ => {
            eprintln!("{}", format_error_human(error, std::io::stderr().is_terminal()));
        }
    }
    exit_code
}
