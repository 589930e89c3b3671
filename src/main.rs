use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use log::{info, warn};
use synth_engine::{SynthesizeError, examples_io};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesizes a shape predicate from a JSON file of `[x, y, inside]` examples.
    Shape {
        path: PathBuf,
        #[arg(long, default_value_t = 5)]
        max_iterations: usize,
    },
    /// Synthesizes a string transformation from a JSON file of `[input, expected]` examples.
    String {
        path: PathBuf,
        #[arg(long, default_value_t = 5)]
        max_iterations: usize,
        #[arg(long)]
        accumulate: bool,
        /// Use the LLM-backed synthesizer instead of enumeration (requires the `llm` feature).
        #[arg(long)]
        llm: bool,
        #[arg(long, default_value = "http://localhost:8000/complete")]
        llm_endpoint: String,
        #[arg(long)]
        llm_log: Option<PathBuf>,
    },
}

fn parse_or_readline() -> anyhow::Result<Cli> {
    if std::env::args_os().len() > 1 {
        return Ok(Cli::parse());
    }

    let mut cmd = Cli::command().no_binary_name(true);

    println!("No CLI arguments were provided");
    println!("Specify arguments via stdin:");
    println!("{}", cmd.render_long_help());

    std::io::stdout().flush().context("could not write to stdout")?;
    let mut buffer = String::new();
    std::io::stdin().read_line(&mut buffer).context("could not read stdin")?;

    let args = shlex::split(buffer.trim()).context("invalid quoting")?;
    let matches = cmd.try_get_matches_from(args).context("failed to parse args")?;

    Cli::from_arg_matches(&matches).context("failed to parse args")
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = parse_or_readline()?;

    match args.cmd {
        Command::Shape { path, max_iterations } => {
            let examples =
                examples_io::load_shape_examples(&path).map_err(report_malformed_input)?;
            match synth_engine::synthesize_shape(&examples, max_iterations) {
                Ok(expr) => {
                    println!("{expr:?}");
                    Ok(())
                }
                Err(err) => report_synthesize_failure(err),
            }
        }
        Command::String { path, max_iterations, accumulate, llm, llm_endpoint, llm_log } => {
            let examples =
                examples_io::load_string_examples(&path).map_err(report_malformed_input)?;

            if llm {
                return run_llm(&examples, &llm_endpoint, llm_log);
            }

            match synth_engine::synthesize_string(&examples, max_iterations, accumulate) {
                Ok(expr) => {
                    println!("{expr:?}");
                    Ok(())
                }
                Err(err) => report_synthesize_failure(err),
            }
        }
    }
}

#[cfg(feature = "llm")]
fn run_llm(
    examples: &[synth_engine::StringExample],
    endpoint: &str,
    log_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut synth = synth_engine::llm::LlmStringSynthesizer::new(endpoint);
    if let Some(log_path) = log_path {
        synth = synth.with_log(log_path);
    }
    match synth.synthesize(examples) {
        Ok(expr) => {
            println!("{expr:?}");
            Ok(())
        }
        Err(err) => {
            warn!("LLM synthesis failed: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "llm"))]
fn run_llm(
    _examples: &[synth_engine::StringExample],
    _endpoint: &str,
    _log_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    anyhow::bail!("this binary was built without the `llm` feature")
}

fn report_malformed_input(err: anyhow::Error) -> anyhow::Error {
    warn!("{err:#}");
    std::process::exit(2);
}

fn report_synthesize_failure(err: SynthesizeError) -> anyhow::Result<()> {
    match err {
        SynthesizeError::ExhaustedBudget { iterations } => {
            info!("no correct expression found within {iterations} iteration(s)");
            std::process::exit(1);
        }
        SynthesizeError::EmptyExamples => {
            warn!("{err}");
            std::process::exit(2);
        }
    }
}
