mod input;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use signature_core::{extract_values, output_format, render_prompt, Signature};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Signature source, e.g. "question -> answer, confidence:number"
    #[arg(short, long, conflicts_with = "manifest")]
    signature: Option<String>,

    /// Path to a signature manifest (Markdown with YAML frontmatter)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Task description for an inline signature
    #[arg(short, long)]
    description: Option<String>,

    /// Completion file to extract from ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    completion: PathBuf,

    /// Print the normalized fields instead of extracting
    #[arg(long, conflicts_with = "render")]
    describe: bool,

    /// Print the prompt for the given inputs instead of extracting
    #[arg(long)]
    render: bool,

    /// Input values for --render, as name=value
    #[arg(short, long = "input", value_name = "NAME=VALUE")]
    inputs: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let signature = input::load_signature(
        args.signature.as_deref(),
        args.manifest.as_deref(),
        args.description.as_deref(),
    )?;

    if args.describe {
        return print_json(&describe(&signature), args.pretty);
    }

    if args.render {
        return render(&signature, &args.inputs);
    }

    let completion = input::read_completion(&args.completion)?;

    match extract_values(&signature, &completion) {
        Ok(values) => print_json(&values, args.pretty),
        Err(err) => report::report_extraction_failure(&signature, &err),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn describe(signature: &Signature) -> serde_json::Value {
    serde_json::json!({
        "description": signature.description(),
        "inputs": signature.input_fields(),
        "outputs": signature.output_fields(),
    })
}

fn render(signature: &Signature, pairs: &[String]) -> Result<()> {
    if pairs.is_empty() {
        println!("{}", output_format(signature));
        return Ok(());
    }

    let inputs = input::parse_inputs(pairs)?;
    let prompt = render_prompt(signature, &inputs).context("Failed to render prompt")?;
    println!("{}", prompt);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
