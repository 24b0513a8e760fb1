use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rmgarbage::pipeline::{
    classify_files, clean_files, collect_text_files, ClassifiedFile, CleanedFile,
};
use rmgarbage::{CleanConfig, GarbageClassifier, Granularity, TextCleaner, Verdict};

#[derive(Debug, Parser)]
#[command(author, version, about = "Remove garbage strings from OCR text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify the given strings
    Check(CheckArgs),
    /// Print the input with garbage removed
    Clean(InputArgs),
    /// Print the rule that rejected each candidate, as JSON lines
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Strings to classify
    #[arg(required = true)]
    text: Vec<String>,

    /// Print one JSON object per string
    #[arg(long)]
    json: bool,

    /// Path to configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Transcript file or directory; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Classify whitespace-separated words instead of whole lines
    #[arg(long)]
    words: bool,

    /// Classify on all cores
    #[arg(long)]
    parallel: bool,

    /// File extensions to pick up when the input is a directory
    #[arg(long = "ext", default_value = "txt", value_delimiter = ',')]
    extensions: Vec<String>,
}

#[derive(Debug, Args)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Also report clean candidates
    #[arg(long)]
    all: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the cleaned text
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => check_command(args),
        Commands::Clean(args) => clean_command(args),
        Commands::Inspect(args) => inspect_command(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<CleanConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            CleanConfig::load(path)
        }
        None => Ok(CleanConfig::default()),
    }
}

fn build_cleaner(args: &InputArgs) -> Result<TextCleaner> {
    let mut config = load_config(args.config.as_ref())?;
    if args.words {
        config.granularity = Granularity::Word;
    }
    config.parallel |= args.parallel;

    TextCleaner::from_config(&config).with_context(|| "Invalid cleaning configuration")
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .with_context(|| "Failed to read stdin")?;
    Ok(text)
}

/// Read the input named by `args`: every matching file, or stdin
fn read_input(args: &InputArgs, cleaner: &TextCleaner) -> Result<Vec<CleanedFile>> {
    match &args.input {
        Some(input) => {
            let files = collect_text_files(input, &args.extensions)?;
            if files.is_empty() {
                anyhow::bail!("No transcript files found in {:?}", input);
            }

            let (results, totals) = clean_files(&files, cleaner)?;
            info!(
                "Summary: {} units, {} kept, {} rejected {:?}",
                totals.units, totals.kept, totals.rejected, totals.by_rule
            );
            Ok(results)
        }
        None => {
            let cleaned = cleaner.clean(&read_stdin()?);
            let stats = &cleaned.stats;
            info!(
                "Summary: {} units, {} kept, {} rejected {:?}",
                stats.units, stats.kept, stats.rejected, stats.by_rule
            );
            Ok(vec![CleanedFile {
                path: PathBuf::from("-"),
                cleaned,
            }])
        }
    }
}

fn check_command(args: CheckArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let classifier = GarbageClassifier::with_config(config.rules)
        .with_context(|| "Invalid rule configuration")?;

    let mut out = BufWriter::new(io::stdout().lock());
    for text in &args.text {
        let verdict = classifier.classify(text);
        if args.json {
            let record = serde_json::json!({
                "text": text,
                "verdict": verdict,
                "code": verdict.reason().map(|r| r.code().to_string()),
                "description": verdict.reason().map(|r| r.description()),
            });
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        } else {
            writeln!(out, "{}\t{}", verdict, text)?;
        }
    }
    out.flush()?;

    Ok(())
}

fn clean_command(args: InputArgs) -> Result<()> {
    let cleaner = build_cleaner(&args)?;
    let results = read_input(&args, &cleaner)?;

    let mut out = BufWriter::new(io::stdout().lock());
    for file in results.iter().filter(|file| !file.cleaned.lines.is_empty()) {
        writeln!(out, "{}", file.cleaned.text())?;
    }
    out.flush()?;

    Ok(())
}

fn inspect_command(args: InspectArgs) -> Result<()> {
    let cleaner = build_cleaner(&args.input)?;

    let mut out = BufWriter::new(io::stdout().lock());
    if args.all {
        // every unit, clean ones included
        for file in classify_input(&args.input, &cleaner)? {
            for unit in &file.units {
                write_record(&mut out, &file.path, unit.line_no, &unit.text, unit.verdict)?;
            }
        }
    } else {
        for file in read_input(&args.input, &cleaner)? {
            for rejection in &file.cleaned.rejections {
                write_record(
                    &mut out,
                    &file.path,
                    rejection.line_no,
                    &rejection.text,
                    Verdict::Garbage(rejection.rule),
                )?;
            }
        }
    }
    out.flush()?;

    Ok(())
}

fn classify_input(args: &InputArgs, cleaner: &TextCleaner) -> Result<Vec<ClassifiedFile>> {
    match &args.input {
        Some(input) => {
            let files = collect_text_files(input, &args.extensions)?;
            if files.is_empty() {
                anyhow::bail!("No transcript files found in {:?}", input);
            }
            classify_files(&files, cleaner)
        }
        None => Ok(vec![ClassifiedFile {
            path: PathBuf::from("-"),
            units: cleaner.classify_text(&read_stdin()?),
        }]),
    }
}

fn write_record(
    out: &mut impl Write,
    path: &std::path::Path,
    line_no: usize,
    text: &str,
    verdict: Verdict,
) -> Result<()> {
    let record = serde_json::json!({
        "file": path.display().to_string(),
        "line": line_no,
        "text": text,
        "rule": verdict.reason(),
        "code": verdict.reason().map(|r| r.code().to_string()),
    });
    writeln!(out, "{}", serde_json::to_string(&record)?)?;
    Ok(())
}
