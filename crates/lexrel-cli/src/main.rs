//! Lexrel command line: score parsed court-judgment relations against
//! labeled ground truth, and check inputs for duplicate rows.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};

use lexrel_core::{
    Diagnostics, MissingTextPolicy, RelationSets, RelationTable, Severity, build_sets, compare,
    group, render_diff,
};

mod report;

use report::{CategoryScore, render_table};

#[derive(Parser)]
#[command(name = "lexrel", version, about = "Court-judgment relation extraction scoring")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a parsed relation file against labeled ground truth.
    Eval(EvalArgs),
    /// Report rows that repeat verbatim in a CSV file.
    CheckDuplicates(CheckDuplicatesArgs),
}

#[derive(Args)]
struct EvalArgs {
    /// Labeled annotation CSV (ground truth).
    #[arg(short, long, env = "LEXREL_ANNOTATION")]
    annotation: PathBuf,

    /// Parsed annotation CSV under evaluation.
    #[arg(short, long, env = "LEXREL_PARSED")]
    parsed: PathBuf,

    /// Treat the inputs as flat annotation rows and transform them into
    /// relation tables first (otherwise they must already be normalized).
    #[arg(short, long)]
    transform: bool,

    /// Drop parsed relations for documents absent from the labeled table.
    #[arg(long)]
    skip_unlabeled_docs: bool,

    /// Directory for the persisted relation tables and the diff report.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Raw source-text index CSV; enables the payment diff report.
    #[arg(long)]
    text: Option<PathBuf>,

    /// What to do when a mismatched key has no source text.
    #[arg(long, value_enum, default_value = "fail")]
    on_missing_text: OnMissingText,

    /// Emit the score reports as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnMissingText {
    Fail,
    Skip,
}

impl From<OnMissingText> for MissingTextPolicy {
    fn from(v: OnMissingText) -> Self {
        match v {
            OnMissingText::Fail => MissingTextPolicy::Fail,
            OnMissingText::Skip => MissingTextPolicy::Skip,
        }
    }
}

#[derive(Args)]
struct CheckDuplicatesArgs {
    /// CSV file to scan.
    #[arg(short, long)]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("lexrel v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Eval(args) => run_eval(args),
        Command::CheckDuplicates(args) => run_check_duplicates(args),
    }
}

fn run_eval(args: EvalArgs) -> anyhow::Result<()> {
    let mut diags = Diagnostics::new();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    // 1. Load both tables, transforming flat rows when asked.
    let labeled = load_table(&args.annotation, args.transform, &mut diags)
        .with_context(|| format!("loading labeled table {}", args.annotation.display()))?;
    let mut parsed = load_table(&args.parsed, args.transform, &mut diags)
        .with_context(|| format!("loading parsed table {}", args.parsed.display()))?;

    // 2. Optionally drop parsed relations for documents never labeled.
    if args.skip_unlabeled_docs {
        let labeled_docs = labeled.document_ids();
        let before = parsed.len();
        parsed.retain_documents(&labeled_docs);
        info!(dropped = before - parsed.len(), "skipped unlabeled documents");
    }

    // 3. Persist the normalized interchange tables.
    if args.transform {
        lexrel_store::write_relation_table(&args.out_dir.join("annotation_relations.csv"), &labeled)?;
        lexrel_store::write_relation_table(&args.out_dir.join("parsed_relations.csv"), &parsed)?;
    }

    // 4. Project relation sets under both modes.
    let labeled_name = file_name(&args.annotation);
    let parsed_name = file_name(&args.parsed);
    let truth_exact = build_sets(&labeled, false, &labeled_name, &mut diags);
    let pred_exact = build_sets(&parsed, false, &parsed_name, &mut diags);
    let truth_loose = build_sets(&labeled, true, &labeled_name, &mut diags);
    let pred_loose = build_sets(&parsed, true, &parsed_name, &mut diags);

    // 5. Score payment, fee, and union, each under both modes.
    let scores = score_all(&pred_exact, &truth_exact, &pred_loose, &truth_loose);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else {
        print!("{}", render_table(&scores));
    }

    // 6. Render the payment diff when a text index was supplied.
    if let Some(text_path) = &args.text {
        let texts = lexrel_store::read_text_index(text_path)?;
        let diff = render_diff(
            &pred_exact.payment,
            &truth_exact.payment,
            &parsed,
            &labeled,
            &texts,
            args.on_missing_text.into(),
            &mut diags,
        )
        .context("rendering payment diff")?;
        let diff_path = args.out_dir.join("payment_diff.txt");
        std::fs::write(&diff_path, &diff)
            .with_context(|| format!("writing {}", diff_path.display()))?;
        info!(path = %diff_path.display(), "wrote payment diff report");
    }

    // 7. Drain diagnostics into the log.
    for d in diags.iter() {
        match d.severity {
            Severity::Warning => warn!(context = %d.context, "{}", d.message),
            Severity::Error => error!(context = %d.context, "{}", d.message),
        }
    }

    Ok(())
}

/// Read one input as a relation table: either transform flat annotation
/// rows or take an already-normalized table as-is.
fn load_table(path: &Path, transform: bool, diags: &mut Diagnostics) -> anyhow::Result<RelationTable> {
    if transform {
        let rows = lexrel_store::read_annotation_rows(path)?;
        Ok(RelationTable::from_relations(group(&rows, diags)))
    } else {
        Ok(lexrel_store::read_relation_table(path)?)
    }
}

fn score_all(
    pred_exact: &RelationSets,
    truth_exact: &RelationSets,
    pred_loose: &RelationSets,
    truth_loose: &RelationSets,
) -> Vec<CategoryScore> {
    vec![
        CategoryScore::new("payment", "exact", compare(&pred_exact.payment, &truth_exact.payment)),
        CategoryScore::new("fee", "exact", compare(&pred_exact.fee, &truth_exact.fee)),
        CategoryScore::new("union", "exact", compare(&pred_exact.union(), &truth_exact.union())),
        CategoryScore::new(
            "payment",
            "ignore-type",
            compare(&pred_loose.payment, &truth_loose.payment),
        ),
        CategoryScore::new("fee", "ignore-type", compare(&pred_loose.fee, &truth_loose.fee)),
        CategoryScore::new(
            "union",
            "ignore-type",
            compare(&pred_loose.union(), &truth_loose.union()),
        ),
    ]
}

fn run_check_duplicates(args: CheckDuplicatesArgs) -> anyhow::Result<()> {
    let report = lexrel_store::find_duplicates(&args.input)
        .with_context(|| format!("scanning {}", args.input.display()))?;

    println!(
        "{}: {} rows, {} distinct, {} duplicate",
        args.input.display(),
        report.total_rows,
        report.distinct_rows,
        report.duplicate_rows()
    );
    for (fields, count) in &report.duplicates {
        println!("  {count}x {}", fields.join(","));
    }
    Ok(())
}

/// File name for diagnostics context, falling back to the full path.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
