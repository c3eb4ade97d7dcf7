//! Evograph CLI - evolution charts from function-score workbooks
//!
//! Stands in for the interactive front end: reads a workbook, resolves the
//! color policy against saved preferences, builds the chart model, and writes
//! it out as JSON for a rendering backend.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use evograph::prelude::*;
use evograph::{ParsedTable, DEFAULT_DETECTION_ORDER};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "evograph")]
#[command(
    author,
    version,
    about = "Evolution chart generator for function-score workbooks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a workbook parses: layout, series, rows, embedded colors
    Info {
        /// Input workbook (xlsx)
        input: PathBuf,

        /// Sheet index to read (0-based)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Sheet name to read (overrides --sheet)
        #[arg(long)]
        sheet_name: Option<String>,
    },

    /// List the series names of a workbook, one per line
    Series {
        /// Input workbook (xlsx)
        input: PathBuf,

        /// Sheet index to read (0-based)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Sheet name to read (overrides --sheet)
        #[arg(long)]
        sheet_name: Option<String>,
    },

    /// Build a chart model and write it as JSON
    Chart {
        /// Input workbook (xlsx)
        input: PathBuf,

        /// Chart type
        #[arg(short, long, value_enum, default_value_t = KindArg::Line)]
        kind: KindArg,

        /// Chart title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Series to plot (comma-separated); defaults to the saved
        /// selection, then to all series
        #[arg(long, value_delimiter = ',')]
        series: Vec<String>,

        /// Sheet index to read (0-based)
        #[arg(long, default_value = "0")]
        sheet: usize,

        /// Sheet name to read (overrides --sheet)
        #[arg(long)]
        sheet_name: Option<String>,

        /// Preference document to load (and save with --save-prefs)
        #[arg(long)]
        prefs: Option<PathBuf>,

        /// Widen the Y axis to -0.5..5.5
        #[arg(long)]
        padded_y: bool,

        /// Tick label wrapping rule
        #[arg(long, value_enum, default_value_t = WrapArg::FirstSpace)]
        wrap: WrapArg,

        /// Output file for the chart model JSON (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Persist the effective selection and preferences back to --prefs
        #[arg(long)]
        save_prefs: bool,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum KindArg {
    Line,
    Bar,
    Scatter,
    Area,
}

impl From<KindArg> for ChartKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Line => ChartKind::Line,
            KindArg::Bar => ChartKind::Bar,
            KindArg::Scatter => ChartKind::Scatter,
            KindArg::Area => ChartKind::Area,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum WrapArg {
    FirstSpace,
    Alternating,
}

impl From<WrapArg> for TickWrapPolicy {
    fn from(wrap: WrapArg) -> Self {
        match wrap {
            WrapArg::FirstSpace => TickWrapPolicy::FirstSpace,
            WrapArg::Alternating => TickWrapPolicy::Alternating,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info {
            input,
            sheet,
            sheet_name,
        } => show_info(&input, sheet, sheet_name.as_deref()),
        Commands::Series {
            input,
            sheet,
            sheet_name,
        } => list_series(&input, sheet, sheet_name.as_deref()),
        Commands::Chart {
            input,
            kind,
            title,
            series,
            sheet,
            sheet_name,
            prefs,
            padded_y,
            wrap,
            out,
            save_prefs,
        } => build_chart(BuildArgs {
            input,
            kind: kind.into(),
            title,
            series,
            sheet,
            sheet_name,
            prefs,
            padded_y,
            wrap: wrap.into(),
            out,
            save_prefs,
        }),
    }
}

fn parse_workbook(input: &Path, sheet: usize, sheet_name: Option<&str>) -> Result<ParsedTable> {
    let workbook =
        Workbook::read_file(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    let sheet = match sheet_name {
        Some(name) => workbook
            .sheet_by_name(name)
            .with_context(|| format!("Sheet '{name}' not found"))?,
        None => workbook
            .sheet(sheet)
            .with_context(|| format!("Sheet index {sheet} not found"))?,
    };

    evograph::detect(sheet, &DEFAULT_DETECTION_ORDER, &SpreadsheetSchema::default())
        .context("Could not parse the workbook as a score table")
}

fn show_info(input: &Path, sheet: usize, sheet_name: Option<&str>) -> Result<()> {
    let parsed = parse_workbook(input, sheet, sheet_name)?;

    println!("File: {}", input.display());
    println!("Layout: {}", parsed.layout);
    println!("Rows: {}", parsed.table.row_count());
    println!("Series:");
    for name in parsed.table.series() {
        println!("  {name}");
    }
    match &parsed.embedded {
        Some(embedded) => {
            println!("Embedded colors:");
            for (score, color) in embedded.values.iter() {
                println!("  {score} -> {color}");
            }
        }
        None => println!("Embedded colors: none"),
    }

    Ok(())
}

fn list_series(input: &Path, sheet: usize, sheet_name: Option<&str>) -> Result<()> {
    let parsed = parse_workbook(input, sheet, sheet_name)?;
    for name in parsed.table.series() {
        println!("{name}");
    }
    Ok(())
}

struct BuildArgs {
    input: PathBuf,
    kind: ChartKind,
    title: String,
    series: Vec<String>,
    sheet: usize,
    sheet_name: Option<String>,
    prefs: Option<PathBuf>,
    padded_y: bool,
    wrap: TickWrapPolicy,
    out: Option<PathBuf>,
    save_prefs: bool,
}

fn build_chart(args: BuildArgs) -> Result<()> {
    if args.save_prefs && args.prefs.is_none() {
        bail!("--save-prefs requires --prefs");
    }

    let parsed = parse_workbook(&args.input, args.sheet, args.sheet_name.as_deref())?;
    let table = &parsed.table;

    let store = args.prefs.as_ref().map(|path| JsonFileStore::new(path));
    let mut session = match &store {
        Some(store) => Session::load(store),
        None => Session::default(),
    };

    let selection = if args.series.is_empty() {
        session.selection_for(table)
    } else {
        args.series.clone()
    };

    // Fixed-layout workbooks color ticks from their baseline column, whatever
    // the selection; header-row workbooks follow the first selected series.
    let tick_color_source = match parsed.layout {
        TableLayout::FixedLayout => TickColorSource::Series(table.series()[0].clone()),
        TableLayout::HeaderRow => TickColorSource::FirstSelected,
    };

    let base = if args.padded_y {
        ChartOptions::padded()
    } else {
        ChartOptions::classic()
    };
    let options = base
        .with_title(args.title)
        .with_wrap(args.wrap)
        .with_tick_color_source(tick_color_source);

    let policy = session.policy_for(table, parsed.embedded.as_ref());
    let model = ChartModelBuilder::new(options)
        .build(table, &policy, &selection, args.kind)
        .context("Chart build failed")?;

    let json = serde_json::to_string_pretty(&model).context("Failed to serialize chart model")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!(
                "Wrote chart model ({} series) to '{}'",
                model.series.len(),
                path.display()
            );
        }
        None => {
            io::stdout()
                .write_all(json.as_bytes())
                .context("Failed to write to stdout")?;
            println!();
        }
    }

    if let (true, Some(store)) = (args.save_prefs, &store) {
        session.remember_policy(&policy);
        session.set_selected_series(selection);
        session.save(store).context("Failed to save preferences")?;
        eprintln!("Preferences saved to '{}'", store.path().display());
    }

    Ok(())
}
