//! pageprofile CLI - page structure classification tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use pageprofile::{
    profile_pages, AnalyzeOptions, DecisionRecord, DecisionReport, JsonFormat, PageAnalysis,
    PageMode, PageSelection, PageTokens,
};

#[derive(Parser)]
#[command(name = "pageprofile")]
#[command(version)]
#[command(about = "Classify page structure from positioned-token dumps", long_about = None)]
struct Cli {
    /// Input token dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a token dump and write profiles and the decision report
    Analyze {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Image-only text threshold in characters
        #[arg(long)]
        min_chars: Option<usize>,
    },

    /// Print per-page structural profiles as JSON
    Profiles {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Print the per-page mode decision report as JSON
    Report {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show a mode summary for a token dump
    Info {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// The on-disk input format: one entry per page, in page order.
#[derive(Deserialize)]
struct TokenDump {
    pages: Vec<PageTokens>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            output,
            pages,
            min_chars,
        }) => cmd_analyze(&input, output.as_deref(), pages.as_deref(), min_chars),
        Some(Commands::Profiles {
            input,
            output,
            compact,
            pages,
        }) => cmd_profiles(&input, output.as_deref(), compact, pages.as_deref()),
        Some(Commands::Report {
            input,
            output,
            compact,
            pages,
        }) => cmd_report(&input, output.as_deref(), compact, pages.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(&input, cli.output.as_deref(), None, None)
            } else {
                println!("{}", "Usage: pageprofile <FILE> [OUTPUT]".yellow());
                println!("       pageprofile --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_dump(input: &Path) -> Result<Vec<PageTokens>, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let dump: TokenDump = serde_json::from_str(&data)?;
    Ok(dump.pages)
}

fn build_options(
    pages: Option<&str>,
    min_chars: Option<usize>,
) -> Result<AnalyzeOptions, Box<dyn std::error::Error>> {
    let mut options = AnalyzeOptions::new();
    if let Some(p) = pages {
        let selection =
            PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?;
        options = options.with_pages(selection);
    }
    if let Some(chars) = min_chars {
        options = options.with_min_text_chars(chars);
    }
    Ok(options)
}

fn report_from(analyses: &[PageAnalysis]) -> Vec<DecisionRecord> {
    analyses
        .iter()
        .filter_map(|a| a.profile())
        .map(|p| DecisionRecord {
            page: p.page_number(),
            mode: p.detected_mode(),
            reason: p.reason().to_string(),
        })
        .collect()
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    min_chars: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_profile", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Loading token dump...");
    let source = load_dump(input)?;
    let options = build_options(pages, min_chars)?;
    pb.inc(1);

    pb.set_message("Analyzing pages...");
    let analyses = profile_pages(&source, &options)?;
    pb.inc(1);

    pb.set_message("Writing output...");
    let profiles_json = serde_json::to_string_pretty(&analyses)?;
    fs::write(output_dir.join("profiles.json"), &profiles_json)?;

    let report = DecisionReport::new(report_from(&analyses));
    report.write_to(output_dir.join("decisions.json"))?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} profiles.json", "├─".dimmed());
    println!("  {} decisions.json", "└─".dimmed());

    Ok(())
}

fn cmd_profiles(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = load_dump(input)?;
    let options = build_options(pages, None)?;
    let analyses = profile_pages(&source, &options)?;

    let json = if compact {
        serde_json::to_string(&analyses)?
    } else {
        serde_json::to_string_pretty(&analyses)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_report(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = load_dump(input)?;
    let options = build_options(pages, None)?;
    let analyses = profile_pages(&source, &options)?;

    let report = DecisionReport::new(report_from(&analyses));

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = report.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = load_dump(input)?;
    let analyses = profile_pages(&source, &AnalyzeOptions::new())?;

    println!("{}", "Document Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), source.len());

    let count_mode = |mode: PageMode| {
        analyses
            .iter()
            .filter_map(|a| a.profile())
            .filter(|p| p.detected_mode() == mode)
            .count()
    };
    let image_only = analyses.iter().filter(|a| a.profile().is_none()).count();

    println!("{}: {}", "Table pages".bold(), count_mode(PageMode::Table));
    println!("{}: {}", "Form pages".bold(), count_mode(PageMode::Form));
    println!("{}: {}", "Layout pages".bold(), count_mode(PageMode::Layout));
    println!(
        "{}: {}",
        "Semantic pages".bold(),
        count_mode(PageMode::Semantic)
    );
    println!("{}: {}", "Image-only pages".bold(), image_only);

    println!();
    println!("{}", "Per-page decisions".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for analysis in &analyses {
        match analysis.profile() {
            Some(profile) => println!(
                "  {:>4}  {:<10} {}",
                profile.page_number(),
                profile.detected_mode().to_string().green(),
                profile.reason().dimmed()
            ),
            None => println!(
                "  {:>4}  {:<10}",
                analysis.page_number(),
                "image-only".yellow()
            ),
        }
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pageprofile".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Page structure classification tool");
}
