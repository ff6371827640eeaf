use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use meeting_page_fixer::{render_diff, FilePatcher, PatchOptions, PatchReport, SUCCESS_MESSAGE};
use std::path::PathBuf;

const DIFF_CONTEXT_LINES: usize = 3;

#[derive(Parser)]
#[command(name = "meeting-page-fixer")]
#[command(
    about = "Remove the misplaced Phone column block from the meeting page fetch calls",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Workspace root the meeting page path is resolved against
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Dry run - compute the fix without modifying the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Report per-rule match counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let patcher = FilePatcher::new(PatchOptions {
        workspace: cli.workspace,
        dry_run: cli.dry_run,
    })?;
    let report = patcher
        .run()
        .with_context(|| format!("could not patch {}", patcher.target_path().display()))?;

    if cli.verbose {
        report_outcomes(&report);
    }

    if report.written {
        println!("{SUCCESS_MESSAGE}");
    } else {
        println!("Dry run: the meeting file was not modified");
    }

    if cli.diff && report.changed() {
        print!(
            "{}",
            render_diff(
                &report.file,
                &report.original,
                &report.patched,
                DIFF_CONTEXT_LINES
            )
        );
    }

    Ok(())
}

fn report_outcomes(report: &PatchReport) {
    for outcome in &report.outcomes {
        match outcome.matches {
            0 => eprintln!(
                "{} {}: no match",
                "⊙".yellow(),
                outcome.call_site.id()
            ),
            1 => eprintln!("{} {}: 1 match", "✓".green(), outcome.call_site.id()),
            n => eprintln!("{} {}: {} matches", "✓".green(), outcome.call_site.id(), n),
        }
    }

    if !report.changed() {
        eprintln!(
            "{}",
            format!("{} unchanged", report.file.display()).dimmed()
        );
    }
}
