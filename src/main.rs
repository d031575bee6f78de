mod generate;
mod manifest;
mod report;
mod sounds;
mod util;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};
use generate::{GenerateOutcome, GenerateSummary};
use manifest::SegmentManifest;
use report::{ReportConfig, ReportMode};
use std::path::PathBuf;
use verify::VerifyReport;

#[derive(Parser)]
#[command(
    name = "soundpack",
    version,
    about = "Asset tooling for the sleep-sound app (segment manifests + remote fix checks)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory of pre-split audio segments and write a JSON manifest
    Generate {
        /// Audio id the segments belong to (e.g. "river")
        audio_id: String,

        /// Directory holding the *_segment_* files
        segments_dir: PathBuf,

        /// Manifest file to write (overwritten if present)
        output_file: PathBuf,

        /// Base URL for hosted segments; omit for locally bundled segments
        base_url: Option<String>,
    },

    /// Check that the published sound-library fix propagated (raw file, audio assets, CDN)
    Verify {
        /// Progress display mode: auto (TTY-aware), rich, plain, quiet.
        #[arg(long, value_enum, default_value_t = ReportMode::Auto)]
        progress: ReportMode,
    },

    /// Load a segment manifest, validate it, and print its contents
    Inspect {
        manifest_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Generate {
            audio_id,
            segments_dir,
            output_file,
            base_url,
        } => {
            let outcome = generate::generate_manifest(
                &audio_id,
                &segments_dir,
                &output_file,
                base_url.as_deref(),
            )?;
            match outcome {
                GenerateOutcome::Written(summary) => print_generate_summary(&summary),
                GenerateOutcome::DirMissing => {
                    println!(
                        "error: segments directory does not exist: {}",
                        segments_dir.display()
                    );
                }
                GenerateOutcome::NoSegments => {
                    println!(
                        "warning: no *_segment_* files found in {}",
                        segments_dir.display()
                    );
                }
            }
        }

        Commands::Verify { progress } => {
            let report = verify::run_checks(ReportConfig::new(progress))?;
            print_verify_report(&report);
            if !report.fix_confirmed() {
                std::process::exit(1);
            }
        }

        Commands::Inspect { manifest_file } => {
            let manifest = SegmentManifest::load(&manifest_file)?;
            println!("Manifest: {}", manifest_file.display());
            print_manifest(&manifest);
        }
    }

    Ok(())
}

fn print_generate_summary(summary: &GenerateSummary) {
    println!("Wrote segment manifest: {}", summary.output_file.display());
    print_manifest(&summary.manifest);
}

fn print_manifest(manifest: &SegmentManifest) {
    println!("  audio id: {}", manifest.audio_id);
    println!("  segments: {}", manifest.segment_count);
    for seg in &manifest.segments {
        println!("    - {}: {}", seg.name, seg.base_path);
    }
}

fn print_verify_report(report: &VerifyReport) {
    println!("Verification result:");
    println!("  {}: {}", verify::RAW_CHECK, report.raw.verdict());
    println!("  {}: {}", verify::AUDIO_CHECK, report.audio.verdict());
    println!("  {}: {}", verify::CDN_CHECK, report.cdn.verdict());

    if report.fix_confirmed() {
        println!("Fix confirmed: the raw library and both audio files are good.");
        if !report.cdn.passed {
            println!(
                "note: the CDN mirror can lag behind by minutes to hours; re-run later if the app still shows stale data"
            );
        }
    } else {
        println!("Fix not confirmed, see the failed checks above.");
    }
}
