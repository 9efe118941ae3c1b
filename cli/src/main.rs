//! atslens CLI - resume extraction and ATS compatibility scoring.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use colored::Colorize;

use atslens::{
    Atslens, Error, ExperienceLevel, InterpretationResult, ParsingStatus, Report, Severity,
};

#[derive(Parser)]
#[command(name = "atslens")]
#[command(version)]
#[command(about = "Score a resume against ATS compatibility checks", long_about = None)]
struct Cli {
    /// Resume file (PDF, DOCX, or plain text)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Target role, e.g. "software engineer"
    #[arg(short, long, default_value = "software engineer")]
    role: String,

    /// Experience level
    #[arg(short, long, value_enum, default_value = "mid")]
    level: Level,

    /// Job description file; enables JD-aware keyword weighting
    #[arg(long, value_name = "FILE")]
    jd: Option<PathBuf>,

    /// Weight of JD keywords vs the role table (0.0 - 1.0)
    #[arg(long, default_value = "0.7")]
    jd_weight: f32,

    /// Print the calibrated report as JSON
    #[arg(long)]
    json: bool,

    /// Print the raw, uncalibrated analysis as JSON (for debugging)
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl From<Level> for ExperienceLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Entry => ExperienceLevel::Entry,
            Level::Mid => ExperienceLevel::Mid,
            Level::Senior => ExperienceLevel::Senior,
            Level::Executive => ExperienceLevel::Executive,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut pipeline = Atslens::new()
        .with_role(cli.role.as_str())
        .with_level(cli.level.into())
        .with_jd_weight(cli.jd_weight);

    if let Some(jd_path) = &cli.jd {
        let jd = std::fs::read_to_string(jd_path)?;
        pipeline = pipeline.with_job_description(jd);
    }

    let report = pipeline.analyze_file(&cli.input)?;

    if cli.raw {
        println!("{}", serde_json::to_string_pretty(&report.analysis).expect("serializable"));
    } else if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report.interpretation).expect("serializable")
        );
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &Report) {
    let interp = &report.interpretation;

    println!();
    println!(
        "{}  {}",
        "Overall strength:".bold(),
        format!("{:.0} / 100", interp.overall_strength).cyan().bold()
    );
    println!("{}", interp.user_verdict);
    println!();

    print_banner(interp);
    print_scores(interp);

    if !interp.highlights.is_empty() {
        println!("{}", "What's working".green().bold());
        for highlight in &interp.highlights {
            println!("  {} {}", "✓".green(), highlight);
        }
        println!();
    }

    if !interp.improvements.is_empty() {
        println!("{}", "Improvements".yellow().bold());
        for improvement in &interp.improvements {
            let marker = match improvement.severity {
                Severity::Critical => "!".red().bold(),
                Severity::Warning => "~".yellow(),
                Severity::Info => "i".blue(),
            };
            println!(
                "  {} {} — {}",
                marker,
                improvement.title.bold(),
                improvement.message
            );
        }
        println!();
    }

    println!(
        "{} {} sections, {} bullets, {} skills detected",
        "Detected:".dimmed(),
        report.model.sections.len(),
        report.model.bullet_count(),
        report.model.skills.len()
    );
}

fn print_banner(interp: &InterpretationResult) {
    let banner = match interp.parsing_context.status {
        ParsingStatus::Critical => interp.parsing_context.message.red(),
        ParsingStatus::Warning => interp.parsing_context.message.yellow(),
        ParsingStatus::Stable => interp.parsing_context.message.dimmed(),
    };
    println!("{banner}");
    println!();
}

fn print_scores(interp: &InterpretationResult) {
    let scores = &interp.calibrated_scores;
    println!("{}", "Scores".bold());
    println!("  ATS compatibility    {:>5.0}", scores.ats_compatibility);
    println!("  Parsing reliability  {:>5.0}", scores.parsing_reliability);
    println!("  Role alignment       {:>5.0}", scores.role_alignment);
    println!("  Content quality      {:>5.0}", scores.content_quality);
    println!();
}

fn report_error(err: &Error) {
    match err {
        Error::Corrupt(_) | Error::UnsupportedFormat(_) | Error::EmptyOrTooShort(_) => {
            eprintln!("{} {err}", "error:".red().bold());
            eprintln!(
                "We could not reliably extract text from this file. Try exporting it as a \
                 standard PDF, or paste the text into a .txt file and analyze that."
            );
        }
        Error::Timeout => {
            eprintln!("{} extraction timed out — try again or paste the text", "error:".red().bold());
        }
        Error::Io(e) => {
            eprintln!("{} {e}", "error:".red().bold());
        }
    }
}
