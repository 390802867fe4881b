use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use content_scorer::{AnalysisResult, Analyzer, AnalyzerConfig, MatchMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "content-scorer",
    about = "Score prose for keyword density, voice match and themes",
    version
)]
struct Cli {
    /// File paths to analyze (reads stdin if none provided)
    files: Vec<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force one term matching mode onto every lexicon
    #[arg(long, value_enum)]
    match_mode: Option<ModeArg>,

    /// Exit with status 1 when any input fails the publishing gate
    #[arg(long)]
    check: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Loose,
    WholeWord,
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Loose => MatchMode::Loose,
            ModeArg::WholeWord => MatchMode::WholeWord,
        }
    }
}

fn fail(message: String) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn load_analyzer(cli: &Cli) -> Analyzer {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
                fail(format!("Error reading {}: {e}", path.display()));
            });
            AnalyzerConfig::from_json(&json).unwrap_or_else(|e| {
                fail(format!("Error in {}: {e}", path.display()));
            })
        }
        None => AnalyzerConfig::default(),
    };
    if let Some(mode) = cli.match_mode {
        config.match_mode = Some(mode.into());
    }
    Analyzer::new(config).unwrap_or_else(|e| fail(format!("Invalid configuration: {e}")))
}

fn report(analyzer: &Analyzer, source: &str, result: &AnalysisResult, check: bool) -> bool {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format!("Error serializing result for {source}: {e}")),
    }
    if !check {
        return true;
    }
    let validation = analyzer.validate(result);
    for issue in &validation.issues {
        eprintln!("{source}: {issue}");
    }
    validation.passed
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let analyzer = load_analyzer(&cli);
    let mut all_passed = true;

    if cli.files.is_empty() {
        let mut input = Vec::new();
        if let Err(e) = std::io::stdin().read_to_end(&mut input) {
            fail(format!("Failed to read stdin: {e}"));
        }
        let result = analyzer
            .analyze_bytes(&input)
            .unwrap_or_else(|e| fail(format!("stdin: {e}")));
        all_passed &= report(&analyzer, "stdin", &result, cli.check);
    } else {
        for path in &cli.files {
            let bytes = std::fs::read(path).unwrap_or_else(|e| {
                fail(format!("Error reading {path}: {e}"));
            });
            let result = analyzer
                .analyze_bytes(&bytes)
                .unwrap_or_else(|e| fail(format!("{path}: {e}")));
            all_passed &= report(&analyzer, path, &result, cli.check);
        }
    }

    if !all_passed {
        std::process::exit(1);
    }
}
