mod batch;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use label_scraper::config::read_labels_file;
use label_scraper::{ExtractorConfig, LabelExtractor, Settings};

#[derive(Parser)]
#[command(name = "label_scraper", about = "Extract labeled field values from semi-structured text")]
struct Cli {
    /// Settings file (TOML); LABEL_SCRAPER_* environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LabelArgs {
    /// Label to look for; repeat for more, order matters
    #[arg(short = 'l', long = "label")]
    labels: Vec<String>,

    /// File with one label per line
    #[arg(long)]
    labels_file: Option<PathBuf>,

    /// Keep HTML tags and entities as they are
    #[arg(long)]
    raw: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from one document and print them as JSON
    Extract {
        /// Input file, or "-" for stdin
        input: PathBuf,
        #[command(flatten)]
        labels: LabelArgs,
    },
    /// Print the normalized one-label-per-line text
    Preview {
        /// Input file, or "-" for stdin
        input: PathBuf,
        #[command(flatten)]
        labels: LabelArgs,
    },
    /// Extract every file in a directory, one JSON line per file
    Batch {
        dir: PathBuf,
        /// Only files with this extension (e.g. "html")
        #[arg(long)]
        ext: Option<String>,
        /// Max files to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[command(flatten)]
        labels: LabelArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract { input, labels } => {
            let (extractor, labels) = setup(&settings, &labels)?;
            let content = read_input(&input)?;
            let fields = extractor.get(&content, &labels)?;
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Commands::Preview { input, labels } => {
            let (extractor, labels) = setup(&settings, &labels)?;
            let content = read_input(&input)?;
            println!("{}", extractor.preview_content(&content, &labels));
        }
        Commands::Batch { dir, ext, limit, labels } => {
            let (extractor, labels) = setup(&settings, &labels)?;
            if labels.is_empty() {
                bail!("no labels given; use --label, --labels-file or the settings file");
            }
            let files = batch::collect_files(&dir, ext.as_deref(), limit)?;
            if files.is_empty() {
                println!("No matching files in {}.", dir.display());
                return Ok(());
            }

            let (results, stats) = batch::extract_files(&extractor, &files, &labels)?;
            for result in &results {
                println!("{}", serde_json::to_string(result)?);
            }
            eprintln!(
                "Done: {} files ({} ok, {} without fields, {} errors) in {}",
                stats.total,
                stats.ok,
                stats.empty,
                stats.errors,
                format_duration(t0.elapsed())
            );
        }
    }

    Ok(())
}

fn setup(settings: &Settings, args: &LabelArgs) -> anyhow::Result<(LabelExtractor, Vec<String>)> {
    let labels = resolve_labels(settings, args)?;
    Ok((LabelExtractor::new(extractor_config(settings, args)), labels))
}

/// `--raw` wins over the settings.
fn extractor_config(settings: &Settings, args: &LabelArgs) -> ExtractorConfig {
    let mut config = settings.extractor_config();
    if args.raw {
        config.de_entitize_content = false;
    }
    config
}

/// Flags, then labels file, then settings.
fn resolve_labels(settings: &Settings, args: &LabelArgs) -> anyhow::Result<Vec<String>> {
    if !args.labels.is_empty() {
        Ok(args.labels.clone())
    } else if let Some(path) = &args.labels_file {
        read_labels_file(path)
    } else {
        Ok(settings.labels.clone())
    }
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn settings(labels: &[&str]) -> Settings {
        Settings {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            ..Settings::defaults()
        }
    }

    fn label_args(cli: Cli) -> LabelArgs {
        match cli.command {
            Commands::Extract { labels, .. }
            | Commands::Preview { labels, .. }
            | Commands::Batch { labels, .. } => labels,
        }
    }

    fn labels_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    #[test]
    fn label_flags_on_every_subcommand() {
        for argv in [
            vec!["label_scraper", "extract", "in.html", "-l", "Age:", "--label", "City:"],
            vec!["label_scraper", "preview", "-", "-l", "Age:", "-l", "City:"],
            vec!["label_scraper", "batch", "docs", "--ext", "html", "-l", "Age:", "-l", "City:"],
        ] {
            let args = label_args(Cli::try_parse_from(argv.iter().copied()).unwrap());
            assert_eq!(args.labels, vec!["Age:", "City:"], "argv {:?}", argv);
        }
    }

    #[test]
    fn positional_labels_rejected() {
        assert!(Cli::try_parse_from(["label_scraper", "preview", "in.html", "Age:"]).is_err());
    }

    #[test]
    fn flags_beat_labels_file() {
        let file = labels_file("City:\n");
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["label_scraper", "extract", "in", "-l", "Age:", "--labels-file", path]).unwrap();
        let labels = resolve_labels(&settings(&["Zip:"]), &label_args(cli)).unwrap();
        assert_eq!(labels, vec!["Age:"]);
    }

    #[test]
    fn labels_file_beats_settings() {
        let file = labels_file("# fields\nCity:\nAge:\n");
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["label_scraper", "extract", "in", "--labels-file", path]).unwrap();
        let labels = resolve_labels(&settings(&["Zip:"]), &label_args(cli)).unwrap();
        assert_eq!(labels, vec!["City:", "Age:"]);
    }

    #[test]
    fn settings_labels_used_last() {
        let cli = Cli::try_parse_from(["label_scraper", "extract", "in"]).unwrap();
        let labels = resolve_labels(&settings(&["Zip:"]), &label_args(cli)).unwrap();
        assert_eq!(labels, vec!["Zip:"]);
    }

    #[test]
    fn raw_disables_markup_stripping() {
        let cli = Cli::try_parse_from(["label_scraper", "extract", "in", "--raw"]).unwrap();
        let config = extractor_config(&Settings::defaults(), &label_args(cli));
        assert!(!config.de_entitize_content);

        let cli = Cli::try_parse_from(["label_scraper", "extract", "in"]).unwrap();
        let config = extractor_config(&Settings::defaults(), &label_args(cli));
        assert!(config.de_entitize_content);
    }

    #[test]
    fn format_duration_units() {
        assert_eq!(format_duration(std::time::Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 2m 5s");
    }
}
