use std::{
    fmt::Display,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tubegist_core::{
    AppendFileSink, CommandModel, DEFAULT_MAX_WORDS, DEFAULT_PROMPT, JsonFileSource,
    ModelConfig, NoopSink, TimeRange, TimestampSink, Transcript, TranscriptProvider,
    YtDlpSource, build_chapters, extract, fetch_cached, format_chapters_readable,
    format_hits_table, format_no_hits, get_cache_dir, get_transcript_path, record_hits, search,
    summarize, thumbnail_url, video_id,
};

#[derive(Parser)]
#[command(name = "tubegist", version)]
#[command(about = "Summarize, chapter and keyword-search YouTube video transcripts")]
struct Cli {
    /// Video URL (https://www.youtube.com/watch?v=<id>)
    url: String,

    /// Read transcript segments from a JSON file instead of fetching captions
    #[arg(long, value_name = "FILE")]
    transcript: Option<PathBuf>,

    /// Caption language to fetch (e.g., "en", "de")
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Force re-fetching even if a cached transcript exists
    #[arg(short, long)]
    force: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Summarize the whole video, or a time window of it, with a language model
    Summarize {
        /// Start of the window in minutes
        #[arg(long, requires = "end_min", allow_negative_numbers = true)]
        start_min: Option<f64>,

        /// End of the window in minutes
        #[arg(long, requires = "start_min", allow_negative_numbers = true)]
        end_min: Option<f64>,

        /// Maximum number of words for the summary
        #[arg(
            long,
            default_value_t = DEFAULT_MAX_WORDS as u16,
            value_parser = clap::value_parser!(u16).range(10..=1000)
        )]
        max_words: u16,

        /// Model command line, overrides TUBEGIST_MODEL_CMD
        #[arg(long, value_name = "CMD")]
        model_cmd: Option<String>,
    },

    /// Split the transcript into one-minute chapters
    Chapters,

    /// Find every caption line containing a keyword
    Search {
        /// Keyword to search for (case-sensitive)
        keyword: String,

        /// Append the timestamp of every hit to this file
        #[arg(long, value_name = "PATH")]
        timestamps_file: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(err: impl Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), err);
    std::process::exit(1);
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .expect("spinner template is valid"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn load_transcript(cli: &Cli, video_id: &str) -> Result<Transcript> {
    if let Some(path) = &cli.transcript {
        let transcript = JsonFileSource::new(path).fetch(video_id).await?;
        println!(
            "{} Loaded {} segments {}",
            style("✓").green().bold(),
            transcript.len(),
            style(format!("({})", path.display())).dim()
        );
        return Ok(transcript);
    }

    let cache_dir = get_cache_dir(video_id);
    let cache_path = get_transcript_path(&cache_dir, &cli.lang);
    let source = YtDlpSource::new(&cli.lang, &cache_dir);

    let step_start = Instant::now();
    let spinner = create_spinner("Fetching captions...");
    let (transcript, cached) = match fetch_cached(&source, video_id, &cache_path, cli.force).await
    {
        Ok(fetched) => fetched,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };

    let note = if cached {
        "(cached)".to_string()
    } else {
        format!("[{}]", format_duration(step_start.elapsed()))
    };
    spinner.finish_with_message(format!(
        "{} Transcript: {:.1} min, {} segments, {} {}",
        style("✓").green().bold(),
        transcript.range_duration() / 60.0,
        transcript.len(),
        style(&cli.lang).yellow(),
        style(note).dim()
    ));
    Ok(transcript)
}

async fn run_summarize(
    transcript: &Transcript,
    range: Option<TimeRange>,
    max_words: usize,
    config: &ModelConfig,
) -> Result<()> {
    let text = extract(transcript, range).unwrap_or_else(|e| exit_with_error(e));
    if text.is_empty() {
        println!(
            "{} No transcript text in the selected window",
            style("!").yellow().bold()
        );
        return Ok(());
    }

    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Summarizing with {}...", config.program));
    let model = CommandModel::new(config);
    let summary = match summarize(&model, &text, DEFAULT_PROMPT, max_words).await {
        Ok(summary) => summary,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!(
        "{} Summary generated {}",
        style("✓").green().bold(),
        style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
    ));

    println!("{}", style("─".repeat(60)).dim());
    println!("{}\n", style("Video Summary").bold());
    println!("{}", summary);
    Ok(())
}

fn run_chapters(transcript: &Transcript) {
    let chapters = build_chapters(transcript);
    println!("{}", style("─".repeat(60)).dim());
    if chapters.is_empty() {
        println!("No chapters: the transcript is shorter than one minute.");
        return;
    }
    print!("{}", format_chapters_readable(&chapters));
}

fn run_search(transcript: &Transcript, keyword: &str, timestamps_file: Option<PathBuf>) {
    let hits = search(transcript, keyword);
    println!("{}", style("─".repeat(60)).dim());
    if hits.is_empty() {
        println!("{}", format_no_hits(keyword));
        return;
    }

    let mut sink: Box<dyn TimestampSink> = match timestamps_file {
        Some(path) => match AppendFileSink::open(&path) {
            Ok(sink) => Box::new(sink),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open timestamps file");
                Box::new(NoopSink)
            }
        },
        None => Box::new(NoopSink),
    };
    if let Err(e) = record_hits(sink.as_mut(), &hits) {
        warn!(error = %e, "failed to record timestamps");
    }

    print!("{}", format_hits_table(keyword, &hits));
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let video_id = video_id(&cli.url)
        .unwrap_or_else(|e| exit_with_error(e))
        .to_string();

    // Validate mode inputs before touching the network
    let model_config = match &cli.command {
        Mode::Summarize { model_cmd, .. } => {
            let config = match model_cmd {
                Some(cmd) => ModelConfig::parse(cmd),
                None => ModelConfig::from_env(),
            };
            Some(config.unwrap_or_else(|e| exit_with_error(e)))
        }
        Mode::Search { keyword, .. } if keyword.is_empty() => {
            exit_with_error("Please enter a keyword to search.")
        }
        _ => None,
    };

    println!(
        "\n{}  {}\n",
        style("tubegist").cyan().bold(),
        style("Transcript Explorer").dim()
    );
    println!(
        "{} {}",
        style("Thumbnail:").dim(),
        style(thumbnail_url(&video_id)).cyan()
    );

    let transcript = load_transcript(&cli, &video_id).await?;

    match cli.command {
        Mode::Summarize {
            start_min,
            end_min,
            max_words,
            ..
        } => {
            let range = match (start_min, end_min) {
                (Some(start), Some(end)) => Some(TimeRange::from_minutes(start, end)),
                _ => None,
            };
            if let Some(config) = &model_config {
                run_summarize(&transcript, range, max_words as usize, config).await?;
            }
        }
        Mode::Chapters => run_chapters(&transcript),
        Mode::Search {
            keyword,
            timestamps_file,
        } => run_search(&transcript, &keyword, timestamps_file),
    }

    Ok(())
}
