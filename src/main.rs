pub mod core;
pub mod error;
pub mod models;
pub mod storage;
pub mod tui;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;

use crate::core::{Visualizer, SAMPLE_CONFIG};
use crate::error::Result;
use crate::storage::{BufferFile, DEFAULT_EXPORT_FILE};

#[derive(Parser, Debug)]
#[command(name = "integration-viz", version, about = "Visualize integration configuration YAML")]
struct Cli {
    /// YAML file to load into the editor (defaults to a built-in sample)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Where the `w` key exports the current buffer
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    export_path: PathBuf,

    /// Print the parse summary and stats as JSON and exit
    #[arg(short, long)]
    summary: bool,

    /// Write logs to this file (otherwise logs go to stderr in --summary mode only)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// 日志输出目标
#[derive(Debug, PartialEq, Eq)]
enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    /// TUI 占用终端时不输出日志，避免覆盖界面
    Disabled,
}

fn log_sink(log_file: Option<&Path>, summary: bool) -> LogSink<'_> {
    match log_file {
        Some(path) => LogSink::File(path),
        None if summary => LogSink::Stderr,
        None => LogSink::Disabled,
    }
}

fn init_logging(sink: LogSink<'_>) -> Result<()> {
    match sink {
        LogSink::File(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogSink::Stderr => tracing_subscriber::fmt().with_writer(std::io::stderr).init(),
        LogSink::Disabled => {}
    }
    Ok(())
}

fn load_text(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => BufferFile::new(path).read(),
        None => Ok(SAMPLE_CONFIG.to_string()),
    }
}

/// 非交互模式：概要 + 每个集成的统计
fn print_summary(text: &str) -> Result<()> {
    let viz = Visualizer::new(text);
    let report = serde_json::json!({
        "summary": viz.summary(),
        "stats": viz
            .integrations()
            .iter()
            .map(|i| serde_json::json!({ "integration": i.label(), "stats": i.stats() }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(log_sink(cli.log_file.as_deref(), cli.summary))?;

    let text = load_text(cli.file.as_ref())?;
    if cli.summary {
        return print_summary(&text);
    }

    let mut app = tui::App::new(&text, BufferFile::new(cli.export_path));
    app.run()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
