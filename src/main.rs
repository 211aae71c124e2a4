use clap::Parser;
use flipbook::Mode;
use flipbook::core::config::{self, CliOverrides};
use flipbook::core::document::Document;
use flipbook::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flipbook", about = "Read a text file as a deck of sections or as numbered pages")]
struct Args {
    /// Text file to open; `---` lines separate sections
    file: PathBuf,

    /// Presentation mode to start in
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Page to open in pages mode
    #[arg(short, long)]
    page: Option<u32>,

    /// Number of numbered pager buttons
    #[arg(short, long)]
    button_count: Option<u32>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to flipbook.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("flipbook.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            mode: args.mode,
            page: args.page,
            button_count: args.button_count,
        },
    );

    let document = Document::load(&args.file)?;
    let document_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    log::info!(
        "Flipbook starting: {} ({} sections) in {:?} mode",
        document_name,
        document.section_count(),
        resolved.mode
    );

    tui::run(resolved, document, document_name)
}
