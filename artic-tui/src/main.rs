use std::fs::{self, File};

use log::info;
use simplelog::{Config, WriteLogger};

use artic_tui::app::{App, AppError};
use artic_tui::config::ViewerConfig;
use artic_tui::paths;
use artic_tui::render::Terminal;

fn init_logging(config: &ViewerConfig) {
    paths::rotate_logs();

    let path = paths::log_file()
        .filter(|path| path.parent().is_some_and(|dir| fs::create_dir_all(dir).is_ok()))
        .unwrap_or_else(|| paths::FALLBACK_LOG.into());

    match File::create(&path) {
        Ok(file) => {
            if WriteLogger::init(config.log_level, Config::default(), file).is_err() {
                eprintln!("Logger already initialized");
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

async fn run(config: ViewerConfig) -> Result<(), AppError> {
    info!("starting viewer for {}", config.endpoint);
    let (app, completions) = App::new(config)?;
    let mut terminal = Terminal::new()?;
    app.run(&mut terminal, completions).await
}

#[tokio::main]
async fn main() {
    let config = ViewerConfig::default();
    init_logging(&config);

    if let Err(e) = run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
