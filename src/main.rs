use std::fs::OpenOptions;
use std::path::Path;

use pixelcats::{app, config};

/// The terminal owns stdout/stderr while running, so logs go to a file.
fn init_logging(log_path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("pixelcats: logging to stderr, {}: {e}", log_path.display()),
    }
    builder.init();
}

fn main() {
    let paths = match config::project_paths() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("pixelcats: {e:#}");
            std::process::exit(1);
        }
    };
    init_logging(&paths.log_path);
    log::info!("PixelCats starting up");

    if let Err(e) = app::run(paths) {
        log::error!("Fatal error: {e:#}");
        eprintln!("pixelcats: {e:#}");
        std::process::exit(1);
    }
}
