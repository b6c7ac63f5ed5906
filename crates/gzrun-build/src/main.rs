use gzrun_core::init_logging;

mod app;
mod commands;
mod config;
mod pipeline;
mod server;
mod tasks;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v was given
    let quiet = !matches.get_flag("verbose");
    init_logging(quiet);

    commands::run_command(&matches)?;

    Ok(())
}
