//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting Pitchboard");

    if let Err(error) = pitchboard_app::run_from_env() {
        log::error!("{error}");
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
