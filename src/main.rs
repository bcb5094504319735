mod animation; // 3-D playback of a run
mod dispatch; // command -> trajectory
mod graphics; // window setup and view loop
mod input; // control form and command parsing
mod plot; // static result panels
mod settings; // layered configuration

use graphics::window_conf;
use puzzlebot_kinematics::Simulator;
use settings::{DEFAULT_CONFIG_PATH, Settings};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Puzzlebot simulator started.");

    let settings = settings::load_config(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
        error!(error = %e, "Falling back to default settings.");
        Settings::default()
    });

    let simulator = settings.simulator().unwrap_or_else(|e| {
        error!(error = ?e, "Falling back to the stock Puzzlebot drive.");
        Simulator::default()
    });

    graphics::run_app(settings, simulator).await;
}
