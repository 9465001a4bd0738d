#[macro_use]
extern crate rocket;

use log::info;
use std::env;

use lucky_snake::bot::Bot;
use lucky_snake::config::Config;
use lucky_snake::debug_logger::DebugLogger;
use lucky_snake::handler::{self, SnakeFarm};

#[launch]
async fn rocket() -> _ {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Battlesnake Server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;

    let bots = config
        .snakes
        .iter()
        .map(|mount| {
            info!("Serving {} at /{}", mount.strategy, mount.path);
            Bot::new(&mount.path, mount.strategy, config.clone(), logger.clone())
        })
        .collect();

    handler::build(SnakeFarm::new(bots))
}
