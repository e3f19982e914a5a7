// Loads a dotenv file and prints the server's variables with secrets masked
//
// Usage: env-check [path]   (defaults to .env)
// Variables already set in the process take precedence over the file.

use std::path::PathBuf;

use matchup_api::config::{mask_value, AppConfig, ENV_KEYS};

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".env"));

    if let Err(e) = dotenv::from_path(&path) {
        tracing::error!(path = %path.display(), error = %e, "cannot load env file");
        std::process::exit(1);
    }

    let mut unset = 0;
    for key in ENV_KEYS {
        match std::env::var(key) {
            Ok(value) => println!("{}={}", key, mask_value(key, &value)),
            Err(_) => {
                println!("{}=<unset>", key);
                unset += 1;
            }
        }
    }
    tracing::info!(path = %path.display(), unset, "env file loaded");

    match AppConfig::from_env() {
        Ok(config) => tracing::info!(
            bind_addr = %config.bind_addr,
            min_players_policy = ?config.min_players_policy,
            "configuration is valid"
        ),
        Err(e) => {
            tracing::error!(error = %e, "configuration is invalid");
            std::process::exit(2);
        }
    }
}
