//! Cochar Engine - prints one generated character as JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cochar_engine::{App, CharacterRequest, GeneratorSettings};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (cargo may run the binary from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging; stdout carries the character
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cochar_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = GeneratorSettings::from_env()?;
    tracing::debug!(?settings, "Settings loaded");

    let request = CharacterRequest::new(settings.default_year, settings.default_country.clone());
    let app = App::from_settings(settings)?;

    let character = app.create_character(request)?;
    println!("{}", serde_json::to_string_pretty(&character)?);
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
