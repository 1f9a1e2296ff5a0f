use anyhow::Result;
use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

// Loading writes the process-wide config, keep loading tests from interleaving.
static LOAD_LOCK: Lazy<Mutex<()>> = Lazy::new(|| return Mutex::new(()));

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default();
    let doc = res.parse::<toml_edit::Document>();
    assert!(doc.is_ok());

    let doc = doc.unwrap();
    assert_eq!(
        doc.get("api-url").and_then(|e| return e.as_str()),
        Some("https://generativelanguage.googleapis.com")
    );
    assert_eq!(
        doc.get("model").and_then(|e| return e.as_str()),
        Some("gemini-2.5-flash")
    );
    assert!(doc.get("config-file").is_none());
}

#[test]
fn it_names_env_vars() {
    assert_eq!(Config::env_var(ConfigKey::ApiURL), "EXPLAIN_BUDDY_API_URL");
    assert_eq!(
        Config::env_var(ConfigKey::StorageDir),
        "EXPLAIN_BUDDY_STORAGE_DIR"
    );
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let _guard = LOAD_LOCK.lock().await;
    let matches = cli::build().try_get_matches_from(vec![
        "explain-buddy",
        "-c",
        "./config.example.toml",
        "explain",
        "Hello",
    ])?;
    Config::load(vec![&matches]).await?;

    assert_eq!(
        Config::get(ConfigKey::ApiURL),
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(Config::get(ConfigKey::Model), "gemini-2.5-flash");
    assert_eq!(
        Config::get(ConfigKey::ConfigFile),
        "./config.example.toml"
    );

    return Ok(());
}

#[tokio::test]
async fn it_overrides_defaults_from_file() -> Result<()> {
    let _guard = LOAD_LOCK.lock().await;
    let matches = cli::build().try_get_matches_from(vec![
        "explain-buddy",
        "-c",
        "./test/config.toml",
        "explain",
        "Hello",
    ])?;
    Config::load(vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ApiURL), "http://localhost:4010");
    assert_eq!(Config::get(ConfigKey::Model), "gemini-2.5-pro");
    assert_eq!(
        Config::get(ConfigKey::StorageDir),
        Config::default(ConfigKey::StorageDir)
    );

    return Ok(());
}

#[tokio::test]
async fn it_prefers_flags_over_the_file() -> Result<()> {
    let _guard = LOAD_LOCK.lock().await;
    let matches = cli::build().try_get_matches_from(vec![
        "explain-buddy",
        "-c",
        "./test/config.toml",
        "--model",
        "model-3",
        "explain",
        "Hello",
    ])?;
    Config::load(vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ApiURL), "http://localhost:4010");
    assert_eq!(Config::get(ConfigKey::Model), "model-3");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let _guard = LOAD_LOCK.lock().await;
    let matches = cli::build().try_get_matches_from(vec![
        "explain-buddy",
        "-c",
        "./test/bad-config.toml",
        "explain",
        "Hello",
    ])?;
    let res = Config::load(vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[test]
fn it_names_keys_for_flags() {
    assert_eq!(Config::name(ConfigKey::ApiURL), "api-url");
    assert_eq!(Config::name(ConfigKey::ConfigFile), "config-file");
    assert_eq!(Config::name(ConfigKey::StorageDir), "storage-dir");
    assert_eq!(Config::env_var(ConfigKey::Model), "EXPLAIN_BUDDY_MODEL");
}
