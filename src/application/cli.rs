#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Credential;
use crate::domain::models::Namespace;
use crate::domain::services::ConfigStore;
use crate::domain::services::OptionsPage;
use crate::infrastructure::host::FileStorageArea;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default().as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn options_page() -> Result<OptionsPage> {
    let storage_dir = path::PathBuf::from(Config::get(ConfigKey::StorageDir));
    let storage = FileStorageArea::open(Namespace::Sync, &storage_dir).await?;
    return Ok(OptionsPage::new(ConfigStore::new(Arc::new(storage))));
}

async fn set_key(key: &str) -> Result<()> {
    let status = options_page().await?.save(key).await?;
    if status.is_error {
        bail!(status.message);
    }

    println!("{}", Paint::green(status.message));
    return Ok(());
}

async fn show_key() -> Result<()> {
    let value = options_page().await?.load().await?;
    match Credential::parse(&value) {
        Ok(credential) => println!("{}", credential.masked()),
        Err(_) => println!(
            "No API key stored. Set one with `explain-buddy options set-key <KEY>`."
        ),
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_explain() -> Command {
    return Command::new("explain")
        .about("Explain a piece of text in simple terms.")
        .arg(
            Arg::new("text")
                .help("The selected text to explain.")
                .num_args(1..)
                .required(true),
        );
}

fn subcommand_options() -> Command {
    return Command::new("options")
        .about("Manage the Gemini API key.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("set-key")
                .about("Stores the API key used for every explanation.")
                .arg(Arg::new("key").help("Gemini API key").required(true)),
        )
        .subcommand(Command::new("show").about("Shows the stored API key, masked."));
}

fn arg_config(key: ConfigKey) -> Arg {
    return Arg::new(Config::name(key))
        .long(Config::name(key))
        .env(Config::env_var(key))
        .num_args(1)
        .help(format!(
            "{} [default: {}]",
            Config::description(key),
            Config::default(key)
        ))
        .global(true);
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("explain-buddy")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(subcommand_explain())
        .subcommand(subcommand_options())
        .subcommand(subcommand_config())
        .subcommand(subcommand_completions())
        .arg(arg_config(ConfigKey::ConfigFile).short('c'))
        .arg(arg_config(ConfigKey::ApiURL))
        .arg(arg_config(ConfigKey::Model).short('m'))
        .arg(arg_config(ConfigKey::StorageDir));
}

fn selection(matches: &ArgMatches) -> Result<String> {
    let text = matches
        .get_many::<String>("text")
        .map(|values| {
            return values
                .map(|value| return value.to_string())
                .collect::<Vec<String>>()
                .join(" ");
        })
        .unwrap_or_default();

    if text.is_empty() {
        bail!("Nothing to explain, the selected text is empty.");
    }

    return Ok(text);
}

/// Handles every command that finishes on its own. Returns the selection when
/// the explain flow should run.
pub async fn parse() -> Result<Option<String>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => {
            match subcmd_matches.subcommand() {
                Some(("create", _)) => {
                    create_config_file().await?;
                }
                Some(("default", _)) => {
                    println!("{}", Config::serialize_default());
                }
                Some(("path", _)) => {
                    println!("{}", Config::default(ConfigKey::ConfigFile));
                }
                _ => {
                    subcommand_config().print_long_help()?;
                }
            }
        }
        Some(("options", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("set-key", key_matches)) => {
                    let key = key_matches
                        .get_one::<String>("key")
                        .map(|key| return key.to_string())
                        .unwrap_or_default();
                    set_key(&key).await?;
                }
                Some(("show", _)) => {
                    show_key().await?;
                }
                _ => {
                    subcommand_options().print_long_help()?;
                }
            }
        }
        Some(("explain", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            return Ok(Some(selection(subcmd_matches)?));
        }
        _ => {
            build().print_long_help()?;
        }
    }

    return Ok(None);
}
