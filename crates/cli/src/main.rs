// hone CLI - reconcile an expected host inventory against monitoring agents

mod exit_codes;
mod report;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use hone_config::{Config, ConfigError};
use hone_io::LoadError;
use hone_recon::{HostMap, LogObserver};
use hone_sensor_client::CollectionError;

use exit_codes::{
    collection_exit_code, EXIT_COLLECT, EXIT_CONFIG, EXIT_ERROR, EXIT_LOAD, EXIT_MISMATCH,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "hone")]
#[command(about = "Reconcile an expected host inventory against monitoring agents")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the expected hosts CSV with the agents seen by the monitoring API
    #[command(after_help = "\
Examples:
  hone check --input hosts.csv
  hone check --input hosts.csv --vrf 3 --json --output report.json
  hone check --input hosts.csv --agents sensors.json --strict")]
    Check {
        /// Expected hosts CSV (hostname,ip with a header row)
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Routing domain (VRF) whose interfaces count as observed
        #[arg(long, default_value_t = 1)]
        vrf: i64,

        /// Config file (default: conf/config.toml, then the user config dir)
        #[arg(long, env = "HONE_CONFIG")]
        config: Option<PathBuf>,

        /// Read agents from a saved sensors response instead of the API
        #[arg(long)]
        agents: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON result to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit 7 when any expected host is not ok
        #[arg(long)]
        strict: bool,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Load and validate the configuration, then print what would be used
    Check {
        /// Config file (default: conf/config.toml, then the user config dir)
        #[arg(long, env = "HONE_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  hone-recon ", env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error: a subscriber may already be set (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, on stdout
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { input, vrf, config, agents, json, output, strict } => {
            cmd_check(input, vrf, config, agents, json, output, strict)
        }
        Commands::Config(ConfigCommands::Check { config }) => cmd_config_check(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn load(err: LoadError) -> Self {
        let hint = match &err {
            LoadError::MissingHeader | LoadError::MalformedRow { .. } => {
                Some("expected two columns with a header row: hostname,ip".to_string())
            }
            _ => None,
        };
        Self { code: EXIT_LOAD, message: err.to_string(), hint }
    }

    pub fn config(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::NotFound(_) => {
                Some("create conf/config.toml with an [openapi] section, or pass --agents".to_string())
            }
            ConfigError::Missing(_) => Some(format!(
                "set it in the [openapi] section or via {}/{}/{}",
                hone_config::ENV_API_ENDPOINT,
                hone_config::ENV_API_KEY,
                hone_config::ENV_API_SECRET,
            )),
            _ => None,
        };
        Self { code: EXIT_CONFIG, message: err.to_string(), hint }
    }

    pub fn collect(err: CollectionError) -> Self {
        let code = collection_exit_code(&err);
        let hint = match &err {
            CollectionError::Auth(..) => Some("check the API key and secret".to_string()),
            CollectionError::Network(_) => Some("is the monitoring endpoint reachable?".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// check
// ============================================================================

fn cmd_check(
    input: PathBuf,
    vrf: i64,
    config: Option<PathBuf>,
    agents: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
    strict: bool,
) -> Result<(), CliError> {
    let expected = hone_io::load_expected(&input).map_err(CliError::load)?;
    log::info!("{} expected host(s) from {}", expected.len(), input.display());

    let actual = match agents {
        Some(path) => load_saved_agents(&path, vrf)?,
        None => {
            let config = Config::load(config.as_deref()).map_err(CliError::config)?;
            hone_sensor_client::fetch_actual(&config.openapi, vrf).map_err(CliError::collect)?
        }
    };
    log::info!("{} observed host(s) in vrf {}", actual.len(), vrf);

    let result = hone_recon::reconcile_with(&expected, &actual, &mut LogObserver);
    let summary = result.summary();

    if json || output.is_some() {
        let doc = report::CheckReport::new(vrf, &result);
        let rendered = serde_json::to_string_pretty(&doc)
            .map_err(|e| CliError::io(format!("failed to serialize result: {e}")))?;

        if let Some(path) = &output {
            fs::write(path, format!("{rendered}\n"))
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            log::info!("wrote {}", path.display());
        }
        if json {
            println!("{rendered}");
        }
    }
    if !json {
        let text = report::render_text(&result, &actual);
        io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| CliError::io(e.to_string()))?;
    }

    eprintln!("{}", report::summary_line(&summary));

    if strict && !result.is_clean() {
        return Err(CliError {
            code: EXIT_MISMATCH,
            message: String::new(),
            hint: None,
        });
    }
    Ok(())
}

fn load_saved_agents(path: &Path, vrf: i64) -> Result<HostMap, CliError> {
    let content = fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_COLLECT,
        message: format!("cannot read {}: {e}", path.display()),
        hint: None,
    })?;
    let agents = hone_sensor_client::parse_agents_json(&content)
        .map_err(|e| CliError::collect(e).with_hint("expected a sensors API response or an array of agents"))?;
    log::debug!("{} agent(s) from {}", agents.len(), path.display());
    Ok(hone_sensor_client::collect_actual(&agents, vrf))
}

// ============================================================================
// config check
// ============================================================================

fn cmd_config_check(config: Option<PathBuf>) -> Result<(), CliError> {
    let config = Config::load(config.as_deref()).map_err(CliError::config)?;
    let api = &config.openapi;

    println!("endpoint:  {}", api.endpoint);
    println!("key:       {}", api.redacted_key());
    println!("verify:    {}", api.verify);
    println!("timeout:   {}s", api.timeout_secs);
    println!("page_size: {}", api.page_size);
    Ok(())
}
