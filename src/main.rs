//! commitwise - CLI entry point.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commitwise::commit::{collect_changes, generate_commit_message, review_changes};
use commitwise::llm::check_claude_installed;
use commitwise::{Config, Provider, ReviewContext, ToolRegistry};

/// Review working-tree changes and write one conventional commit message for them.
#[derive(Parser, Debug)]
#[command(name = "commitwise")]
#[command(about = "Review working-tree changes and write a conventional commit message")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Completion provider: gemini or claude (overrides COMMITWISE_PROVIDER)
    #[arg(long, global = true)]
    provider: Option<Provider>,

    /// Model name (overrides COMMITWISE_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Extra path or path component to leave out of the change set
    #[arg(long = "exclude", global = true)]
    exclude: Vec<String>,

    /// Completion timeout in seconds (overrides COMMITWISE_TIMEOUT)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the per-file diffs as JSON
    Changes {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Generate a conventional commit message for the pending changes
    Message {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Review the pending changes file by file
    Review {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// List the tool definitions as JSON
    Tools,
    /// Invoke a tool with a JSON input object
    Call {
        /// Tool name, e.g. getFileChanges
        name: String,
        /// Input, e.g. '{"rootDir": "."}'
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli);
    let registry = ToolRegistry::with_builtin_tools();

    if let Command::Tools = cli.command {
        let definitions = serde_json::to_string_pretty(&registry.definitions())?;
        println!("{definitions}");
        return Ok(());
    }

    let ctx = ReviewContext::from_config(&config);

    match cli.command {
        Command::Changes { dir } => {
            let changes = collect_changes(ctx.version_control(), &dir, ctx.exclusions())
                .await
                .with_context(|| format!("Failed to collect changes in {}", dir.display()))?;
            println!("{}", serde_json::to_string_pretty(&changes)?);
        }
        Command::Message { dir } => {
            ensure_provider_ready(&config).await?;
            let message = generate_commit_message(&ctx, &dir)
                .await
                .context("Failed to generate commit message")?;
            println!("{message}");
        }
        Command::Review { dir } => {
            ensure_provider_ready(&config).await?;
            let review = review_changes(&ctx, &dir)
                .await
                .context("Failed to review changes")?;
            println!("{review}");
        }
        Command::Call { name, input } => {
            let args: serde_json::Value =
                serde_json::from_str(&input).context("Tool input is not valid JSON")?;
            if name == "generateCommitMessage" {
                ensure_provider_ready(&config).await?;
            }
            let output = registry
                .call(&name, args, &ctx)
                .await
                .with_context(|| format!("Tool {name} failed"))?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Tools => {}
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli: &Cli) -> Config {
    let mut config = Config::from_env();
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(secs) = cli.timeout.filter(|s| *s > 0) {
        config.timeout = Some(Duration::from_secs(secs));
    }
    config.exclusions.extend(&cli.exclude);
    config
}

async fn ensure_provider_ready(config: &Config) -> Result<()> {
    info!("Using {} provider", config.provider);
    if config.provider == Provider::Claude {
        check_claude_installed()
            .await
            .context("Claude Code CLI is required for the claude provider")?;
    }
    Ok(())
}
