mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info};

use kiteforge_config::defaults::{DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL};
use kiteforge_config::{
    apply_all_defaults, apply_env_overrides, load_config, load_proxies, load_wallets, prepare,
    process_env, DEFAULT_CONFIG_FILE,
};
use kiteforge_core::{short_wallet, PromptSource};
use kiteforge_logging::init_logger;
use kiteforge_remote::{
    EndpointRegistry, ExplorerTransactionFeed, HttpClientCache, HttpUsageReporter, SseChatClient,
};
use kiteforge_scheduler::{Orchestrator, Remotes};

use config::{Config, PathOverrides};

#[derive(Parser)]
#[command(name = "kiteforge")]
#[command(about = "KiteForge: multi-wallet AI agent interaction scheduler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start one session per wallet and run until Ctrl-C
    Run(SourceArgs),
    /// Load and validate config, wallets and proxies without any network activity
    Check(SourceArgs),
}

#[derive(Args, Clone)]
struct SourceArgs {
    /// YAML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Wallet list file (overrides config and KITEFORGE_WALLETS)
    #[arg(short, long)]
    wallets: Option<PathBuf>,
    /// Proxy list file (overrides config and KITEFORGE_PROXIES)
    #[arg(short, long)]
    proxies: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (Commands::Run(args) | Commands::Check(args)) = &cli.command;

    let env = process_env();
    let raw = load_config(&args.config).await?;

    // Logging settings are needed before validation so its warnings are kept.
    let early = apply_env_overrides(apply_all_defaults(raw.clone()), &env);
    let early_logging = early.logging.unwrap_or_default();
    init_logger(
        early_logging
            .dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        early_logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL),
    );

    let file = prepare(raw, &env)?;
    let config = Config::resolve(
        file,
        PathOverrides {
            wallets: args.wallets.clone(),
            proxies: args.proxies.clone(),
        },
    )?;

    match cli.command {
        Commands::Run(_) => run(config).await,
        Commands::Check(_) => check(config).await,
    }
}

async fn check(config: Config) -> Result<()> {
    let wallets = load_wallets(&config.wallets_path).await?;
    let proxies = load_proxies(&config.proxies_path).await?;

    println!("Config OK");
    println!(
        "  wallets:   {} from {}",
        wallets.len(),
        config.wallets_path.display()
    );
    for (i, wallet) in wallets.iter().enumerate() {
        println!("    #{} {}", i + 1, short_wallet(wallet));
    }
    if proxies.is_empty() {
        println!("  egress:    direct");
    } else {
        println!("  egress:    {} proxies", proxies.len());
        for proxy in &proxies {
            println!("    {proxy}");
        }
    }
    println!(
        "  quota:     {} points per {}h, {} per interaction ({} interactions)",
        config.session.daily_cap,
        config.session.window.num_hours(),
        config.session.reward,
        config.session.daily_target()
    );
    println!(
        "  cooldown:  {}-{} ms",
        config.session.cooldown.min.as_millis(),
        config.session.cooldown.max.as_millis()
    );
    println!(
        "  logging:   {} -> {}",
        config.log_level,
        config.log_dir.display()
    );
    println!("  endpoints:");
    for endpoint in &config.endpoints {
        let prompts = match endpoint.prompt_source {
            PromptSource::Static => format!("{} prompts", endpoint.prompts.len()),
            PromptSource::RecentTransactions => "live transaction prompts".to_string(),
        };
        println!("    {} ({}): {}", endpoint.name, endpoint.agent_id, prompts);
    }
    Ok(())
}

async fn run(config: Config) -> Result<()> {
    info!(
        wallets = %config.wallets_path.display(),
        proxies = %config.proxies_path.display(),
        log_level = %config.log_level,
        log_dir = %config.log_dir.display(),
        "Starting KiteForge"
    );

    // Both lists are read before any network activity.
    let wallets = load_wallets(&config.wallets_path).await?;
    let proxies = load_proxies(&config.proxies_path).await?;

    let http = Arc::new(HttpClientCache::new(config.http.clone()));
    let remotes = Remotes {
        chat: Arc::new(SseChatClient::new(Arc::clone(&http))),
        reporter: Arc::new(
            HttpUsageReporter::new(Arc::clone(&http)).with_report_url(&config.usage_report_url),
        ),
        feed: Arc::new(
            ExplorerTransactionFeed::new(Arc::clone(&http))
                .with_url(&config.transaction_feed_url)
                .with_filter(&config.transaction_types, &config.transaction_age),
        ),
        registry: Arc::new(EndpointRegistry::new(config.endpoints.clone())),
    };

    let orchestrator = Orchestrator::new(wallets, proxies, config.session, remotes);

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown requested, stopping sessions"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C, stopping sessions"),
        }
        let _ = stop_tx.send(true);
    });

    let summary = orchestrator.run(stop_rx).await;
    info!(
        completed = summary.completed,
        faulted = summary.faulted,
        panicked = summary.panicked,
        "KiteForge stopped"
    );
    Ok(())
}
