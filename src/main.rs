mod bot;
mod classify;
mod config;
mod dedup;
mod explorer;
mod models;
mod notify;
mod poller;
mod registry;

use dedup::NotifiedSet;
use explorer::ExplorerClient;
use notify::TelegramNotifier;
use poller::Poller;
use registry::Registry;
use teloxide::Bot;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();

    info!("Transaction notifier starting...");

    // Missing BOT_TOKEN / CHAT_ID stops us here
    let cfg = config::load()?;

    let registry = Registry::new();
    let seen = NotifiedSet::new();
    let bot = Bot::new(&cfg.bot_token);

    let poller = Poller {
        registry: registry.clone(),
        seen,
        source: ExplorerClient::new(&cfg.explorer_url, cfg.explorer_timeout)?,
        notifier: TelegramNotifier::new(bot.clone(), cfg.chat.clone()),
        explorer_url: cfg.explorer_url.clone(),
    };

    let bot_handle = tokio::spawn(bot::run(bot, registry));
    let poller_handle = tokio::spawn(poller.run(cfg.poll_interval));

    tokio::select! {
        res = bot_handle => match res {
            Ok(()) => info!("Bot dispatcher exited"),
            Err(e) => error!("Bot task panicked: {:?}", e),
        },
        res = poller_handle => match res {
            Ok(Ok(_)) => info!("Poller exited cleanly"),
            Ok(Err(e)) => error!("Poller error: {:?}", e),
            Err(e) => error!("Poller task panicked: {:?}", e),
        },
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping...");
        }
    }

    info!("Transaction notifier stopped.");
    Ok(())
}
