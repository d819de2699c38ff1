use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use emojiclip::application::GalleryService;
use emojiclip::infrastructure::{
    AppConfig, CliArgs, ClipboardService, ConfigLoader, DesktopNotificationService,
    GalleryStore, HttpEmojiFetcher, RemoteFetcher,
};
use emojiclip::presentation::run_command;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::with_dir(
            path.parent().map(std::path::Path::to_path_buf).unwrap_or_default(),
        ),
        None => ConfigLoader::new()?,
    };

    let mut config = loader
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    config.merge_with_args(args);

    Ok(config)
}

fn create_service(config: &AppConfig) -> Result<GalleryService> {
    let transport = Arc::new(HttpEmojiFetcher::new(config.request_timeout())?);
    let fetcher = RemoteFetcher::new(transport, config.url_template());
    let store = GalleryStore::new(config.effective_gallery_dir(), fetcher)
        .with_policy(config.variant_policy);

    let clipboard = Arc::new(ClipboardService::new());
    let notifier = Arc::new(DesktopNotificationService::new(
        config.enable_desktop_notifications,
    ));

    Ok(GalleryService::new(store, clipboard, notifier))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    if let Some(text) = ClipboardService::daemon_text(std::env::args()) {
        ClipboardService::serve(&text)?;
        return Ok(ExitCode::SUCCESS);
    }

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = emojiclip::VERSION, "Starting emojiclip");

    let mut service = create_service(&config)?;
    service.start().wrap_err("Failed to open gallery")?;

    let mut input = std::io::stdin().lock();
    let mut out = std::io::stdout().lock();
    let succeeded = run_command(&mut service, args.command, &mut input, &mut out).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
