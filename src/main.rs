//! updatenotify - "update available" notification formatter.
//!
//! CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use updatenotify::l10n::CatalogFactory;
use updatenotify::notify::{ConsoleOutput, InMemoryStore};
use updatenotify::registry::{HostState, StaticRegistry};
use updatenotify::urls::BaseUrlResolver;
use updatenotify::{
    Commands, Config, NotificationManager, PrepareConfig, PrepareError, UpdateNotifier,
    UpdateNotifyError,
};

fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("updatenotify=debug,info")
    } else {
        EnvFilter::new("updatenotify=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match config.command.clone() {
        Commands::Prepare(prepare_config) => run_prepare(prepare_config, &config),
        Commands::Sweep => run_sweep(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

/// Everything a notifier needs, built from the CLI configuration.
struct Host {
    store: InMemoryStore,
    manager: NotificationManager,
    registry: StaticRegistry,
}

fn build_host(config: &Config) -> Result<Host, UpdateNotifyError> {
    let path = config.state_path()?;
    let state = HostState::load(&path)?;
    info!("Using host state {:?}", path);

    let mut l10n = CatalogFactory::with_builtin();
    l10n.merge(&state.translations);

    let resolver = BaseUrlResolver::new(&config.base_url)?;
    info!("Resolving icons against {}", resolver.base());

    let registry = StaticRegistry::from_state(&state);
    let store = InMemoryStore::with_pending(state.pending.clone());
    let notifier = UpdateNotifier::new(
        Arc::new(resolver),
        Arc::new(store.clone()),
        Arc::new(l10n),
        Arc::new(registry.clone()),
    );
    let manager = NotificationManager::new().with_notifier(Arc::new(notifier));

    Ok(Host {
        store,
        manager,
        registry,
    })
}

fn run_prepare(prepare_config: PrepareConfig, config: &Config) -> Result<(), ExitCode> {
    let host = build_host(config).map_err(|e| {
        error!("Failed to set up: {}", e);
        ExitCode::FAILURE
    })?;
    let console = ConsoleOutput::new(config.verbose, config.json);

    let mut notification = prepare_config.notification();
    match host.manager.prepare(&mut notification, &config.lang) {
        Ok(()) => {
            console.print_notification(&notification);
            Ok(())
        }
        Err(UpdateNotifyError::Suppressed(e)) => {
            console.print_rejection(&notification, &e);
            Err(ExitCode::FAILURE)
        }
        Err(UpdateNotifyError::NoNotifier(app)) => {
            console.print_rejection(&notification, &PrepareError::Unsupported { app });
            Err(ExitCode::FAILURE)
        }
        Err(e) => {
            error!("{}", e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn run_sweep(config: &Config) -> Result<(), ExitCode> {
    let host = build_host(config).map_err(|e| {
        error!("Failed to set up: {}", e);
        ExitCode::FAILURE
    })?;
    let console = ConsoleOutput::new(config.verbose, config.json);

    console.print_setup(
        &host.manager.notifiers(&config.lang),
        &host.registry.installed(),
    );
    console.print_info(&format!(
        "Preparing {} pending notifications",
        host.store.len()
    ));
    let report = host.manager.sweep(&host.store, &config.lang);
    console.print_report(&report);

    Ok(())
}
