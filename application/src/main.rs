use std::{io, process::ExitCode, sync::OnceLock};

use application::{
    cli, session, Args, Config, Context, Prompt, Service, Terminal,
};
use service::infra::Rest;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args {
        config,
        yes,
        command,
    } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config {
        api,
        session,
        service,
        log,
    } = Config::new(&config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let api: service::infra::rest::Config = api.into();
    log::debug!("using backend at `{}`", api.base_url);
    let rest = Rest::new(&api).map_err(|e| {
        log::error!("failed to initialize `Rest` client: {e}");
    })?;
    let service = Service::new(service.into(), rest);

    let store = session::File::new(session.file);
    let mut ctx = Context::hydrate(service, store).map_err(|e| {
        eprintln!("{}", e.message);
    })?;

    let mut prompt = Prompt::new(Terminal, io::stdout(), yes);
    cli::run(command, &mut ctx, &mut prompt)
        .await
        .map_err(|e| {
            log::debug!("{e}");
            eprintln!("{}", e.message);
        })
}
