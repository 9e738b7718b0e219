mod error;
mod helpers;
mod responders;
mod routes;
mod state;

#[macro_use]
extern crate tracing;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chatbot::{Bot, ExactMatchResponder};
use clap::Parser;
use corrector::{CorrectionManager, Corrector};
use executor::ExecutorPool;
use hyper::Server;
use mimalloc::MiMalloc;
use routerify::RouterService;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use crate::state::State;

#[derive(Debug, Parser)]
#[clap(name = "kbot", about, version)]
struct Settings {
    /// The log level filter, any logs that are above this level won't
    /// be displayed.
    ///
    /// For more detailed control you can use the `RUST_LOG` env var.
    #[clap(long, default_value = "info", env)]
    log_level: Level,

    /// An optional bool to disable ASNI colours and pretty formatting for logs.
    /// You probably want to disable this if using file-based logging.
    #[clap(long, env)]
    disable_pretty_logs: bool,

    /// The host to bind to (normally: '127.0.0.1' or '0.0.0.0'.)
    #[clap(long, default_value = "127.0.0.1", env)]
    host: String,

    /// The port to bind the server to.
    #[clap(long, short, default_value = "5001", env)]
    port: u16,

    /// The text corpus the spell correction model is built from.
    #[clap(long, short, default_value = "corpus.txt", env)]
    corpus: PathBuf,

    /// An optional JSON object of `message -> reply` pairs the bot
    /// answers with.
    ///
    /// Without it every message gets one of the generic unknown replies.
    #[clap(long, env)]
    responses: Option<PathBuf>,

    /// The number of threads to use for the tokio runtime.
    ///
    /// If this is not set, the number of logical cores on the machine is used.
    #[clap(long, short = 't', env)]
    runtime_threads: Option<usize>,

    /// The number of threads used to run spell corrections.
    ///
    /// If this is not set, the number of logical cores on the machine is used.
    #[clap(long, env)]
    correction_threads: Option<usize>,

    /// A optional directory to send persistent logs.
    ///
    /// Logs are split into hourly chunks.
    #[clap(long, env)]
    log_dir: Option<String>,

    /// If enabled the content of chat messages wont be logged.
    #[clap(long, env)]
    silent_chat: bool,
}

fn main() {
    let settings = match setup() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error during server config parsing: {:?}", e);
            return;
        },
    };

    let _guard = setup_logger(
        settings.log_level,
        &settings.log_dir,
        !settings.disable_pretty_logs,
    );

    let threads = settings.runtime_threads.unwrap_or_else(num_cpus::get);
    info!("starting runtime with {} threads", threads);
    let maybe_runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .enable_all()
        .build();

    let result = match maybe_runtime {
        Ok(runtime) => runtime.block_on(start(settings)),
        Err(e) => {
            error!("error during runtime creation: {:?}", e);
            return;
        },
    };

    if let Err(e) = result {
        error!("error during server runtime: {:?}", e);
    }
}

fn setup_logger(
    level: Level,
    log_dir: &Option<String>,
    pretty: bool,
) -> Option<WorkerGuard> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", format!("{},hyper=info", level));
    }

    if let Some(dir) = log_dir {
        let file_appender = tracing_appender::rolling::hourly(dir, "kbot_.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let fmt = tracing_subscriber::fmt()
            .with_target(true)
            .with_writer(std::io::stdout.and(non_blocking))
            .with_thread_names(true)
            .with_thread_ids(true)
            .with_env_filter(EnvFilter::from_default_env());

        if pretty {
            fmt.pretty().with_ansi(true).init();
        } else {
            fmt.json().with_ansi(false).init();
        }

        Some(guard)
    } else {
        let fmt = tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(true)
            .with_env_filter(EnvFilter::from_default_env());

        if pretty {
            fmt.pretty().with_ansi(true).init();
        } else {
            fmt.compact().with_ansi(false).init();
        }

        None
    }
}

/// Parses the config
fn setup() -> Result<Settings> {
    let config: Settings = Settings::parse();
    Ok(config)
}

async fn start(settings: Settings) -> Result<()> {
    let state = create_state(&settings)?;
    let router = routes::get_router(state)?;
    let service = RouterService::new(router)
        .map_err(|e| anyhow!("failed to create router service: {}", e))?;

    let address: SocketAddr = format!("{}:{}", &settings.host, settings.port).parse()?;
    let server = Server::try_bind(&address)?
        .serve(service)
        .with_graceful_shutdown(shutdown_signal());

    info!("kbot has started!");
    info!(
        "serving requests @ http://{}:{}",
        &settings.host, settings.port
    );
    if let Err(e) = server.await {
        error!("server error: {:?}", e)
    };

    info!("kbot has shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for the shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }

    info!("shutdown signal received, finishing in-flight requests...");
}

fn create_state(settings: &Settings) -> Result<State> {
    let corrector = load_corrector(&settings.corpus)?;
    let bot = setup_bot(&settings.responses)?;

    let threads = settings.correction_threads.unwrap_or_else(num_cpus::get);
    let pool = ExecutorPool::create(threads)?;
    info!("correction pool running with {} threads", pool.concurrency());

    Ok(State::new(
        settings.corpus.clone(),
        Arc::new(CorrectionManager::new(corrector)),
        bot,
        Arc::new(pool),
        !settings.silent_chat,
    ))
}

#[instrument(name = "setup-corrector", level = "info")]
fn load_corrector(corpus: &Path) -> Result<Corrector> {
    info!("building spell correction model...");

    let corrector = Corrector::from_path(corpus)
        .context("the spell corrector cannot run without its corpus")?;

    Ok(corrector)
}

#[instrument(name = "setup-bot", level = "info")]
fn setup_bot(responses: &Option<PathBuf>) -> Result<Bot<ExactMatchResponder>> {
    let responder = if let Some(path) = responses {
        ExactMatchResponder::from_path(path)?
    } else {
        warn!("no responses file given, every message will get a generic reply");
        ExactMatchResponder::default()
    };

    Ok(Bot::new(responder))
}
