use anyhow::Context;
use roster::domain::config::ApiConfig;
use roster::kernel::config::load_config;
use roster_server::{Server, init_logger};
use tracing::info;

#[cfg(feature = "profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[roster_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "profiling")]
    let _profiler = dhat::Profiler::new_heap();

    // An optional first argument replaces the default `server` config file.
    let path = std::env::args().nth(1);
    let cfg: ApiConfig = load_config(path).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;
    info!(
        port = cfg.server.port,
        registry = %cfg.registry.base_url,
        "Configuration loaded"
    );

    Server::builder().config(cfg).build()?.run().await
}
