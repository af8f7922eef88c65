use staticd::config::Config;
use staticd::logger;
use staticd::server::Server;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut cfg = Config::load()?;
    apply_cli_overrides(&mut cfg)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

/// `staticd [root] [port]` - positional overrides on top of config and env
fn apply_cli_overrides(cfg: &mut Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    if let Some(root) = args.next() {
        cfg.server.root = root;
    }
    if let Some(port) = args.next() {
        cfg.server.port = port
            .parse()
            .map_err(|e| format!("Invalid port '{port}': {e}"))?;
    }
    Ok(())
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let server = Server::bind(cfg).await?;
    let addr = server.local_addr()?;
    logger::log_server_start(&addr, server.config());
    server.run().await
}
