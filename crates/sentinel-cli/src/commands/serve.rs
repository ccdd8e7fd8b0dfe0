use std::sync::Arc;

use sentinel_core::errors::SentinelErrorCode;
use sentinel_core::SentinelConfig;
use sentinel_engine::pipeline::SentinelRunner;
use sentinel_engine::queue::{PipelineExecutor, ScanQueue};
use sentinel_gateway::AppState;

/// Start the scan workers and the gateway; block until ctrl-c, then drain.
pub fn serve(config: &SentinelConfig) -> Result<(), String> {
    let gw = &config.gateway;
    let runner = SentinelRunner::from_config(config);
    if !runner.has_notifier() {
        tracing::warn!(
            "webhook notifier not configured (notify.webhook_url, notify.auth_token); \
             non-baseline scan jobs will fail with CONFIG_ERROR"
        );
    }
    tracing::info!(db = %runner.db_path().display(), "scan workers use store");
    let executor = Arc::new(PipelineExecutor::new(runner));
    let queue = ScanQueue::start(gw.effective_workers(), gw.effective_queue_capacity(), executor)
        .map_err(|e| format!("failed to start scan workers: {e}"))?;
    let state = AppState::from_config(config, Arc::new(queue.handle())).map_err(|e| e.coded_string())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;
    let addr = format!("{}:{}", gw.effective_bind(), gw.effective_port());
    let served = runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        sentinel_gateway::serve(state, listener).await
    });

    queue.shutdown();
    tracing::info!("scan workers stopped");
    served.map_err(|e| format!("gateway on {addr} failed: {e}"))
}
