use crate::cli::ServeArgs;
use crate::infra::{seed_demo_directory, AppState, ConfiguredLeadPublisher, InMemoryStore};
use crate::routes::with_profile_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kai_profile::advisor::AdvisorService;
use kai_profile::assessment::{ArchetypeRegistry, AssessmentService, QuestionCatalog};
use kai_profile::config::AppConfig;
use kai_profile::directory::DirectoryService;
use kai_profile::error::AppError;
use kai_profile::telemetry;
use std::fs::File;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = match args.catalog.take() {
        Some(path) => QuestionCatalog::from_json_reader(File::open(path)?)?,
        None => QuestionCatalog::standard(),
    };
    let registry = Arc::new(ArchetypeRegistry::standard());

    let store = Arc::new(InMemoryStore::default());
    let directory = Arc::new(DirectoryService::new(store.clone()));
    if !args.no_seed {
        seed_demo_directory(directory.as_ref())?;
    }

    let leads = Arc::new(ConfiguredLeadPublisher::from_config(&config.leads));
    let assessment = Arc::new(AssessmentService::new(
        Arc::new(catalog),
        registry.clone(),
        store,
        leads,
    ));
    let advisor = Arc::new(AdvisorService::from_config(&config.advisor, registry)?);

    let app = with_profile_routes(assessment, directory, advisor.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "kai profile service ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(advisor))
        .await?;
    Ok(())
}

/// Resolves on Ctrl-C and cancels in-flight advisor calls.
async fn shutdown_signal(advisor: Arc<AdvisorService>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(open_chats = advisor.open_chats(), "shutting down");
    advisor.shutdown();
}
