mod core;
mod features;
mod modules;
mod shared;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::app::{create_app, AppServices};
use crate::core::config::Config;
use crate::core::database;
use crate::features::courses::{CourseService, PgCourseRepository};
use crate::features::report_templates::{PgReportTemplateRepository, ReportTemplateService};
use crate::features::reports::{PgReportRepository, ReportPdfService};
use crate::features::uploads::UploadService;
use crate::modules::pdf::ChromeRenderer;
use crate::modules::storage::LocalStorage;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Repositories
    let course_repository = Arc::new(PgCourseRepository::new(pool.clone()));
    let report_repository = Arc::new(PgReportRepository::new(pool.clone()));
    let template_repository = Arc::new(PgReportTemplateRepository::new(pool.clone()));

    // Headless Chrome is launched on the first render
    let renderer = Arc::new(ChromeRenderer::new(config.renderer.clone()));
    tracing::info!(
        "PDF renderer initialized (max_concurrency={}, timeout={}s)",
        config.renderer.max_concurrency,
        config.renderer.render_timeout.as_secs()
    );

    let storage = Arc::new(LocalStorage::new(
        &config.app.public_dir,
        &config.upload.uploads_dir,
    ));
    storage
        .ensure_dir_exists()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare uploads directory: {}", e))?;
    tracing::info!("Upload storage initialized at {}", storage.root().display());

    let services = AppServices {
        courses: Arc::new(CourseService::new(course_repository)),
        report_templates: Arc::new(ReportTemplateService::new(template_repository.clone())),
        report_pdf: Arc::new(ReportPdfService::new(
            report_repository,
            template_repository,
            renderer.clone(),
        )),
        uploads: Arc::new(UploadService::new(storage, config.upload.max_upload_size)),
    };
    tracing::info!("Services initialized");

    let app = create_app(services, &config.app, &config.swagger);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    renderer.shutdown();
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
