use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use crypto_core::jwt;
use db_pool::create_pool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tube_service::config::{Config, CorsConfig};
use tube_service::routes;
use tube_service::services::{CloudinaryUploader, MediaUploader};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    for origin in config.origins() {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

async fn healthcheck(port: u16) -> io::Result<()> {
    let url = format!("http://127.0.0.1:{port}/api/v1/health");
    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {e}");
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Tube Service
///
/// HTTP API for videos, comments, likes, tweets, playlists, subscriptions and
/// the channel dashboard, backed by PostgreSQL and an external media store.
///
/// Runs on port 8000 by default (TUBE_SERVICE_PORT). `tube-service healthcheck`
/// probes a running instance for container health checks.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        let port = db_pool::env_utils::parse_env_with_default("TUBE_SERVICE_PORT", 8000u16);
        return healthcheck(port).await;
    }

    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting tube-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    match &config.auth.jwt_public_key_pem {
        Some(public_key) => {
            if let Err(err) = jwt::initialize_jwt_validation_only(public_key) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize JWT keys: {err}"),
                ));
            }
        }
        None => {
            tracing::warn!(
                "JWT public key not configured; authentication middleware will fail requests"
            );
        }
    }

    let db_cfg = config.database.pool_config("tube-service");
    db_cfg.log_config();

    let db_pool = create_pool(db_cfg).await.map_err(|e| {
        tracing::error!("Database pool creation failed: {:#}", e);
        io::Error::new(io::ErrorKind::Other, format!("Database error: {e}"))
    })?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Database migration failed: {}", e);
                io::Error::new(io::ErrorKind::Other, format!("Migration error: {e}"))
            })?;
        tracing::info!("Database migrations applied");
    }

    let uploader: Arc<dyn MediaUploader> = Arc::new(
        CloudinaryUploader::new(&config.media)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );
    let uploader_data = web::Data::from(uploader);
    let media_data = web::Data::new(config.media.clone());
    let pool_data = web::Data::new(db_pool.clone());

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("HTTP server listening on {}", bind_address);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(uploader_data.clone())
            .app_data(media_data.clone())
            .wrap(build_cors(&cors_config))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .workers(config.app.workers)
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let joined = tokio::select! {
        joined = &mut server_task => joined,
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            server_task.await
        }
    };

    match joined {
        Ok(result) => result?,
        Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
    }

    db_pool.close().await;
    tracing::info!("tube-service shut down");
    Ok(())
}
