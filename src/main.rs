use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use fleet_tracker::config::EnvironmentConfig;
use fleet_tracker::database::DatabaseConnection;
use fleet_tracker::repositories::UserRepository;
use fleet_tracker::routes::create_app_router;
use fleet_tracker::services::bootstrap::seed_users;
use fleet_tracker::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fleet_tracker=debug,tower_http=info")),
        )
        .init();

    info!("🚐 Fleet Tracker - Control de flotilla");
    info!("======================================");

    let config = EnvironmentConfig::from_env().context("configuración inválida")?;
    info!("⚙️ Entorno: {}", config.environment);
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío en producción: se aceptan todos los orígenes");
    } else if config.is_development() {
        info!("🧪 Modo desarrollo");
    }

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    let pool = db_connection.pool().clone();

    seed_users(&UserRepository::new(pool.clone()), &config)
        .await
        .context("no se pudieron crear los usuarios iniciales")?;

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .context("HOST/PORT no forman una dirección válida")?;
    let app = create_app_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   GET  /api/dashboard - Tablero según rol");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   POST /api/vehicles - Añadir vehículo");
    info!("   GET  /api/vehicles/:id - Detalles, viajes y bitácora");
    info!("   POST /api/vehicles/:id/maintenance - Enviar a mantenimiento");
    info!("   POST /api/vehicles/:id/release - Liberar de mantenimiento");
    info!("   POST /api/vehicles/:id/incidents - Reportar incidente");
    info!("📝 Solicitudes y viajes:");
    info!("   POST /api/requests - Solicitar vehículo");
    info!("   POST /api/requests/:id/approve - Aprobar solicitud");
    info!("   POST /api/requests/:id/reject - Rechazar solicitud");
    info!("   GET  /api/trips/:id - Detalle de viaje");
    info!("   POST /api/trips/:id/complete - Completar viaje");
    info!("🚨 Incidentes y reportes:");
    info!("   GET  /api/incidents - Listar incidentes");
    info!("   GET  /api/incidents/:id - Detalle de incidente");
    info!("   POST /api/incidents/:id/resolve - Resolver incidente");
    info!("   GET  /api/reports/trips - Reporte de viajes");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
