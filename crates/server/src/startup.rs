use std::{net::SocketAddr, process::ExitCode, sync::Arc, time::Duration};

use axum::Router;
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use tracing::{error, info};
use utoipa::OpenApi;
use uuid::Uuid;

use configs::AppConfig;
use migration::{
    AnimalesMigrator, CarritoMigrator, CatalogoMigrator, FormulariosMigrator, MigratorTrait,
    OrdenesMigrator, UsuariosMigrator,
};
use service::admin::{AdminAuthorizer, DirectoryAdminAuthorizer, LocalAdminAuthorizer};
use service::animals::{repo::seaorm::SeaOrmAnimalRepository, AnimalService};
use service::bootstrap;
use service::cart::{repo::seaorm::SeaOrmCartRepository, CartService};
use service::catalog::{repo::seaorm::SeaOrmProductoRepository, CatalogService};
use service::forms::{repo::seaorm::SeaOrmFormRepository, FormService};
use service::orders::{repo::seaorm::SeaOrmOrderRepository, OrderService};
use service::peers::http::{HttpAnimalRegistry, HttpProductCatalog, HttpUserDirectory};
use service::peers::{AnimalRegistry, ProductCatalog, UserDirectory};
use service::users::{repo::seaorm::SeaOrmUserRepository, repository::UserRepository, UserService};

use crate::errors::StartupError;
use crate::openapi::{AnimalesApi, CarritoApi, CatalogoApi, FormulariosApi, OrdenesApi, UsuariosApi};
use crate::routes;

/// The six deployable services. Each one is its own binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Usuarios,
    Animales,
    Catalogo,
    Carrito,
    Formularios,
    Ordenes,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Usuarios => "usuarios",
            ServiceKind::Animales => "animales",
            ServiceKind::Catalogo => "catalogo",
            ServiceKind::Carrito => "carrito",
            ServiceKind::Formularios => "formularios",
            ServiceKind::Ordenes => "ordenes",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Usuarios => 8090,
            ServiceKind::Catalogo => 8091,
            ServiceKind::Carrito => 8092,
            ServiceKind::Animales => 8093,
            ServiceKind::Formularios => 8094,
            ServiceKind::Ordenes => 8095,
        }
    }
}

fn peer_timeout(cfg: &AppConfig) -> Duration {
    Duration::from_secs(cfg.peers.timeout_secs)
}

fn user_directory(cfg: &AppConfig) -> Result<Arc<dyn UserDirectory>, StartupError> {
    info!(peer = "usuarios", url = %cfg.peers.auth_service_url, "peer configured");
    Ok(Arc::new(HttpUserDirectory::new(&cfg.peers.auth_service_url, peer_timeout(cfg))?))
}

fn product_catalog(cfg: &AppConfig) -> Result<Arc<dyn ProductCatalog>, StartupError> {
    info!(peer = "catalogo", url = %cfg.peers.catalogo_service_url, "peer configured");
    Ok(Arc::new(HttpProductCatalog::new(&cfg.peers.catalogo_service_url, peer_timeout(cfg))?))
}

fn animal_registry(cfg: &AppConfig) -> Result<Arc<dyn AnimalRegistry>, StartupError> {
    info!(peer = "animales", url = %cfg.peers.animales_service_url, "peer configured");
    Ok(Arc::new(HttpAnimalRegistry::new(&cfg.peers.animales_service_url, peer_timeout(cfg))?))
}

/// Admin checks in every service but usuarios go through the user directory.
fn remote_admin(cfg: &AppConfig) -> Result<Arc<dyn AdminAuthorizer>, StartupError> {
    Ok(Arc::new(DirectoryAdminAuthorizer::new(user_directory(cfg)?)))
}

/// Migrate the service's tables, seed them, and assemble its router.
pub async fn build_app(kind: ServiceKind, cfg: &AppConfig, db: DatabaseConnection) -> Result<Router, StartupError> {
    let seed = &cfg.bootstrap;
    let (service_routes, doc) = match kind {
        ServiceKind::Usuarios => {
            UsuariosMigrator::up(&db, None).await?;
            let repo: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository { db });
            bootstrap::seed_admin(repo.as_ref(), seed).await?;
            let admin = Arc::new(LocalAdminAuthorizer::new(repo.clone()));
            (routes::usuarios::router(Arc::new(UserService::new(repo, admin))), UsuariosApi::openapi())
        }
        ServiceKind::Animales => {
            AnimalesMigrator::up(&db, None).await?;
            let repo = Arc::new(SeaOrmAnimalRepository { db });
            bootstrap::seed_animals(repo.as_ref(), seed).await?;
            let svc = AnimalService::new(repo, remote_admin(cfg)?);
            (routes::animales::router(Arc::new(svc)), AnimalesApi::openapi())
        }
        ServiceKind::Catalogo => {
            CatalogoMigrator::up(&db, None).await?;
            let repo = Arc::new(SeaOrmProductoRepository { db });
            bootstrap::seed_products(repo.as_ref(), seed).await?;
            let svc = CatalogService::new(repo, remote_admin(cfg)?);
            (routes::productos::router(Arc::new(svc)), CatalogoApi::openapi())
        }
        ServiceKind::Carrito => {
            CarritoMigrator::up(&db, None).await?;
            let svc = CartService::new(
                Arc::new(SeaOrmCartRepository { db }),
                user_directory(cfg)?,
                product_catalog(cfg)?,
            );
            (routes::carrito::router(Arc::new(svc)), CarritoApi::openapi())
        }
        ServiceKind::Formularios => {
            FormulariosMigrator::up(&db, None).await?;
            let users = user_directory(cfg)?;
            let svc = FormService::new(
                Arc::new(SeaOrmFormRepository { db }),
                users.clone(),
                animal_registry(cfg)?,
                Arc::new(DirectoryAdminAuthorizer::new(users)),
            );
            (routes::formularios::router(Arc::new(svc)), FormulariosApi::openapi())
        }
        ServiceKind::Ordenes => {
            OrdenesMigrator::up(&db, None).await?;
            let svc = OrderService::new(Arc::new(SeaOrmOrderRepository { db }), user_directory(cfg)?);
            (routes::ordenes::router(Arc::new(svc)), OrdenesApi::openapi())
        }
    };
    Ok(routes::app(service_routes, doc))
}

async fn shutdown_signal(kind: ServiceKind) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(service = kind.name(), event = "signal_error", error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = kind.name(), event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Connect, build the app and serve until Ctrl+C.
pub async fn run(kind: ServiceKind, cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let app = build_app(kind, &cfg, db).await?;

    let port = cfg.server.port_or(kind.default_port());
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{port}: {e}", cfg.server.host)))?;
    info!(service = kind.name(), %addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(kind))
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}

/// Process entry shared by every service binary.
pub fn launcher(kind: ServiceKind) -> ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    let service = kind.name();
    info!(service, event = "logger_init", "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "service starting"
    );

    rt.block_on(async move {
        match run(kind, cfg).await {
            Ok(()) => {
                info!(service, event = "stop", %service_id, pid, "service stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service, event = "run_failed", error = %e, "service exited with error");
                ExitCode::FAILURE
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports_are_distinct() {
        let kinds = [
            ServiceKind::Usuarios,
            ServiceKind::Animales,
            ServiceKind::Catalogo,
            ServiceKind::Carrito,
            ServiceKind::Formularios,
            ServiceKind::Ordenes,
        ];
        let mut ports: Vec<u16> = kinds.iter().map(|k| k.default_port()).collect();
        ports.sort_unstable();
        ports.dedup();
        assert_eq!(ports.len(), kinds.len());
        assert_eq!(ServiceKind::Usuarios.default_port(), 8090);
    }

    #[test]
    fn bad_peer_url_fails_startup() {
        let mut cfg = AppConfig::default();
        cfg.peers.auth_service_url = "not a url".into();
        assert!(matches!(remote_admin(&cfg), Err(StartupError::Peer(_))));
    }
}
