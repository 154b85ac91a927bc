//! # HTTP/1.1 Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: inicializa logging, lee la configuración
//! del CLI/entorno y arranca el loop de conexiones.

use http11_server::config::Config;
use http11_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Nivel de log desde RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http11_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("http11_server v{} iniciando", env!("CARGO_PKG_VERSION"));

    let config = Config::new();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuración inválida");
        std::process::exit(2);
    }
    config.log_summary();

    // Crear el servidor
    let mut server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "Error fatal");
        std::process::exit(1);
    }
}
