//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http11_server --directory /tmp/files --port 4221
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 FILES_DIR=/srv/files ./http11_server
//! ```
//!
//! La configuración se construye una sola vez al arrancar y luego solo se lee.

use crate::http::BodyLength;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "http11_server")]
#[command(about = "Servidor HTTP/1.1 mínimo con rutas echo, files y user-agent")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio donde /files lee y escribe archivos
    #[arg(long, default_value = ".", env = "FILES_DIR")]
    pub directory: PathBuf,

    /// Máximo de bytes (cabecera + body) que se guardan por request
    #[arg(long = "max-request-bytes", default_value = "1048576", env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Timeout de lectura/escritura del socket en milisegundos (0 = sin timeout)
    #[arg(long = "io-timeout-ms", default_value = "0", env = "IO_TIMEOUT_MS")]
    pub io_timeout_ms: u64,

    /// Cómo se compara el body con Content-Length
    #[arg(long = "body-length", value_enum, default_value = "chars", env = "BODY_LENGTH")]
    pub body_length: BodyLength,
}

/// Valores de configuración inválidos
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max request bytes must be >= 1")]
    InvalidMaxRequestBytes,

    #[error("files directory is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http11_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout del socket, si está activo
    pub fn io_timeout(&self) -> Option<Duration> {
        (self.io_timeout_ms > 0).then(|| Duration::from_millis(self.io_timeout_ms))
    }

    /// Valida la configuración
    ///
    /// Un directorio que todavía no existe es válido; /files responderá 404.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_request_bytes == 0 {
            return Err(ConfigError::InvalidMaxRequestBytes);
        }

        if self.directory.exists() && !self.directory.is_dir() {
            return Err(ConfigError::NotADirectory(self.directory.clone()));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        tracing::info!(
            address = %self.address(),
            directory = %self.directory.display(),
            max_request_bytes = self.max_request_bytes,
            io_timeout_ms = self.io_timeout_ms,
            body_length = ?self.body_length,
            "Configuración cargada"
        );
        if !self.directory.exists() {
            tracing::warn!(directory = %self.directory.display(), "El directorio de archivos no existe");
        }
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "0.0.0.0".to_string(),
            directory: PathBuf::from("."),
            max_request_bytes: 1_048_576,
            io_timeout_ms: 0,
            body_length: BodyLength::Chars,
        }
    }
}
