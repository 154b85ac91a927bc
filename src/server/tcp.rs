//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementacion del servidor TCP que maneja multiples conexiones simultaneas
//! usando threads. Cada conexión se procesa en su propio thread, atiende un
//! único request y se cierra.
//!
//! Los threads no comparten estado mutable: solo el router (y su contexto)
//! detrás de un `Arc`, que no cambia después de arrancar.

use super::reader::{self, ReadError};
use crate::config::Config;
use crate::http::{BodyLength, Request, Response};
use crate::router::{Context, Router};
use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Pausa tras un error de `accept` (ej: sin descriptores libres)
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Errores a nivel de servidor (no de conexión)
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo abrir el puerto: fatal al arrancar
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Se llamó a `serve` antes de `bind`
    #[error("server is not bound")]
    NotBound,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Ajustes que cada conexión copia de la configuración
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Límite de bytes por request
    pub max_request_bytes: usize,

    /// Timeout de lectura/escritura
    pub io_timeout: Option<Duration>,

    /// Modo de validación del body
    pub body_length: BodyLength,
}

impl ConnectionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_request_bytes: config.max_request_bytes,
            io_timeout: config.io_timeout(),
            body_length: config.body_length,
        }
    }
}

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    settings: ConnectionSettings,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let context = Context::new(config.directory.clone());
        let router = Router::with_default_routes(context);
        let settings = ConnectionSettings::from_config(&config);

        Self {
            config,
            router: Arc::new(router),
            settings,
            listener: None,
        }
    }

    /// Abre el puerto y retorna la dirección real (útil con puerto 0)
    pub fn bind(&mut self) -> Result<SocketAddr, ServerError> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
        let local_addr = listener.local_addr()?;

        tracing::info!(address = %local_addr, "Servidor escuchando");
        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Dirección en la que escucha, si ya se hizo `bind`
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Acepta conexiones para siempre; un thread por conexión
    ///
    /// Un error al aceptar se registra y el loop sigue tras una pausa corta.
    pub fn serve(&self) -> Result<(), ServerError> {
        let listener = self.listener.as_ref().ok_or(ServerError::NotBound)?;
        self.serve_incoming(listener.incoming());
        Ok(())
    }

    fn serve_incoming<I>(&self, incoming: I)
    where
        I: IntoIterator<Item = io::Result<TcpStream>>,
    {
        for stream in incoming {
            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => {
                    tracing::error!(error = %e, "Error al aceptar conexión");
                    thread::sleep(ACCEPT_ERROR_BACKOFF);
                }
            }
        }
    }

    /// `bind` + `serve`
    pub fn run(&mut self) -> Result<(), ServerError> {
        self.bind()?;
        self.serve()
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let router = Arc::clone(&self.router);
        let settings = self.settings;

        let peer_addr = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        tracing::info!(peer = %peer_addr, "Nueva conexión");

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer_addr))
            .spawn(move || {
                if let Err(e) = Self::handle_connection(stream, &router, settings) {
                    tracing::error!(peer = %peer_addr, error = %e, "Error en conexión");
                }
            });

        if let Err(e) = spawned {
            tracing::error!(error = %e, "No se pudo crear el thread de la conexión");
        }
    }

    /// Atiende un único request y cierra la conexión
    fn handle_connection(
        mut stream: TcpStream,
        router: &Router,
        settings: ConnectionSettings,
    ) -> io::Result<()> {
        let start = Instant::now();

        if let Some(timeout) = settings.io_timeout {
            stream.set_read_timeout(Some(timeout))?;
            stream.set_write_timeout(Some(timeout))?;
        }

        let read = reader::read_request(&mut stream, settings.max_request_bytes, settings.body_length);
        let raw = match read {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "No se pudo leer el request");
                if let ReadError::Io(io_error) = &e {
                    if io_error.kind() == io::ErrorKind::ConnectionReset {
                        return Ok(());
                    }
                }
                return Self::write_response(&mut stream, &Response::server_error());
            }
        };

        if raw.is_empty() {
            tracing::debug!("Conexión cerrada sin datos");
            return Ok(());
        }

        tracing::debug!(bytes = raw.len(), "Request leído");

        let response = match Request::parse_with(&raw, settings.body_length) {
            Ok(request) => {
                let outcome = router.route(&request);
                let response = Response::for_request(&request, outcome.status, outcome.body);
                let status = response.status();
                let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

                if status.is_server_error() {
                    tracing::warn!(
                        method = request.method(),
                        target = %request.target(),
                        status = status.as_u16(),
                        latency_ms,
                        "Request atendido con error"
                    );
                } else {
                    tracing::info!(
                        method = request.method(),
                        target = %request.target(),
                        status = status.as_u16(),
                        latency_ms,
                        "Request atendido"
                    );
                }
                response
            }
            Err(e) => {
                tracing::warn!(error = %e, "Request inválido");
                Response::server_error()
            }
        };

        Self::write_response(&mut stream, &response)
    }

    fn write_response(stream: &mut TcpStream, response: &Response) -> io::Result<()> {
        stream.write_all(&response.to_bytes())?;
        stream.flush()
    }
}
