//! # HTTP/1.1 Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: parsing de requests,
//! negociación de `Accept-Encoding` (gzip) y serialización de responses.
//!
//! ## Arquitectura
//!
//! ```text
//! bytes → Request::parse → Router → Handler → Outcome
//!       → Response::for_request (gzip opcional) → to_bytes → bytes
//! ```
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing, negociación de contenido y serialización
//! - `router`: Enrutamiento por primer segmento del path
//! - `handlers`: Rutas echo, files y user-agent
//! - `server`: Lógica del servidor TCP y lectura de requests
//! - `config`: Argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http11_server::config::Config;
//! use http11_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
