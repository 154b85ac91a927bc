//! # Módulo HTTP
//!
//! Este módulo implementa la capa de protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (request line, headers, body)
//! - Negociación de `Accept-Encoding` y compresión gzip
//! - Serialización de responses a bytes
//! - Códigos de estado
//!
//! ## Alcance
//!
//! - Una petición por conexión (sin keep-alive)
//! - Sin chunked transfer encoding ni pipelining
//! - Headers sin continuación de línea
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/hello HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```

pub mod encoding; // Negociación de contenido y gzip
pub mod request;  // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status;   // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use encoding::{ContentCoding, EncodingError};
pub use request::{BodyLength, ParseError, Request};
pub use response::{serialize, Body, Response};
pub use status::StatusCode;
