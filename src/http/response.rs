//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Encoding: gzip\r\n          (solo si se negoció)
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! El orden de los headers es fijo y no hay CRLF después del body.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http11_server::http::{Body, Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok).with_body(Body::from("hi"));
//!
//! let bytes = response.to_bytes();
//! assert_eq!(
//!     bytes,
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nhi"
//! );
//! ```

use super::encoding::{self, EncodingError, Negotiated, CONTENT_ENCODING};
use super::{Request, StatusCode};

/// Cuerpo de una respuesta: texto o bytes opacos
///
/// El `Content-Type` depende solo de la variante, nunca del contenido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Texto plano (echo, user-agent)
    Text(String),

    /// Bytes crudos (archivos, bodies comprimidos)
    Binary(Vec<u8>),
}

impl Body {
    /// `Content-Type` asociado a la variante
    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Text(_) => "text/plain",
            Body::Binary(_) => "application/octet-stream",
        }
    }

    /// Bytes que van al socket
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(text) => text.as_bytes(),
            Body::Binary(bytes) => bytes,
        }
    }

    /// Tamaño en bytes (no en caracteres)
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Binary(bytes)
    }
}

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en el orden en que se escriben
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede no existir)
    body: Option<Body>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 500 sin headers ni body
    pub fn server_error() -> Self {
        Self::new(StatusCode::InternalServerError)
    }

    /// Agrega un header. Si ya existe, se sobrescribe en su lugar.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Versión mutable de [`Response::with_header`]
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el body y agrega `Content-Type` y `Content-Length`
    ///
    /// `Content-Length` siempre se mide en bytes.
    pub fn with_body(mut self, body: Body) -> Self {
        self.add_header("Content-Type", body.content_type());
        self.add_header("Content-Length", &body.len().to_string());
        self.body = Some(body);
        self
    }

    /// Construye la respuesta para un request, negociando la codificación
    ///
    /// Sin body no hay negociación ni headers.
    pub fn for_request(request: &Request, status: StatusCode, body: Option<Body>) -> Self {
        match body {
            Some(body) => Self::from_negotiation(status, encoding::negotiate(request, body)),
            None => Self::new(status),
        }
    }

    /// Arma la respuesta con el resultado de la negociación
    ///
    /// Si la compresión falló, el status original se descarta y se
    /// responde 500 sin body.
    pub fn from_negotiation(
        status: StatusCode,
        negotiated: Result<Negotiated, EncodingError>,
    ) -> Self {
        match negotiated {
            Ok(Negotiated { encoding, body }) => {
                let mut response = Self::new(status);
                if let Some(coding) = encoding {
                    response.add_header(CONTENT_ENCODING, coding.as_str());
                }
                response.with_body(body)
            }
            Err(e) => {
                tracing::warn!(error = %e, status = status.as_u16(), "Fallo al codificar el body");
                Self::server_error()
            }
        }
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        if let Some(body) = &self.body {
            result.extend_from_slice(body.as_bytes());
        }

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene el body, si hay
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}

/// Serializa la respuesta de un request: negociación + bytes
pub fn serialize(request: &Request, status: StatusCode, body: Option<Body>) -> Vec<u8> {
    Response::for_request(request, status, body).to_bytes()
}
