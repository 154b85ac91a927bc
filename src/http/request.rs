//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notes.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /target VERSION` (tres tokens exactos)
//! 2. **Headers**: Pares `Name: Value`, separados por `": "` literal
//! 3. **Empty Line**: el primer `\r\n\r\n` separa headers del body
//! 4. **Body**: Opcional; si existe debe coincidir con `Content-Length`

use std::collections::HashMap;
use thiserror::Error;

/// Separador entre la cabecera del request y el body
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Nombre del header que declara el tamaño del body
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Cómo se mide el body al compararlo con `Content-Length`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BodyLength {
    /// Cuenta caracteres Unicode
    #[default]
    Chars,

    /// Cuenta bytes crudos
    Bytes,
}

impl BodyLength {
    /// Mide el body según el modo
    ///
    /// En `Chars` cada byte que no forma UTF-8 válido cuenta como un carácter,
    /// así un body binario también se puede medir.
    pub fn measure(&self, body: &[u8]) -> usize {
        match self {
            BodyLength::Chars => body
                .utf8_chunks()
                .map(|chunk| chunk.valid().chars().count() + chunk.invalid().len())
                .sum(),
            BodyLength::Bytes => body.len(),
        }
    }
}

/// Representa un request HTTP parseado
///
/// Es inmutable: solo se construye con [`Request::parse`] o
/// [`Request::parse_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método HTTP tal cual llegó (no se valida contra una lista)
    method: String,

    /// Segmentos no vacíos del target (ej: ["echo", "hello"])
    path_segments: Vec<String>,

    /// Versión HTTP (ej: "HTTP/1.1"), sin validar
    version: String,

    /// Headers HTTP, con el nombre exacto que envió el cliente
    headers: HashMap<String, String>,

    /// Body del request (vacío si no hay)
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// La cabecera no es UTF-8 válido
    #[error("request head is not valid UTF-8")]
    InvalidEncoding,

    /// La request line no tiene exactamente tres tokens
    #[error("malformed request line: {0:?}")]
    InvalidRequestLine(String),

    /// Un header no se separa en exactamente dos partes con ": "
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    /// Hay body pero no hay `Content-Length`
    #[error("missing Content-Length for non-empty body")]
    MissingContentLength,

    /// `Content-Length` no es un entero no negativo
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// El body no mide lo que declara `Content-Length`
    #[error("content-length mismatch: header says {expected}, body has {actual}")]
    ContentLengthMismatch { expected: usize, actual: usize },
}

impl Request {
    /// Parsea un request midiendo el body en caracteres
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http11_server::http::Request;
    ///
    /// let raw = b"GET /echo/hello HTTP/1.1\r\nUser-Agent: curl\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path_segments(), ["echo", "hello"]);
    /// assert_eq!(request.header("User-Agent"), Some("curl"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with(buffer, BodyLength::Chars)
    }

    /// Parsea un request eligiendo cómo se valida el tamaño del body
    pub fn parse_with(buffer: &[u8], body_length: BodyLength) -> Result<Self, ParseError> {
        let (head, body) = Self::split_head(buffer);

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;

        // `split` siempre produce al menos un elemento
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();

        // 1. Request line
        let (method, target, version) = Self::parse_request_line(request_line)?;

        // 2. Headers
        let headers = Self::parse_headers(lines)?;

        // 3. Body contra Content-Length
        Self::check_body(&headers, body, body_length)?;

        Ok(Request {
            method: method.to_string(),
            path_segments: Self::parse_path(target),
            version: version.to_string(),
            headers,
            body: body.to_vec(),
        })
    }

    /// Separa en el primer `\r\n\r\n`. Sin separador todo es cabecera.
    fn split_head(buffer: &[u8]) -> (&[u8], &[u8]) {
        match buffer
            .windows(HEAD_TERMINATOR.len())
            .position(|window| window == HEAD_TERMINATOR)
        {
            Some(pos) => (&buffer[..pos], &buffer[pos + HEAD_TERMINATOR.len()..]),
            None => (buffer, &buffer[buffer.len()..]),
        }
    }

    /// Formato: `GET /path HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [method, target, version] => Ok((*method, *target, *version)),
            _ => Err(ParseError::InvalidRequestLine(line.to_string())),
        }
    }

    /// Divide el target en `/` descartando los segmentos vacíos
    ///
    /// Ejemplo: "//echo//hi/" → ["echo", "hi"]
    fn parse_path(target: &str) -> Vec<String> {
        target
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Cada header tiene formato exacto "Name: Value"
    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            // Solo aparece al final de una cabecera sin terminador
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(": ").collect();
            match parts.as_slice() {
                [name, value] => {
                    headers.insert(name.to_string(), value.to_string());
                }
                _ => return Err(ParseError::MalformedHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    /// Un body vacío nunca necesita `Content-Length`
    fn check_body(
        headers: &HashMap<String, String>,
        body: &[u8],
        body_length: BodyLength,
    ) -> Result<(), ParseError> {
        if body.is_empty() {
            return Ok(());
        }

        let declared = headers
            .get(CONTENT_LENGTH)
            .ok_or(ParseError::MissingContentLength)?;
        let expected: usize = declared
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(declared.clone()))?;

        let actual = body_length.measure(body);
        if actual != expected {
            return Err(ParseError::ContentLengthMismatch { expected, actual });
        }

        Ok(())
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene los segmentos del path
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Obtiene un segmento por posición
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.path_segments.get(index).map(|s| s.as_str())
    }

    /// Reconstruye el target normalizado (solo para logs)
    pub fn target(&self) -> String {
        format!("/{}", self.path_segments.join("/"))
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body como texto, si es UTF-8
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}
