//! # Negociación de Contenido
//! src/http/encoding.rs
//!
//! El cliente declara en `Accept-Encoding` qué codificaciones acepta,
//! separadas por `", "`. El servidor recorre la lista en el orden del
//! cliente y aplica la primera que soporta (hoy solo `gzip`).
//!
//! ```text
//! Accept-Encoding: br, gzip     →  Content-Encoding: gzip
//! Accept-Encoding: br           →  (sin transformación)
//! ```

use super::request::Request;
use super::response::Body;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use thiserror::Error;

/// Header de la petición con las codificaciones aceptadas
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";

/// Header de la respuesta con la codificación aplicada
pub const CONTENT_ENCODING: &str = "Content-Encoding";

/// Codificaciones que el servidor sabe aplicar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    /// DEFLATE dentro de un contenedor gzip
    Gzip,
}

impl ContentCoding {
    /// Reconoce un token de `Accept-Encoding`
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(ContentCoding::Gzip),
            _ => None,
        }
    }

    /// Valor para `Content-Encoding`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCoding::Gzip => "gzip",
        }
    }

    /// Codifica el body completo
    pub fn encode(&self, body: &Body) -> Result<Vec<u8>, EncodingError> {
        match self {
            ContentCoding::Gzip => gzip(body.as_bytes()),
        }
    }
}

/// Error al comprimir el body
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("gzip compression failed: {0}")]
    Gzip(#[from] std::io::Error),
}

/// Resultado de la negociación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    /// Codificación aplicada, si hubo alguna
    pub encoding: Option<ContentCoding>,

    /// Body final (comprimido o el original)
    pub body: Body,
}

/// Elige la primera codificación soportada de la lista del cliente
///
/// # Ejemplo
/// ```
/// use http11_server::http::encoding::{select, ContentCoding};
///
/// assert_eq!(select("deflate, gzip"), Some(ContentCoding::Gzip));
/// assert_eq!(select("br"), None);
/// ```
pub fn select(accept_encoding: &str) -> Option<ContentCoding> {
    if accept_encoding.is_empty() {
        return None;
    }

    accept_encoding
        .split(", ")
        .find_map(ContentCoding::from_token)
}

/// Aplica al body la codificación que pidió el cliente
///
/// Sin `Accept-Encoding`, vacío, o sin tokens soportados, el body no se toca.
/// Un body comprimido siempre pasa a ser binario.
pub fn negotiate(request: &Request, body: Body) -> Result<Negotiated, EncodingError> {
    let Some(coding) = request.header(ACCEPT_ENCODING).and_then(select) else {
        return Ok(Negotiated { encoding: None, body });
    };

    let compressed = coding.encode(&body)?;
    tracing::debug!(
        encoding = coding.as_str(),
        original = body.len(),
        compressed = compressed.len(),
        "Body codificado"
    );

    Ok(Negotiated {
        encoding: Some(coding),
        body: Body::Binary(compressed),
    })
}

/// Comprime en memoria con gzip
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>, EncodingError> {
    gzip_into(bytes, Vec::new())
}

/// Comprime hacia cualquier writer; el stream queda cerrado al retornar
pub fn gzip_into<W: Write>(bytes: &[u8], writer: W) -> Result<W, EncodingError> {
    let mut encoder = GzEncoder::new(writer, Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::{self, Read};

    fn make_request(accept: Option<&str>) -> Request {
        let raw = match accept {
            Some(value) => format!("GET /echo/x HTTP/1.1\r\nAccept-Encoding: {}\r\n\r\n", value),
            None => "GET /echo/x HTTP/1.1\r\n\r\n".to_string(),
        };
        Request::parse(raw.as_bytes()).unwrap()
    }

    fn gunzip(bytes: &[u8]) -> Vec<u8> {
        let mut decoded = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut decoded).unwrap();
        decoded
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_select_first_supported() {
        assert_eq!(select("gzip"), Some(ContentCoding::Gzip));
        assert_eq!(select("br, gzip"), Some(ContentCoding::Gzip));
        assert_eq!(select("invalid-1, gzip, invalid-2"), Some(ContentCoding::Gzip));
    }

    #[test]
    fn test_select_unsupported() {
        assert_eq!(select(""), None);
        assert_eq!(select("br"), None);
        assert_eq!(select("deflate, br"), None);
        // El separador es ", " literal
        assert_eq!(select("br,gzip"), None);
    }

    #[test]
    fn test_negotiate_without_header() {
        let request = make_request(None);
        let negotiated = negotiate(&request, Body::Text("hi".to_string())).unwrap();

        assert_eq!(negotiated.encoding, None);
        assert_eq!(negotiated.body, Body::Text("hi".to_string()));
    }

    #[test]
    fn test_negotiate_unsupported_leaves_body() {
        let request = make_request(Some("br"));
        let negotiated = negotiate(&request, Body::Text("hi".to_string())).unwrap();

        assert_eq!(negotiated.encoding, None);
        assert_eq!(negotiated.body, Body::Text("hi".to_string()));
    }

    #[test]
    fn test_negotiate_gzip_text_round_trip() {
        let request = make_request(Some("gzip"));
        let negotiated = negotiate(&request, Body::Text("hello".to_string())).unwrap();

        assert_eq!(negotiated.encoding, Some(ContentCoding::Gzip));
        match negotiated.body {
            Body::Binary(bytes) => assert_eq!(gunzip(&bytes), b"hello"),
            Body::Text(_) => panic!("compressed body must be binary"),
        }
    }

    #[test]
    fn test_negotiate_gzip_binary_round_trip() {
        let request = make_request(Some("br, gzip"));
        let original = vec![0u8, 1, 2, 255, 254, 0, 0, 7];
        let negotiated = negotiate(&request, Body::Binary(original.clone())).unwrap();

        assert_eq!(negotiated.encoding, Some(ContentCoding::Gzip));
        assert_eq!(gunzip(negotiated.body.as_bytes()), original);
    }

    #[test]
    fn test_gzip_output_has_magic_header() {
        let compressed = gzip(b"abc").unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_gzip_failure_is_reported() {
        let result = gzip_into(b"abc", FailingWriter);
        assert!(matches!(result, Err(EncodingError::Gzip(_))));
    }
}
