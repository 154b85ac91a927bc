//! # Lectura de Requests
//! src/server/reader.rs
//!
//! Lee del socket hasta tener un request completo:
//!
//! 1. Bloques de `READ_CHUNK` bytes hasta encontrar `\r\n\r\n`
//! 2. Si hay `Content-Length`, sigue leyendo hasta que el body mida al
//!    menos eso, con la misma vara que usa el parser ([`BodyLength`])
//! 3. EOF corta la lectura y se retorna lo que haya
//!
//! Nunca se guardan más de `limit` bytes. Un `Content-Length` que ya no
//! cabe en el límite se rechaza sin esperar el body.

use crate::http::request::{BodyLength, CONTENT_LENGTH, HEAD_TERMINATOR};
use std::io::{self, Read};
use thiserror::Error;

/// Tamaño de cada lectura del socket
pub const READ_CHUNK: usize = 1024;

/// Errores al leer un request
#[derive(Debug, Error)]
pub enum ReadError {
    /// Error de I/O del socket
    #[error("socket read failed: {0}")]
    Io(#[from] io::Error),

    /// El request supera el límite configurado
    #[error("request exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Dónde empieza el body y cuánto debe medir
#[derive(Debug, Clone, Copy)]
struct Framing {
    body_start: usize,
    declared: usize,

    /// Largo de buffer a partir del cual vale la pena volver a medir
    next_check: usize,
}

impl Framing {
    fn new(head_end: usize, declared: usize, limit: usize) -> Result<Self, ReadError> {
        let body_start = head_end + HEAD_TERMINATOR.len();

        // Cada carácter ocupa al menos un byte, así que esto es un mínimo
        let next_check = body_start
            .checked_add(declared)
            .filter(|&total| total <= limit)
            .ok_or(ReadError::TooLarge { limit })?;

        Ok(Self {
            body_start,
            declared,
            next_check,
        })
    }

    /// `true` cuando el body ya mide lo declarado
    fn is_complete(&mut self, buffer: &[u8], body_length: BodyLength) -> bool {
        if buffer.len() < self.next_check {
            return false;
        }

        let body = &buffer[self.body_start..];
        let measured = match body_length {
            BodyLength::Chars => body_length.measure(without_partial_tail(body)),
            BodyLength::Bytes => body.len(),
        };

        if measured >= self.declared {
            return true;
        }

        self.next_check = buffer.len().saturating_add(self.declared - measured);
        false
    }
}

/// Lee un request completo (cabecera + body) del reader
pub fn read_request<R: Read>(
    reader: &mut R,
    limit: usize,
    body_length: BodyLength,
) -> Result<Vec<u8>, ReadError> {
    let mut buffer = Vec::with_capacity(READ_CHUNK.min(limit));
    let mut chunk = [0u8; READ_CHUNK];
    let mut framing: Option<Framing> = None;

    loop {
        if let Some(framing) = framing.as_mut() {
            if framing.is_complete(&buffer, body_length) {
                break;
            }
        }

        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if buffer.len() + n > limit {
            return Err(ReadError::TooLarge { limit });
        }
        buffer.extend_from_slice(&chunk[..n]);

        if framing.is_none() {
            if let Some(head_end) = find_terminator(&buffer) {
                let declared = declared_length(&buffer[..head_end]).unwrap_or(0);
                framing = Some(Framing::new(head_end, declared, limit)?);
            }
        }
    }

    Ok(buffer)
}

/// Quita una secuencia UTF-8 cortada al final (el resto puede venir en otro read)
fn without_partial_tail(bytes: &[u8]) -> &[u8] {
    let tail = bytes
        .utf8_chunks()
        .last()
        .map(|chunk| chunk.invalid())
        .unwrap_or_default();

    match std::str::from_utf8(tail) {
        Err(e) if e.error_len().is_none() => &bytes[..bytes.len() - tail.len()],
        _ => bytes,
    }
}

/// Posición del primer `\r\n\r\n`
fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

/// `Content-Length` leído sin validar; el parser decide si es correcto
fn declared_length(head: &[u8]) -> Option<usize> {
    let head = std::str::from_utf8(head).ok()?;
    let prefix = format!("{}: ", CONTENT_LENGTH);

    head.split("\r\n")
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .last()
        .and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Entrega los datos en pedazos, como un socket lento
    struct ChunkedReader {
        chunks: Vec<Vec<u8>>,
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    /// Falla si se lee después de entregar todo (simula cliente esperando)
    struct StrictReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for StrictReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::WouldBlock, "read past request")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_simple_request() {
        let raw = b"GET / HTTP/1.1\r\n\r\n".to_vec();
        let mut reader = StrictReader { data: Cursor::new(raw.clone()) };

        assert_eq!(read_request(&mut reader, 4096, BodyLength::Chars).unwrap(), raw);
    }

    #[test]
    fn test_read_body_across_chunks() {
        let mut reader = ChunkedReader {
            chunks: vec![
                b"POST /files/a HTTP/1.1\r\nContent-".to_vec(),
                b"Length: 6\r\n\r\nabc".to_vec(),
                b"def".to_vec(),
            ],
        };

        let buffer = read_request(&mut reader, 4096, BodyLength::Chars).unwrap();
        assert_eq!(buffer, b"POST /files/a HTTP/1.1\r\nContent-Length: 6\r\n\r\nabcdef");
    }

    #[test]
    fn test_read_stops_once_body_is_complete() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc".to_vec();
        let mut reader = StrictReader { data: Cursor::new(raw.clone()) };

        assert_eq!(read_request(&mut reader, 4096, BodyLength::Chars).unwrap(), raw);
    }

    #[test]
    fn test_read_large_body() {
        let body = vec![b'x'; READ_CHUNK * 3 + 17];
        let mut raw = format!("POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len())
            .into_bytes();
        raw.extend_from_slice(&body);
        let mut reader = StrictReader { data: Cursor::new(raw.clone()) };

        assert_eq!(read_request(&mut reader, 1 << 20, BodyLength::Chars).unwrap(), raw);
    }

    #[test]
    fn test_read_until_eof_without_terminator() {
        let mut reader = Cursor::new(b"GET / HTTP/1.1".to_vec());
        assert_eq!(read_request(&mut reader, 4096, BodyLength::Chars).unwrap(), b"GET / HTTP/1.1");
    }

    #[test]
    fn test_read_short_body_returns_at_eof() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc".to_vec();
        let mut reader = Cursor::new(raw.clone());

        assert_eq!(read_request(&mut reader, 4096, BodyLength::Chars).unwrap(), raw);
    }

    #[test]
    fn test_read_too_large() {
        let raw = vec![b'a'; 2048];
        let mut reader = Cursor::new(raw);

        let result = read_request(&mut reader, 1000, BodyLength::Chars);
        assert!(matches!(result, Err(ReadError::TooLarge { limit: 1000 })));
    }

    #[test]
    fn test_read_multibyte_body_across_chunks() {
        // 2000 caracteres, 4000 bytes: varias lecturas después de la cabecera
        let body = "é".repeat(2000);
        let mut raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 2000\r\n\r\n".to_vec();
        raw.extend_from_slice(body.as_bytes());
        let mut reader = StrictReader { data: Cursor::new(raw.clone()) };

        assert_eq!(read_request(&mut reader, 1 << 20, BodyLength::Chars).unwrap(), raw);
    }

    #[test]
    fn test_read_waits_for_split_character() {
        // El segundo "é" llega partido entre dos lecturas
        let mut reader = ChunkedReader {
            chunks: vec![
                b"POST /files/a HTTP/1.1\r\nContent-Length: 2\r\n\r\n\xC3\xA9\xC3".to_vec(),
                b"\xA9".to_vec(),
            ],
        };

        let buffer = read_request(&mut reader, 4096, BodyLength::Chars).unwrap();
        assert!(buffer.ends_with("éé".as_bytes()));
        assert!(reader.chunks.is_empty());
    }

    #[test]
    fn test_read_bytes_mode_stops_at_declared_bytes() {
        let mut raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 4\r\n\r\n".to_vec();
        raw.extend_from_slice("éé".as_bytes());
        let mut reader = StrictReader { data: Cursor::new(raw.clone()) };

        assert_eq!(read_request(&mut reader, 4096, BodyLength::Bytes).unwrap(), raw);
    }

    #[test]
    fn test_read_rejects_declared_length_over_limit() {
        // StrictReader falla si se intenta leer el body que nunca llega
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 5000\r\n\r\n".to_vec();
        let mut reader = StrictReader { data: Cursor::new(raw) };

        let result = read_request(&mut reader, 4096, BodyLength::Chars);
        assert!(matches!(result, Err(ReadError::TooLarge { limit: 4096 })));
    }

    #[test]
    fn test_read_rejects_declared_length_overflow() {
        let raw = format!(
            "POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            usize::MAX
        );
        let mut reader = Cursor::new(raw.into_bytes());

        let result = read_request(&mut reader, usize::MAX, BodyLength::Bytes);
        assert!(matches!(result, Err(ReadError::TooLarge { .. })));
    }

    #[test]
    fn test_without_partial_tail() {
        assert_eq!(without_partial_tail(b"ab\xC3"), b"ab");
        assert_eq!(without_partial_tail(b"ab\xE2\x82"), b"ab");
        assert_eq!(without_partial_tail("aé".as_bytes()), "aé".as_bytes());
        // Un byte que nunca será válido se queda
        assert_eq!(without_partial_tail(b"ab\xFF"), b"ab\xFF");
        assert_eq!(without_partial_tail(b""), b"");
    }

    #[test]
    fn test_declared_length() {
        assert_eq!(declared_length(b"POST / HTTP/1.1\r\nContent-Length: 12"), Some(12));
        assert_eq!(declared_length(b"POST / HTTP/1.1\r\nContent-Length: x"), None);
        assert_eq!(declared_length(b"POST / HTTP/1.1\r\ncontent-length: 3"), None);
        assert_eq!(declared_length(b"GET / HTTP/1.1"), None);
    }
}
