//! # Handler de Archivos
//! src/handlers/files.rs
//!
//! `/files/<nombre>` lee o escribe archivos dentro del directorio
//! configurado con `--directory`.
//!
//! | Método | Éxito                   | Fallo de I/O |
//! |--------|-------------------------|--------------|
//! | GET    | 200 + bytes del archivo | 404          |
//! | POST   | 201 sin body            | 404          |
//! | otro   | 400                     |              |

use crate::http::{Request, StatusCode};
use crate::router::{Context, Outcome};
use std::fs;
use std::path::{Path, PathBuf};

/// Handler para /files/<nombre>
pub fn files_handler(req: &Request, ctx: &Context) -> Outcome {
    let Some(name) = req.segment(1) else {
        return Outcome::empty(StatusCode::BadRequest);
    };

    match req.method() {
        "GET" => read_file(&ctx.directory, name),
        "POST" => write_file(&ctx.directory, name, req.body()),
        _ => Outcome::empty(StatusCode::BadRequest),
    }
}

/// Un segmento nunca contiene '/', pero "." y ".." siguen apuntando fuera
fn resolve(directory: &Path, name: &str) -> Option<PathBuf> {
    if name == "." || name == ".." {
        return None;
    }
    Some(directory.join(name))
}

fn read_file(directory: &Path, name: &str) -> Outcome {
    let Some(path) = resolve(directory, name) else {
        return Outcome::empty(StatusCode::NotFound);
    };

    match fs::read(&path) {
        Ok(contents) => Outcome::binary(contents),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Error leyendo archivo");
            Outcome::empty(StatusCode::NotFound)
        }
    }
}

fn write_file(directory: &Path, name: &str, contents: &[u8]) -> Outcome {
    let Some(path) = resolve(directory, name) else {
        return Outcome::empty(StatusCode::NotFound);
    };

    match fs::write(&path, contents) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), bytes = contents.len(), "Archivo escrito");
            Outcome::empty(StatusCode::Created)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Error escribiendo archivo");
            Outcome::empty(StatusCode::NotFound)
        }
    }
}
