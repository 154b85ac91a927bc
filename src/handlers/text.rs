//! # Handlers de Texto
//! src/handlers/text.rs
//!
//! - /echo/<valor>: devuelve el segundo segmento del path
//! - /user-agent: devuelve el header `User-Agent`

use crate::http::{Request, StatusCode};
use crate::router::{Context, Outcome};

/// Handler para /echo/<valor>
///
/// Sin segundo segmento responde 400.
pub fn echo_handler(req: &Request, _ctx: &Context) -> Outcome {
    match req.segment(1) {
        Some(value) => Outcome::text(value),
        None => Outcome::empty(StatusCode::BadRequest),
    }
}

/// Handler para /user-agent
///
/// El nombre del header es sensible a mayúsculas, igual que en el parser.
pub fn user_agent_handler(req: &Request, _ctx: &Context) -> Outcome {
    match req.header("User-Agent") {
        Some(agent) if !agent.is_empty() => Outcome::text(agent),
        _ => Outcome::empty(StatusCode::BadRequest),
    }
}
