//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea el primer segmento del path
//! a un handler.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Outcome (status, body) → Response
//! ```
//!
//! - `/` (sin segmentos) responde 200 sin body y no llama a ningún handler.
//! - El primer segmento se compara por igualdad exacta (sin comodines).
//! - Si no hay handler para ese segmento, retorna 404 sin body.
//!
//! El router no sabe cómo el handler produce el body; solo recibe un
//! [`Outcome`].

use crate::handlers;
use crate::http::{Body, Request, StatusCode};
use std::path::PathBuf;

/// Estado de solo lectura que reciben los handlers
///
/// Se construye una vez al arrancar a partir de la configuración.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Directorio raíz del handler de archivos
    pub directory: PathBuf,
}

impl Context {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

/// Resultado de un handler: status y body opcional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    pub body: Option<Body>,
}

impl Outcome {
    /// Status sin body
    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// 200 con body de texto
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Ok,
            body: Some(Body::Text(body.into())),
        }
    }

    /// 200 con body binario
    pub fn binary(body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::Ok,
            body: Some(Body::Binary(body)),
        }
    }
}

/// Tipo de función handler
///
/// Un handler recibe el Request y el contexto, y retorna un Outcome
pub type Handler = fn(&Request, &Context) -> Outcome;

/// Router que mapea el primer segmento a handlers
pub struct Router {
    /// Contexto compartido por todos los handlers
    context: Context,

    /// Lista de segmento → handler
    routes: Vec<(String, Handler)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new(context: Context) -> Self {
        Self {
            context,
            routes: Vec::new(),
        }
    }

    /// Router con `echo`, `files` y `user-agent` registrados
    pub fn with_default_routes(context: Context) -> Self {
        let mut router = Self::new(context);
        router.register("echo", handlers::echo_handler);
        router.register("files", handlers::files_handler);
        router.register("user-agent", handlers::user_agent_handler);
        router
    }

    /// Registra un handler para un primer segmento
    ///
    /// # Ejemplo
    /// ```
    /// use http11_server::http::Request;
    /// use http11_server::router::{Context, Outcome, Router};
    ///
    /// fn hello_handler(_req: &Request, _ctx: &Context) -> Outcome {
    ///     Outcome::text("hello")
    /// }
    ///
    /// let mut router = Router::new(Context::new("."));
    /// router.register("hello", hello_handler);
    ///
    /// let request = Request::parse(b"GET /hello HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(router.route(&request), Outcome::text("hello"));
    /// ```
    pub fn register(&mut self, segment: &str, handler: Handler) {
        self.routes.push((segment.to_string(), handler));
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request) -> Outcome {
        let Some(first) = request.segment(0) else {
            return Outcome::empty(StatusCode::Ok);
        };

        match self.routes.iter().find(|(segment, _)| segment == first) {
            Some((_, handler)) => handler(request, &self.context),
            None => Outcome::empty(StatusCode::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_handler(_req: &Request, _ctx: &Context) -> Outcome {
        Outcome::text("test")
    }

    fn directory_handler(_req: &Request, ctx: &Context) -> Outcome {
        Outcome::text(ctx.directory.display().to_string())
    }

    fn make_request(raw: &str) -> Request {
        Request::parse(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new(Context::new("."));
        assert_eq!(router.routes.len(), 0);
    }

    #[test]
    fn test_register_route() {
        let mut router = Router::new(Context::new("."));
        router.register("test", test_handler);

        assert_eq!(router.routes.len(), 1);
    }

    #[test]
    fn test_root_is_ok_without_handler() {
        let router = Router::new(Context::new("."));
        let outcome = router.route(&make_request("GET / HTTP/1.1\r\n\r\n"));

        assert_eq!(outcome, Outcome::empty(StatusCode::Ok));
    }

    #[test]
    fn test_route_found() {
        let mut router = Router::new(Context::new("."));
        router.register("test", test_handler);

        let outcome = router.route(&make_request("GET /test/anything/else HTTP/1.1\r\n\r\n"));
        assert_eq!(outcome, Outcome::text("test"));
    }

    #[test]
    fn test_route_not_found() {
        let mut router = Router::new(Context::new("."));
        router.register("test", test_handler);

        let outcome = router.route(&make_request("GET /nonexistent HTTP/1.1\r\n\r\n"));
        assert_eq!(outcome, Outcome::empty(StatusCode::NotFound));
    }

    #[test]
    fn test_route_is_exact_match() {
        let mut router = Router::new(Context::new("."));
        router.register("echo", test_handler);

        let outcome = router.route(&make_request("GET /echoes HTTP/1.1\r\n\r\n"));
        assert_eq!(outcome.status, StatusCode::NotFound);

        let outcome = router.route(&make_request("GET /Echo HTTP/1.1\r\n\r\n"));
        assert_eq!(outcome.status, StatusCode::NotFound);
    }

    #[test]
    fn test_handler_receives_context() {
        let mut router = Router::new(Context::new("/srv/files"));
        router.register("dir", directory_handler);

        let outcome = router.route(&make_request("GET /dir HTTP/1.1\r\n\r\n"));
        assert_eq!(outcome, Outcome::text("/srv/files"));
    }

    #[test]
    fn test_default_routes() {
        let router = Router::with_default_routes(Context::new("."));

        let echo = router.route(&make_request("GET /echo/hey HTTP/1.1\r\n\r\n"));
        assert_eq!(echo, Outcome::text("hey"));

        let agent = router.route(&make_request(
            "GET /user-agent HTTP/1.1\r\nUser-Agent: test-agent\r\n\r\n",
        ));
        assert_eq!(agent, Outcome::text("test-agent"));

        let files = router.route(&make_request("GET /files HTTP/1.1\r\n\r\n"));
        assert_eq!(files, Outcome::empty(StatusCode::BadRequest));
    }
}
