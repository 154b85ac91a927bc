//! # Handlers del Servidor
//!
//! Este módulo contiene los handlers de las rutas del servidor.
//!
//! ## Rutas
//!
//! - **text**: `/echo/<valor>` y `/user-agent` (responden texto)
//! - **files**: `/files/<nombre>` con GET y POST sobre el directorio configurado
//!
//! Cada handler es una función que recibe un Request y el
//! [`Context`](crate::router::Context), y retorna un
//! [`Outcome`](crate::router::Outcome). Los errores de I/O nunca se
//! propagan: se convierten en un status.

pub mod files;
pub mod text;

// Re-exportar funciones útiles
pub use files::files_handler;
pub use text::{echo_handler, user_agent_handler};
