pub mod client;
pub mod usuarios;

pub use client::{build_http_client, set_silent};
pub use usuarios::{UsuariosBackend, UsuariosClient, COLLECTION_PATH};
