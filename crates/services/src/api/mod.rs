mod auth;
mod client;
pub mod endpoints;
mod transport;

pub use auth::{Anonymous, AuthProvider, SessionToken, StaticToken};
pub use client::{ApiClient, ErrorReport};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, ScriptedTransport, Transport};
