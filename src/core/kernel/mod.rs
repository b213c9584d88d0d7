/// Transport kernel: the exchange-agnostic HTTP layer.
///
/// The kernel contains only transport logic and generic interfaces:
///
/// - `RestClient`: unified HTTP client interface
/// - `ReqwestRest`: reqwest-backed implementation with a fixed timeout
/// - `Signer`: pluggable authentication interface
///
/// Endpoint wrappers hold a `RestClient` by value or reference and never
/// talk to the network directly, which keeps them testable with a
/// scripted in-memory implementation.
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
