//! # Uniform Catalog
//!
//! The uniform resource: record types, request validation, the handler that
//! maps each HTTP verb onto the table client, and the JSON envelopes it
//! answers with.

pub mod errors;
pub mod handler;
pub mod model;
pub mod response;
pub mod validation;

pub use errors::{Operation, UniformError, UniformResult};
pub use handler::UniformHandler;
pub use model::{NewUniform, Uniform, UniformId};
pub use response::{Envelope, ErrorEnvelope, Reply};
pub use validation::UpdateMode;
