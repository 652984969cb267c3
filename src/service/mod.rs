//! Service-boundary result contract.
//!
//! Services return `Result<T, E>` internally. At the boundary, any such
//! result converts into a [`ServiceResponse`], a tagged union that carries
//! either the payload or a message with a stable [`ErrorCode`] callers can
//! branch on.

mod response;

pub use response::{ErrorCode, ServiceError, ServiceResponse};
