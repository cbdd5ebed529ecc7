//! Domain types for the solicitud relay
//!
//! A Solicitud is one submitted transport request. Client-supplied
//! fields are kept verbatim; the server owns identity, creation
//! timestamp, and the decision state.

mod id;
mod solicitud;

pub use id::generate_id;
pub use solicitud::{Estado, RESERVED_FIELDS, Solicitud, now_ms};
