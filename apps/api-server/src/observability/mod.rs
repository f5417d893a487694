//! Observability - tracing spans and request IDs.

pub mod request_id;
