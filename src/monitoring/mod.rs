/*!
 * Monitoring
 * Tracing setup and dispatch spans
 */

pub mod tracer;

pub use tracer::{generate_trace_id, init_tracing, DispatchSpan};
