/*!
 * Monitoring
 * Tracing setup for hosts embedding the engine
 */

mod tracer;

pub use tracer::{init_tracing, span_driver, span_io_completion};
