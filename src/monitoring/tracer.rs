/*!
 * Structured Tracing
 * Subscriber setup and the spans wrapped around background work
 */

use crate::core::types::ProcessId;
use tracing::{debug_span, info, info_span, Span};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber for simulator logs
///
/// `RUST_LOG` selects levels (engine state changes log at info, per-cycle
/// dispatch and I/O detail at debug). Setting `SCHED_TRACE_JSON=1` switches
/// to one JSON object per event.
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = matches!(
        std::env::var("SCHED_TRACE_JSON").as_deref(),
        Ok("1") | Ok("true")
    );

    let result = if json {
        let events = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false);
        tracing_subscriber::registry().with(filter).with(events).try_init()
    } else {
        let events = tracing_subscriber::fmt::layer()
            .compact()
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE);
        tracing_subscriber::registry().with(filter).with(events).try_init()
    };

    let installed = result.is_ok();
    if installed {
        info!(json, "Simulator tracing ready");
    }
    installed
}

/// Span covering the lifetime of the cycle driver task
pub fn span_driver() -> Span {
    info_span!("cycle_driver")
}

/// Span covering one process's I/O service countdown
pub fn span_io_completion(pid: ProcessId, service_ticks: u32) -> Span {
    debug_span!("io_completion", pid, service_ticks)
}
