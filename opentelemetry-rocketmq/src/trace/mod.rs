//! # RocketMQ trace context
//!
//! Carries the span context of a producer to its consumers inside message
//! properties, and maps message hook outcomes onto span statuses.
//!
//! - [`encode`] and [`decode`] convert between a [`SpanContext`] and its trace
//!   parent string.
//! - [`TraceParentPropagator`] plugs the same format into the OpenTelemetry
//!   propagation API.
//! - [`convert_to_trace_status`] turns a [`MessageHookPointStatus`] into a
//!   span [`Status`].
//!
//! [`SpanContext`]: opentelemetry::trace::SpanContext
//! [`Status`]: opentelemetry::trace::Status
mod propagator;
mod status;
mod trace_parent;

pub use propagator::{
    TraceParentPropagator, TraceParentPropagatorBuilder, OTEL_ROCKETMQ_TRACE_CONTEXT_KEY,
    TRACE_PARENT_KEY,
};
pub use status::{convert_to_trace_status, MessageHookPointStatus};
pub use trace_parent::{decode, encode, TRACE_PARENT_HEADER_SIZE};
