//! OpenTelemetry integration for Apache RocketMQ clients.
//!
//! # Components
//!
//! ### Trace context propagation
//! A producer writes the context of its send span into a message property as a
//! W3C style trace parent, and a consumer reads it back as the remote parent of
//! its receive span. See the [`trace`] module and
//! [`TraceParentPropagator`](trace::TraceParentPropagator).
//!
//! ### Message validation
//! Checks applied to topics, consumer groups, message bodies and name server
//! addresses before a request is issued. See the [`validators`] module.
//!
//! ### Quick start
//! ```
//! use opentelemetry::global;
//! use opentelemetry_rocketmq::trace::TraceParentPropagator;
//!
//! // Use the RocketMQ trace parent format for every message property map.
//! global::set_text_map_propagator(TraceParentPropagator::builder().build());
//! ```
//!
//! # Crate Feature Flags
//!
//! * `trace`: Includes the trace context codec and propagator. Enabled by default.
//! * `internal-logs`: Emits diagnostics through `tracing`, such as rejected
//!   trace parents. Enabled by default.
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/open-telemetry/opentelemetry-rust/main/assets/logo.svg"
)]
#![cfg_attr(test, deny(warnings))]

pub mod error;
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub mod trace;
pub mod validators;

pub use error::{ClientError, ClientResult, ErrorCode};
