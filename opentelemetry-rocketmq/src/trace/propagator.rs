use super::trace_parent::{decode, encode};
use opentelemetry::{
    propagation::{text_map_propagator::FieldIter, Extractor, Injector, TextMapPropagator},
    trace::TraceContextExt,
    Context,
};
use std::env;

/// Message property that carries the trace parent by default.
pub const TRACE_PARENT_KEY: &str = "traceparent";

/// Overrides the message property used by [`TraceParentPropagator::builder`].
pub const OTEL_ROCKETMQ_TRACE_CONTEXT_KEY: &str = "OTEL_ROCKETMQ_TRACE_CONTEXT_KEY";

/// Propagates `SpanContext`s between RocketMQ producers and consumers.
///
/// The span context travels as a single trace parent property (see
/// [`encode`](super::encode)). Trace state is never propagated.
///
/// ## Examples
///
/// ```
/// use opentelemetry::propagation::TextMapPropagator;
/// use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
/// use opentelemetry::Context;
/// use opentelemetry_rocketmq::trace::TraceParentPropagator;
/// use std::collections::HashMap;
///
/// let propagator = TraceParentPropagator::new();
/// let producer_cx = Context::new().with_remote_span_context(SpanContext::new(
///     TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
///     SpanId::from_hex("00f067aa0ba902b7").unwrap(),
///     TraceFlags::SAMPLED,
///     false,
///     TraceState::default(),
/// ));
///
/// // message properties of the outgoing message
/// let mut properties: HashMap<String, String> = HashMap::new();
/// propagator.inject_context(&producer_cx, &mut properties);
///
/// let consumer_cx = propagator.extract(&properties);
/// assert!(consumer_cx.span().span_context().is_remote());
/// ```
#[derive(Clone, Debug)]
pub struct TraceParentPropagator {
    fields: [String; 1],
}

impl Default for TraceParentPropagator {
    fn default() -> Self {
        TraceParentPropagator::new()
    }
}

impl TraceParentPropagator {
    /// Create a propagator using the `traceparent` property.
    pub fn new() -> Self {
        TraceParentPropagator {
            fields: [TRACE_PARENT_KEY.to_owned()],
        }
    }

    /// Create a [`TraceParentPropagatorBuilder`], initialized from the
    /// `OTEL_ROCKETMQ_TRACE_CONTEXT_KEY` environment variable when it is set.
    pub fn builder() -> TraceParentPropagatorBuilder {
        TraceParentPropagatorBuilder::default()
    }

    /// The property the trace parent is written to and read from.
    pub fn carrier_key(&self) -> &str {
        &self.fields[0]
    }
}

impl TextMapPropagator for TraceParentPropagator {
    /// Writes the trace parent of the active span, if that span's context is
    /// valid. Nothing is written otherwise.
    fn inject_context(&self, cx: &Context, injector: &mut dyn Injector) {
        let span = cx.span();
        let header_value = encode(span.span_context());
        if !header_value.is_empty() {
            injector.set(self.carrier_key(), header_value);
        }
    }

    /// Returns `cx` with the decoded remote span context, or a clone of `cx`
    /// when the property is missing or does not hold a valid context.
    fn extract_with_context(&self, cx: &Context, extractor: &dyn Extractor) -> Context {
        let span_context = decode(extractor.get(self.carrier_key()));
        if span_context.is_valid() {
            cx.with_remote_span_context(span_context)
        } else {
            cx.clone()
        }
    }

    fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(&self.fields)
    }
}

/// Builder for [`TraceParentPropagator`].
#[derive(Debug)]
pub struct TraceParentPropagatorBuilder {
    carrier_key: String,
}

impl Default for TraceParentPropagatorBuilder {
    fn default() -> Self {
        TraceParentPropagatorBuilder {
            carrier_key: TRACE_PARENT_KEY.to_owned(),
        }
        .init_from_env_vars()
    }
}

impl TraceParentPropagatorBuilder {
    /// Set the message property carrying the trace parent.
    ///
    /// A blank key is ignored and the current key is kept.
    pub fn with_carrier_key<T: Into<String>>(mut self, carrier_key: T) -> Self {
        let carrier_key = carrier_key.into();
        if !carrier_key.trim().is_empty() {
            self.carrier_key = carrier_key.trim().to_owned();
        }
        self
    }

    /// Build the [`TraceParentPropagator`].
    pub fn build(self) -> TraceParentPropagator {
        TraceParentPropagator {
            fields: [self.carrier_key],
        }
    }

    fn init_from_env_vars(self) -> Self {
        match env::var(OTEL_ROCKETMQ_TRACE_CONTEXT_KEY) {
            Ok(carrier_key) => self.with_carrier_key(carrier_key),
            Err(_) => self,
        }
    }
}
