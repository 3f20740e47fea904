#![cfg(feature = "trace")]
//! Producer to consumer round trips through message properties.
use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::trace::{
    SpanContext, SpanId, Status, TraceContextExt, TraceFlags, TraceId, TraceState,
};
use opentelemetry::Context;
use opentelemetry_rocketmq::trace::{
    convert_to_trace_status, decode, encode, MessageHookPointStatus, TraceParentPropagator,
    TRACE_PARENT_HEADER_SIZE, TRACE_PARENT_KEY,
};
use opentelemetry_rocketmq::validators::{check_message, check_topic};
use opentelemetry_rocketmq::ErrorCode;
use std::collections::HashMap;

struct Message {
    topic: String,
    body: Vec<u8>,
    properties: HashMap<String, String>,
}

impl Message {
    fn new(topic: &str, body: &[u8]) -> Self {
        Message {
            topic: topic.to_string(),
            body: body.to_vec(),
            properties: HashMap::new(),
        }
    }
}

fn producer_span_context() -> SpanContext {
    SpanContext::new(
        TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
        SpanId::from_hex("00f067aa0ba902b7").unwrap(),
        TraceFlags::SAMPLED,
        false,
        TraceState::default(),
    )
}

fn send(propagator: &TraceParentPropagator, cx: &Context, topic: &str, body: &[u8]) -> Message {
    let mut message = Message::new(topic, body);
    check_message(&message.topic, &message.body).expect("message should be valid");
    propagator.inject_context(cx, &mut message.properties);
    message
}

#[test]
fn consumer_continues_producer_trace() {
    let propagator = TraceParentPropagator::new();
    let producer_cx = Context::new().with_remote_span_context(producer_span_context());

    let message = send(&propagator, &producer_cx, "finance.orders", b"order-1");
    assert_eq!(
        message.properties.get(TRACE_PARENT_KEY).map(String::len),
        Some(TRACE_PARENT_HEADER_SIZE)
    );

    let consumer_cx = propagator.extract(&message.properties);
    let span = consumer_cx.span();
    let parent = span.span_context();
    assert!(parent.is_valid());
    assert!(parent.is_remote());
    assert_eq!(parent.trace_id(), producer_span_context().trace_id());
    assert_eq!(parent.span_id(), producer_span_context().span_id());
    assert!(parent.is_sampled());
    assert_eq!(parent.trace_state(), &TraceState::default());
}

#[test]
fn message_without_active_span_carries_no_trace_parent() {
    let propagator = TraceParentPropagator::new();
    let message = send(&propagator, &Context::new(), "finance.orders", b"order-2");

    assert!(message.properties.is_empty());
    assert!(!propagator
        .extract(&message.properties)
        .span()
        .span_context()
        .is_valid());
}

#[test]
fn encode_decode_by_hand() {
    let trace_parent = encode(&producer_span_context());
    assert_eq!(
        trace_parent,
        "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
    );

    let decoded = decode(Some(trace_parent.as_str()));
    assert!(decoded.is_valid());
    assert!(decoded.is_remote());
    assert_eq!(decoded.trace_flags(), TraceFlags::SAMPLED);

    let version_fe = trace_parent.replacen("00", "fe", 1);
    assert!(decode(Some(version_fe.as_str())).is_valid());
    let version_ff = trace_parent.replacen("00", "ff", 1);
    assert_eq!(decode(Some(version_ff.as_str())), SpanContext::empty_context());
}

#[test]
fn hook_point_outcome_closes_span_status() {
    assert_eq!(convert_to_trace_status(MessageHookPointStatus::Ok), Status::Ok);
    assert_eq!(
        convert_to_trace_status(MessageHookPointStatus::Error),
        Status::error("")
    );
    assert_eq!(
        convert_to_trace_status(MessageHookPointStatus::Unset),
        Status::Unset
    );
}

#[test]
fn illegal_topic_aborts_send() {
    let err = check_topic("finance/orders").unwrap_err();
    assert_eq!(err.code(), ErrorCode::IllegalFormat);
    assert_eq!(
        err.to_string(),
        "[ILLEGAL_FORMAT] Topic[finance/orders] is illegal."
    );

    let err = check_topic(&"t".repeat(256)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IllegalFormat);
}
