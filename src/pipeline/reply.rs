//! Scheduled assistant replies.
//!
//! A [`PendingReply`] is the explicit record of a delayed reply: it captures the
//! target session when the send happens, instead of resolving "the current
//! session" when the delay elapses. It also carries the tracing context of the
//! send so the delivery span can be linked back to it.

use crate::domain::SessionId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Distributed tracing context carried from a send to its delayed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the send that scheduled the reply.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry ids of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid, which is the case in tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds the send's span as a remote parent context.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn remote_parent(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        if !span_context.is_valid() {
            return None;
        }

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Monotonic identifier of a scheduled reply, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyTicket(pub(crate) u64);

/// A reply waiting for its typing delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Submission-order ticket, used as the tie-break between equal due times.
    pub ticket: ReplyTicket,

    /// Session the reply targets, captured at send time.
    pub session_id: SessionId,

    /// User text that triggered the reply.
    pub prompt: String,

    /// Whether the send was the session's first, selecting the welcome reply.
    pub is_first: bool,

    /// Time (since plugin start) at which the reply becomes due.
    pub due_at: Duration,

    /// Tracing context of the send.
    pub trace_context: Option<TraceContext>,
}

impl PendingReply {
    #[must_use]
    pub fn is_due(&self, now: Duration) -> bool {
        self.due_at <= now
    }
}

/// Result of a pending reply whose delay elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The assistant message was appended to its session.
    Appended {
        session_id: SessionId,
        message_id: crate::domain::MessageId,
    },

    /// The target session no longer exists; the reply was discarded.
    Dropped { session_id: SessionId },
}
