//! Message pipeline: user send, synthetic typing window, canned reply.
//!
//! Each send walks `Idle → UserAppended → Typing → AssistantAppended → Idle`:
//!
//! 1. [`MessagePipeline::submit`] appends the user message and queues a
//!    [`PendingReply`] due `typing_delay` later. The session is typing while
//!    the reply is queued.
//! 2. [`MessagePipeline::deliver_due`] is polled by the runtime (on timer
//!    events). Due replies are removed, which clears the typing state, and the
//!    assistant message is appended, provided the target session still exists.
//!
//! Sends are not locked while typing. Concurrent replies against one session are
//! delivered in due-time order, ties broken by submission order.
//!
//! # Example
//!
//! ```
//! use parley::pipeline::{MessagePipeline, ScriptedResponses};
//! use parley::store::SessionStore;
//! use std::time::Duration;
//!
//! let mut store = SessionStore::new();
//! let mut pipeline = MessagePipeline::new(
//!     Duration::from_millis(1000),
//!     "Welcome!".to_string(),
//!     Box::new(ScriptedResponses::new(["ok"])),
//! );
//!
//! let id = store.active_id();
//! pipeline.submit(&mut store, "Hello", Duration::ZERO);
//! assert!(pipeline.is_typing(id));
//!
//! pipeline.deliver_due(&mut store, Duration::from_millis(1000));
//! assert!(!pipeline.is_typing(id));
//! assert_eq!(store.active().messages()[1].text(), "Welcome!");
//! ```

pub mod reply;
pub mod responses;

pub use reply::{Delivery, PendingReply, ReplyTicket, TraceContext};
pub use responses::{
    RandomResponses, ReplyRequest, ResponsePool, ResponseSource, ScriptedResponses,
};

use crate::domain::{Message, SessionId};
use crate::store::SessionStore;
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Schedules and delivers synthetic assistant replies.
#[derive(Debug)]
pub struct MessagePipeline {
    typing_delay: Duration,
    welcome: String,
    responses: Box<dyn ResponseSource>,
    pending: Vec<PendingReply>,
    next_ticket: u64,
}

impl MessagePipeline {
    #[must_use]
    pub fn new(typing_delay: Duration, welcome: String, responses: Box<dyn ResponseSource>) -> Self {
        Self {
            typing_delay,
            welcome,
            responses,
            pending: Vec::new(),
            next_ticket: 0,
        }
    }

    /// Builds a pipeline drawing randomly from `pool`.
    #[must_use]
    pub fn from_pool(typing_delay: Duration, pool: ResponsePool) -> Self {
        Self::new(
            typing_delay,
            pool.welcome,
            Box::new(RandomResponses::new(pool.responses)),
        )
    }

    #[must_use]
    pub const fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Sends `text` to the active session.
    ///
    /// Whitespace-only text is ignored and returns `None`. Otherwise the user
    /// message is appended, a reply is queued, and its due time is returned.
    pub fn submit(&mut self, store: &mut SessionStore, text: &str, now: Duration) -> Option<Duration> {
        let _span = tracing::debug_span!("submit", text_len = text.len()).entered();

        if text.trim().is_empty() {
            tracing::debug!("submit ignored: empty text");
            return None;
        }

        let session_id = store.active_id();
        let is_first = store.append_user_message(session_id, Message::user(text))?;

        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket += 1;
        let due_at = now + self.typing_delay;

        tracing::debug!(
            session_id = %session_id,
            is_first,
            due_ms = u64::try_from(due_at.as_millis()).unwrap_or(u64::MAX),
            "user message appended, reply scheduled"
        );

        self.pending.push(PendingReply {
            ticket,
            session_id,
            prompt: text.to_string(),
            is_first,
            due_at,
            trace_context: TraceContext::from_current(),
        });
        Some(due_at)
    }

    /// Whether a reply is pending for `session_id` (the Typing Flag).
    #[must_use]
    pub fn is_typing(&self, session_id: SessionId) -> bool {
        self.pending.iter().any(|p| p.session_id == session_id)
    }

    /// Whether no reply is pending at all.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingReply] {
        &self.pending
    }

    /// Earliest due time among pending replies.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due_at).min()
    }

    /// Delivers every reply due at `now`, in due-time then submission order.
    pub fn deliver_due(&mut self, store: &mut SessionStore, now: Duration) -> Vec<Delivery> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.is_due(now));
        self.pending = waiting;
        due.sort_by_key(|p| (p.due_at, p.ticket));

        due.into_iter().map(|reply| self.deliver(store, reply)).collect()
    }

    fn deliver(&mut self, store: &mut SessionStore, reply: PendingReply) -> Delivery {
        let span = tracing::debug_span!(
            "deliver_reply",
            session_id = %reply.session_id,
            is_first = reply.is_first,
            parent_trace_id = tracing::field::Empty,
        );
        if let Some(ctx) = &reply.trace_context {
            span.record("parent_trace_id", ctx.trace_id.as_str());
            if let Some(parent) = ctx.remote_parent() {
                span.set_parent(parent);
            }
        }
        let _guard = span.entered();

        let Some(session) = store.get(reply.session_id) else {
            tracing::debug!("target session gone, reply dropped");
            return Delivery::Dropped {
                session_id: reply.session_id,
            };
        };

        let text = if reply.is_first {
            self.welcome.clone()
        } else {
            self.responses.respond(&ReplyRequest {
                session_id: reply.session_id,
                prompt: &reply.prompt,
                transcript_len: session.messages().len(),
            })
        };

        let message = Message::assistant(text);
        let message_id = message.id();
        store.append_message(reply.session_id, message);
        tracing::debug!(message_id = %message_id, "assistant reply appended");

        Delivery::Appended {
            session_id: reply.session_id,
            message_id,
        }
    }
}
