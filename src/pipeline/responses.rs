//! Canned assistant responses.
//!
//! Replies are never generated: they are picked from a fixed [`ResponsePool`].
//! Selection sits behind the [`ResponseSource`] trait so tests can swap the
//! random draw for a deterministic script.
//!
//! # TOML Format
//!
//! ```toml
//! welcome = "Hi there! What can I do for you?"
//! responses = [
//!     "Tell me more.",
//!     "Interesting, go on.",
//! ]
//! ```

use crate::domain::error::{ParleyError, Result};
use crate::domain::SessionId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::Path;

/// Reply used for the first message of every session.
pub const DEFAULT_WELCOME: &str =
    "Hello! I'm your AI assistant. How can I help you today?";

/// Built-in reply pool.
pub const DEFAULT_RESPONSES: [&str; 6] = [
    "That's an interesting question! Let me think about it...",
    "I understand what you're asking. Here's what I think.",
    "Great point! I'd love to help you with that.",
    "Thanks for sharing. Could you tell me a bit more?",
    "I'm not entirely sure, but here's my best guess.",
    "Let me look into that for you.",
];

/// Context handed to a [`ResponseSource`] when a reply is due.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRequest<'a> {
    /// Session the reply will be appended to.
    pub session_id: SessionId,
    /// User text that triggered the reply.
    pub prompt: &'a str,
    /// Number of messages already in the session transcript.
    pub transcript_len: usize,
}

/// Capability producing the text of a non-welcome assistant reply.
pub trait ResponseSource: Send + fmt::Debug {
    /// Returns the reply text for `request`.
    fn respond(&mut self, request: &ReplyRequest<'_>) -> String;
}

/// Welcome string plus a non-empty pool of replies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponsePool {
    /// Reply to the first message of a session.
    pub welcome: String,
    /// Replies drawn for every later message.
    pub responses: Vec<String>,
}

impl ResponsePool {
    /// Loads a pool from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ParleyError::Responses`] if the file cannot be read, is not valid
    /// TOML, or lists no responses.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| ParleyError::Responses(format!("failed to read response file: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Parses a pool from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ParleyError::Responses`] on invalid TOML or an empty pool.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let pool: Self = toml::from_str(contents)
            .map_err(|e| ParleyError::Responses(format!("failed to parse response TOML: {e}")))?;
        if pool.responses.is_empty() {
            return Err(ParleyError::Responses("response pool is empty".to_string()));
        }
        Ok(pool)
    }
}

impl Default for ResponsePool {
    fn default() -> Self {
        Self {
            welcome: DEFAULT_WELCOME.to_string(),
            responses: DEFAULT_RESPONSES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Picks replies uniformly at random from a fixed pool.
pub struct RandomResponses {
    pool: Vec<String>,
    rng: StdRng,
}

impl RandomResponses {
    /// Creates a source seeded from OS entropy.
    #[must_use]
    pub fn new(pool: Vec<String>) -> Self {
        Self::with_rng(pool, StdRng::from_entropy())
    }

    /// Creates a source with a fixed seed, for reproducible draws.
    #[must_use]
    pub fn seeded(pool: Vec<String>, seed: u64) -> Self {
        Self::with_rng(pool, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pool: Vec<String>, rng: StdRng) -> Self {
        let pool = if pool.is_empty() {
            DEFAULT_RESPONSES.iter().map(ToString::to_string).collect()
        } else {
            pool
        };
        Self { pool, rng }
    }
}

impl ResponseSource for RandomResponses {
    fn respond(&mut self, request: &ReplyRequest<'_>) -> String {
        let index = self.rng.gen_range(0..self.pool.len());
        tracing::trace!(session_id = %request.session_id, index, "response drawn");
        self.pool[index].clone()
    }
}

impl fmt::Debug for RandomResponses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomResponses")
            .field("pool_len", &self.pool.len())
            .finish_non_exhaustive()
    }
}

/// Replays a fixed script in order, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedResponses {
    script: VecDeque<String>,
}

impl ScriptedResponses {
    #[must_use]
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
        }
    }
}

impl ResponseSource for ScriptedResponses {
    fn respond(&mut self, _request: &ReplyRequest<'_>) -> String {
        let Some(next) = self.script.pop_front() else {
            return String::new();
        };
        self.script.push_back(next.clone());
        next
    }
}
