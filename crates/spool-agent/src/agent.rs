//! The [`TapeAgent`]: tape-backed chat orchestration.
//!
//! Every collaborator is injected — the store, the LLM client, and the
//! configuration all arrive through the constructor and are owned by the
//! caller. The agent holds no global state; two agents over the same store
//! simply share the store's own write serialization.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use spool_context::{
    ConversationSnapshot, EstimatorPolicy, ViewMode, estimate_tokens, extract_anchors,
    find_anchor_by_name, messages_from_entries, select_context,
};
use spool_core::{Anchor, ChatMessage, Entry, EntryKind};
use spool_settings::{DEFAULT_SYSTEM_PROMPT, SpoolSettings};
use spool_tape::TapeStore;

use crate::errors::{AgentError, Result};
use crate::llm::LlmClient;

/// Name of the anchor auto-created when a scoped view finds no anchors.
pub const AUTO_BOOTSTRAP_ANCHOR: &str = "handoff:auto-bootstrap";

fn bootstrap_state() -> Value {
    json!({
        "phase": "Bootstrap",
        "summary": "Auto-created bootstrap anchor for context slicing.",
    })
}

/// Per-agent configuration.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Tape this agent appends to and reads from.
    pub tape_name: String,
    /// System prompt prepended to every chat.
    pub system_prompt: String,
    /// Token estimation policy for snapshots.
    pub estimator: EstimatorPolicy,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            tape_name: "spool:default".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            estimator: EstimatorPolicy::default(),
        }
    }
}

impl AgentConfig {
    /// Build a config from loaded settings for a specific tape.
    #[must_use]
    pub fn from_settings(settings: &SpoolSettings, tape_name: impl Into<String>) -> Self {
        Self {
            tape_name: tape_name.into(),
            system_prompt: settings.llm.system_prompt.clone(),
            estimator: settings.context.estimator,
        }
    }
}

/// Chat agent over one tape.
pub struct TapeAgent {
    store: Arc<TapeStore>,
    llm: Arc<dyn LlmClient>,
    config: AgentConfig,
}

impl TapeAgent {
    /// Build an agent over an injected store and LLM client.
    #[must_use]
    pub fn new(store: Arc<TapeStore>, llm: Arc<dyn LlmClient>, config: AgentConfig) -> Self {
        Self { store, llm, config }
    }

    /// The tape this agent operates on.
    #[must_use]
    pub fn tape_name(&self) -> &str {
        &self.config.tape_name
    }

    /// Assemble a fresh snapshot of the tape for the requested view.
    ///
    /// For `latest`/`from-anchor` on a tape without anchors, a bootstrap
    /// anchor is appended first and the entries re-read, so the snapshot
    /// always reflects the mutation it caused.
    #[instrument(skip(self), fields(tape = %self.config.tape_name, %view_mode))]
    pub fn snapshot(
        &self,
        view_mode: ViewMode,
        anchor_name: Option<&str>,
    ) -> Result<ConversationSnapshot> {
        let ensure_anchor = view_mode != ViewMode::Full;
        let resolved = self.resolve_view(view_mode, anchor_name, ensure_anchor)?;

        let (active_anchor, context_entries) = select_context(
            &resolved.entries,
            &resolved.anchors,
            resolved.view_mode,
            resolved.anchor_name.as_deref(),
        );
        let estimated_tokens = estimate_tokens(context_entries, self.config.estimator);
        let active_anchor = active_anchor.cloned();
        let context_entries = context_entries.to_vec();

        Ok(ConversationSnapshot {
            tape_name: self.config.tape_name.clone(),
            active_anchor,
            context_entries,
            estimated_tokens,
            entries: resolved.entries,
            anchors: resolved.anchors,
        })
    }

    /// Record a named checkpoint and return its normalized name.
    ///
    /// Blank `phase`/`summary` and blank facts are dropped from the recorded
    /// state rather than stored as empty strings.
    #[instrument(skip(self, phase, summary, facts), fields(tape = %self.config.tape_name))]
    pub fn handoff(
        &self,
        name: &str,
        phase: &str,
        summary: &str,
        facts: &[String],
    ) -> Result<String> {
        let normalized = normalize_anchor_name(name)?;

        let mut state = Map::new();
        if !phase.trim().is_empty() {
            let _ = state.insert("phase".to_string(), json!(phase.trim()));
        }
        if !summary.trim().is_empty() {
            let _ = state.insert("summary".to_string(), json!(summary.trim()));
        }
        let clean_facts: Vec<&str> = facts
            .iter()
            .map(|fact| fact.trim())
            .filter(|fact| !fact.is_empty())
            .collect();
        if !clean_facts.is_empty() {
            let _ = state.insert("facts".to_string(), json!(clean_facts));
        }

        self.append_anchor(&normalized, Value::Object(state))?;
        debug!(anchor = %normalized, "handoff recorded");
        Ok(normalized)
    }

    /// One turn of the chat loop.
    ///
    /// Resolves the context for the requested view, appends the user message,
    /// and invokes the LLM over `system prompt + replayed context + prompt`.
    /// A successful reply is appended as an assistant message and returned;
    /// an LLM failure is appended as an `error` entry and surfaced as a
    /// human-readable `"Error: ..."` string so UI layers can render it
    /// inline.
    #[instrument(skip(self, message), fields(tape = %self.config.tape_name, %view_mode))]
    pub async fn reply(
        &self,
        message: &str,
        view_mode: ViewMode,
        anchor_name: Option<&str>,
    ) -> Result<String> {
        let ensure_anchor = view_mode != ViewMode::Full;
        let resolved = self.resolve_view(view_mode, anchor_name, ensure_anchor)?;
        let (_, context_entries) = select_context(
            &resolved.entries,
            &resolved.anchors,
            resolved.view_mode,
            resolved.anchor_name.as_deref(),
        );

        let mut messages = Vec::with_capacity(context_entries.len() + 2);
        messages.push(ChatMessage::system(&self.config.system_prompt));
        messages.extend(messages_from_entries(context_entries));
        messages.push(ChatMessage::user(message));

        let _ = self.store.append(
            &self.config.tape_name,
            EntryKind::Message,
            json!({"role": "user", "content": message}),
            Value::Null,
        )?;

        match self.llm.chat(messages).await {
            Ok(text) => {
                let _ = self.store.append(
                    &self.config.tape_name,
                    EntryKind::Message,
                    json!({"role": "assistant", "content": text}),
                    Value::Null,
                )?;
                Ok(text)
            }
            Err(err) => {
                debug!(error = %err, "llm call failed");
                let _ = self.store.append(
                    &self.config.tape_name,
                    EntryKind::Error,
                    json!({"kind": "llm", "message": err.message}),
                    Value::Null,
                )?;
                Ok(format!("Error: {}", err.message))
            }
        }
    }

    /// Delete every entry on this agent's tape.
    pub fn reset(&self) -> Result<()> {
        self.store.reset(&self.config.tape_name)?;
        Ok(())
    }

    fn read_entries(&self) -> Result<Vec<Entry>> {
        Ok(self.store.read(&self.config.tape_name)?.unwrap_or_default())
    }

    fn append_anchor(&self, name: &str, state: Value) -> Result<Entry> {
        let entry = self.store.append(
            &self.config.tape_name,
            EntryKind::Anchor,
            json!({"name": name, "state": state}),
            Value::Null,
        )?;
        Ok(entry)
    }

    /// Append the bootstrap anchor and re-read, so callers see the mutation.
    fn create_bootstrap_anchor(&self) -> Result<(Vec<Entry>, Vec<Anchor>, Option<Anchor>)> {
        let _ = self.append_anchor(AUTO_BOOTSTRAP_ANCHOR, bootstrap_state())?;
        let entries = self.read_entries()?;
        let anchors = extract_anchors(&entries);
        let created = find_anchor_by_name(&anchors, AUTO_BOOTSTRAP_ANCHOR)
            .or_else(|| anchors.last())
            .cloned();
        Ok((entries, anchors, created))
    }

    fn resolve_view(
        &self,
        view_mode: ViewMode,
        anchor_name: Option<&str>,
        ensure_anchor: bool,
    ) -> Result<ResolvedView> {
        let mut entries = self.read_entries()?;
        let mut anchors = extract_anchors(&entries);

        match view_mode {
            ViewMode::Full => Ok(ResolvedView {
                view_mode: ViewMode::Full,
                anchor_name: None,
                entries,
                anchors,
            }),
            ViewMode::Latest => {
                if anchors.is_empty() && ensure_anchor {
                    (entries, anchors, _) = self.create_bootstrap_anchor()?;
                }
                Ok(ResolvedView {
                    view_mode: ViewMode::Latest,
                    anchor_name: anchors.last().map(|anchor| anchor.name.clone()),
                    entries,
                    anchors,
                })
            }
            ViewMode::FromAnchor => {
                let mut target = anchor_name
                    .and_then(|name| find_anchor_by_name(&anchors, name))
                    .or_else(|| anchors.last())
                    .cloned();
                if target.is_none() && ensure_anchor {
                    (entries, anchors, target) = self.create_bootstrap_anchor()?;
                }
                Ok(ResolvedView {
                    view_mode: ViewMode::FromAnchor,
                    anchor_name: target.map(|anchor| anchor.name),
                    entries,
                    anchors,
                })
            }
        }
    }
}

struct ResolvedView {
    view_mode: ViewMode,
    anchor_name: Option<String>,
    entries: Vec<Entry>,
    anchors: Vec<Anchor>,
}

/// Normalize a checkpoint name to its namespaced slug form.
///
/// Already-namespaced names (`handoff:`/`phase:`) pass through untouched;
/// anything else is lower-cased, space-to-hyphen slugged, and prefixed with
/// `handoff:`. A blank name is a validation error.
pub fn normalize_anchor_name(name: &str) -> Result<String> {
    let raw = name.trim();
    if raw.is_empty() {
        return Err(AgentError::EmptyAnchorName);
    }
    if raw.starts_with("handoff:") || raw.starts_with("phase:") {
        return Ok(raw.to_string());
    }
    Ok(format!("handoff:{}", raw.to_lowercase().replace(' ', "-")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
