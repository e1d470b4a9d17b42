//! PlannerSession - the orchestration loop
//!
//! Drives one planning conversation: send the accumulated history to the
//! reasoning service, interpret the reply as a tool call, a conversational
//! reply, or the terminal finish action, fold tool results back into
//! session state, and repeat until termination or failure. Strictly
//! turn-based - one outstanding reasoning call at a time, tools executed
//! inline.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{LlmConfig, SessionConfig};
use crate::llm::{ChatRequest, LlmClient, LlmError, Message};
use crate::prompts;
use crate::tools::{ToolContext, ToolError, ToolExecutor};

use super::action::AgentAction;

/// Cooperative cancellation flag
///
/// Observed at the top of each loop iteration; never preempts an
/// in-flight reasoning call or tool execution.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Terminal failures of a planning session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Tool {tool} failed (args: {args}): {source}")]
    Tool {
        tool: String,
        args: Value,
        #[source]
        source: ToolError,
    },

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// State of the planning session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Exchanging turns with the reasoning service
    Conversing,
    /// Finish action received
    Finished,
    /// Terminated on a fault
    Failed,
    /// Cancelled by the user
    Cancelled,
    /// Turn budget exhausted without a finish action
    MaxTurnsReached,
}

/// What a single driven turn produced
#[derive(Debug)]
pub enum Turn {
    /// A tool was dispatched and its result folded into session state
    Acted { tool: String, result: Value },

    /// Conversational reply - the caller should gather the next user message
    Reply(String),

    /// The session terminated
    Done(SessionOutcome),
}

/// How a session ended
#[derive(Debug)]
pub enum SessionOutcome {
    /// Finish action received; `result` is the model's carried payload
    Complete { result: Value, report: PlanReport },

    /// User-initiated cancellation (terminal, not an error)
    Cancelled,

    /// Turn budget exhausted
    MaxTurnsReached,

    /// Terminated on a fault
    Failed { error: SessionError },
}

/// The structured final plan, or what was missing to build one
#[derive(Debug)]
pub enum PlanReport {
    Ready(PlanSummary),
    Insufficient { missing: Vec<&'static str> },
}

impl PlanReport {
    /// Keys that must have accumulated for a full plan
    const REQUIRED: [&'static str; 3] = ["selected_slot", "nearby_places", "budget_estimate"];

    /// Build a report from accumulated tool results
    ///
    /// Missing keys produce an explicit Insufficient report - absent data
    /// is never indexed.
    pub fn build(accumulated: &Map<String, Value>) -> Self {
        let missing: Vec<&'static str> = Self::REQUIRED
            .iter()
            .copied()
            .filter(|key| !accumulated.contains_key(*key))
            .collect();

        if !missing.is_empty() {
            return PlanReport::Insufficient { missing };
        }

        PlanReport::Ready(PlanSummary {
            event_request: accumulated.get("event_request").cloned(),
            selected_slot: accumulated.get("selected_slot").cloned().unwrap_or(Value::Null),
            nearby_places: accumulated
                .get("nearby_places")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default(),
            budget_estimate: accumulated.get("budget_estimate").cloned().unwrap_or(Value::Null),
        })
    }
}

/// The structured final plan assembled from accumulated results
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlanSummary {
    pub event_request: Option<Value>,
    pub selected_slot: Value,
    pub nearby_places: Vec<Value>,
    pub budget_estimate: Value,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(event) = &self.event_request
            && let Some(name) = event.get("event_name").and_then(|v| v.as_str())
        {
            writeln!(f, "Event: {}", name)?;
        }

        let slot = &self.selected_slot;
        writeln!(
            f,
            "When:  {} {}-{}",
            slot.get("date").and_then(|v| v.as_str()).unwrap_or("?"),
            slot.get("start_time").and_then(|v| v.as_str()).unwrap_or("?"),
            slot.get("end_time").and_then(|v| v.as_str()).unwrap_or("?"),
        )?;

        writeln!(f, "Where:")?;
        for place in &self.nearby_places {
            writeln!(f, "  - {}", place.get("name").and_then(|v| v.as_str()).unwrap_or("?"))?;
        }

        write!(
            f,
            "Budget: {} {} ({} per person)",
            self.budget_estimate.get("total_budget").unwrap_or(&Value::Null),
            self.budget_estimate
                .get("currency")
                .and_then(|v| v.as_str())
                .unwrap_or(""),
            self.budget_estimate.get("per_person_cost").unwrap_or(&Value::Null),
        )
    }
}

/// One planning conversation and the state it owns
pub struct PlannerSession {
    /// Session ID (for log correlation)
    id: String,

    /// Reasoning-service client
    llm: Arc<dyn LlmClient>,

    /// Tool registry for this session
    tools: ToolExecutor,

    /// Collaborators handed to tools at execution time
    ctx: ToolContext,

    /// Conversation history, system prompt first
    conversation: Vec<Message>,

    /// Merged tool results, last write wins per key
    accumulated: Map<String, Value>,

    /// Current state
    state: SessionState,

    /// Reasoning turns consumed so far
    turn_count: usize,

    /// Session behavior configuration
    config: SessionConfig,

    /// Max tokens per reasoning reply
    max_tokens: u32,

    /// Sampling temperature
    temperature: f32,

    /// Cooperative cancellation flag
    cancel: CancelToken,
}

impl PlannerSession {
    /// Create a new session with an injected tool registry
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolExecutor,
        ctx: ToolContext,
        config: SessionConfig,
        llm_config: &LlmConfig,
        cancel: CancelToken,
    ) -> Self {
        let system = prompts::system_prompt(&tools.definitions());
        let id = uuid::Uuid::now_v7().to_string();
        debug!(session_id = %id, "PlannerSession::new: called");

        Self {
            id,
            llm,
            tools,
            ctx,
            conversation: vec![Message::system(system)],
            accumulated: Map::new(),
            state: SessionState::Conversing,
            turn_count: 0,
            config,
            max_tokens: llm_config.max_tokens,
            temperature: llm_config.temperature,
            cancel,
        }
    }

    /// Session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Accumulated tool results
    pub fn accumulated(&self) -> &Map<String, Value> {
        &self.accumulated
    }

    /// Number of messages currently in the conversation
    pub fn history_len(&self) -> usize {
        self.conversation.len()
    }

    /// Append a user message to the conversation
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.conversation.push(Message::user(text));
    }

    /// Drive the session one step forward
    ///
    /// Sends the conversation to the reasoning service and interprets the
    /// reply. Tool calls are dispatched and folded in before returning;
    /// conversational replies are handed back so the caller can collect
    /// the next user message.
    pub async fn next_turn(&mut self) -> Result<Turn, SessionError> {
        if self.cancel.is_cancelled() {
            info!(session_id = %self.id, "next_turn: cancelled");
            self.state = SessionState::Cancelled;
            return Ok(Turn::Done(SessionOutcome::Cancelled));
        }

        if self.turn_count >= self.config.max_turns {
            warn!(session_id = %self.id, max_turns = self.config.max_turns, "next_turn: turn budget exhausted");
            self.state = SessionState::MaxTurnsReached;
            return Ok(Turn::Done(SessionOutcome::MaxTurnsReached));
        }

        let reply = match self.request_completion().await {
            Ok(reply) => reply,
            Err(e) => {
                self.state = SessionState::Failed;
                return Err(e);
            }
        };
        self.turn_count += 1;

        match AgentAction::from_text(&reply) {
            None => {
                debug!(session_id = %self.id, "next_turn: conversational reply");
                self.conversation.push(Message::assistant(reply.clone()));
                self.trim_history();
                Ok(Turn::Reply(reply))
            }
            Some(AgentAction::Finish { result }) => {
                info!(session_id = %self.id, turns = self.turn_count, "next_turn: finish action");
                self.state = SessionState::Finished;
                let report = PlanReport::build(&self.accumulated);
                Ok(Turn::Done(SessionOutcome::Complete { result, report }))
            }
            Some(AgentAction::ToolCall { tool, args }) => self.dispatch_tool(tool, args).await,
        }
    }

    /// Send the conversation to the reasoning service
    ///
    /// Rate limits pause for the service-supplied interval and resubmit
    /// the same request; no state is mutated between attempts.
    async fn request_completion(&self) -> Result<String, SessionError> {
        let request = ChatRequest {
            messages: self.conversation.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let mut retries = 0u32;
        loop {
            match self.llm.complete(request.clone()).await {
                Ok(response) => return Ok(response.content),
                Err(e) if e.is_rate_limit() => {
                    retries += 1;
                    if self.config.rate_limit_max_retries > 0 && retries > self.config.rate_limit_max_retries {
                        warn!(session_id = %self.id, retries, "request_completion: rate limit retry budget exhausted");
                        return Err(SessionError::Llm(e));
                    }

                    let wait = e
                        .retry_after()
                        .unwrap_or(Duration::from_secs(self.config.rate_limit_default_secs));
                    warn!(session_id = %self.id, wait_secs = wait.as_secs(), "request_completion: rate limited, will resubmit");
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(SessionError::Llm(e)),
            }
        }
    }

    /// Dispatch a tool call and fold the result into session state
    ///
    /// Both the decided action and the tool's result are appended to the
    /// conversation, so the reasoning service sees its own call and the
    /// outcome on the next turn.
    async fn dispatch_tool(&mut self, tool: String, args: Value) -> Result<Turn, SessionError> {
        info!(session_id = %self.id, %tool, "dispatch_tool: called");
        let decided = json!({ "tool": tool, "args": args }).to_string();

        match self.tools.execute(&tool, args.clone(), &self.ctx).await {
            Ok(result) => {
                self.conversation.push(Message::assistant(decided));
                self.conversation.push(Message::user(result.to_string()));
                self.trim_history();

                if let Some(map) = result.as_object() {
                    for (key, value) in map {
                        // Last write wins; overwriting an earlier key is allowed
                        self.accumulated.insert(key.clone(), value.clone());
                    }
                }

                Ok(Turn::Acted { tool, result })
            }
            Err(ToolError::UnknownTool { name }) => {
                warn!(session_id = %self.id, %name, "dispatch_tool: unknown tool");
                self.state = SessionState::Failed;
                Err(SessionError::UnknownTool { name })
            }
            Err(source) => {
                warn!(session_id = %self.id, %tool, error = %source, "dispatch_tool: execution fault");
                self.state = SessionState::Failed;
                Err(SessionError::Tool { tool, args, source })
            }
        }
    }

    /// Cap conversation length per the configured window
    ///
    /// Drops from the middle: the system prompt and the initial user
    /// request always survive, and so do the most recent messages - in
    /// particular the last tool call and its result, verbatim.
    fn trim_history(&mut self) {
        let window = self.config.history_window;
        if window == 0 || self.conversation.len() <= window {
            return;
        }

        let keep_head = 2.min(self.conversation.len());
        let keep_tail = window.saturating_sub(keep_head).max(2);
        let cut_to = self.conversation.len() - keep_tail;

        if cut_to > keep_head {
            debug!(session_id = %self.id, dropped = cut_to - keep_head, "trim_history: window exceeded");
            self.conversation.drain(keep_head..cut_to);
        }
    }

    /// Run the session as an interactive console conversation
    ///
    /// Narrates tool steps, prints conversational replies verbatim, and
    /// maps Ctrl-C / Ctrl-D / "quit" to cooperative cancellation. Terminal
    /// failures are reported by category, not a fault trace.
    pub async fn run_interactive(&mut self, initial_request: Option<String>) -> eyre::Result<SessionOutcome> {
        println!("{}", "planagent - event planning session".bold());
        println!("{}", "Describe the event to plan. 'quit' exits.".dimmed());

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        match initial_request {
            Some(request) => {
                println!("{} {}", ">".bright_green(), request);
                self.push_user(request);
            }
            None => match self.read_user_line(&mut rl)? {
                Some(line) => self.push_user(line),
                None => {
                    self.state = SessionState::Cancelled;
                    println!("Session cancelled.");
                    return Ok(SessionOutcome::Cancelled);
                }
            },
        }

        loop {
            match self.next_turn().await {
                Ok(Turn::Acted { tool, .. }) => {
                    println!("{} {}", "*".cyan(), format!("executing {}", tool).dimmed());
                }
                Ok(Turn::Reply(text)) => {
                    println!("\n{}\n", text);
                    match self.read_user_line(&mut rl)? {
                        Some(line) => self.push_user(line),
                        None => {
                            self.state = SessionState::Cancelled;
                            println!("Session cancelled.");
                            return Ok(SessionOutcome::Cancelled);
                        }
                    }
                }
                Ok(Turn::Done(outcome)) => {
                    self.print_outcome(&outcome);
                    return Ok(outcome);
                }
                Err(error) => {
                    println!("{} {}", "x".red(), format!("planning failed: {}", error).red());
                    return Ok(SessionOutcome::Failed { error });
                }
            }
        }
    }

    /// Read one user line; None means cancel
    fn read_user_line(&self, rl: &mut DefaultEditor) -> eyre::Result<Option<String>> {
        loop {
            match rl.readline(&format!("{} ", ">".bright_green())) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    match input.to_lowercase().as_str() {
                        "quit" | "exit" | "q" => return Ok(None),
                        _ => return Ok(Some(input.to_string())),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    return Ok(None);
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    return Ok(None);
                }
                Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
            }
        }
    }

    /// Print a terminal outcome for the interactive user
    fn print_outcome(&self, outcome: &SessionOutcome) {
        match outcome {
            SessionOutcome::Complete { result, report } => match report {
                PlanReport::Ready(summary) => {
                    println!("\n{}", "Final plan".bold().green());
                    println!("{}", summary);
                    if let Some(text) = result.as_str() {
                        println!("\n{}", text);
                    }
                }
                PlanReport::Insufficient { missing } => {
                    println!(
                        "{} {}",
                        "!".yellow(),
                        format!("plan finished with insufficient data (missing: {})", missing.join(", ")).yellow()
                    );
                    if let Some(text) = result.as_str() {
                        println!("\n{}", text);
                    }
                }
            },
            SessionOutcome::Cancelled => println!("Session cancelled."),
            SessionOutcome::MaxTurnsReached => {
                println!("{}", "Turn budget exhausted without a final plan.".yellow());
            }
            SessionOutcome::Failed { error } => {
                println!("{} {}", "x".red(), format!("planning failed: {}", error).red());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::mock::{ScriptedLlm, reply};
    use crate::tools::test_support::{StaticPlaces, sample_place};

    fn make_session(llm: Arc<ScriptedLlm>, session_config: SessionConfig) -> PlannerSession {
        let config = Config::default();
        let ctx = ToolContext::new(
            "test-session".to_string(),
            llm.clone(),
            Arc::new(StaticPlaces(vec![sample_place("Cafe Madras")])),
            config.schedule.clone(),
            config.budget.clone(),
        );

        PlannerSession::new(
            llm,
            ToolExecutor::standard(),
            ctx,
            session_config,
            &config.llm,
            CancelToken::new(),
        )
    }

    #[tokio::test]
    async fn test_finish_terminates_without_further_calls() {
        let llm = Arc::new(ScriptedLlm::replies(&[
            r#"{"tool": "finish", "args": {"result": "plan ready"}}"#,
            "this must never be requested",
        ]));
        let mut session = make_session(llm.clone(), SessionConfig::default());
        session.push_user("plan something");

        let turn = session.next_turn().await.unwrap();
        match turn {
            Turn::Done(SessionOutcome::Complete { result, .. }) => {
                assert_eq!(result, serde_json::json!("plan ready"));
            }
            other => panic!("expected Complete, got {:?}", other),
        }

        assert_eq!(*session.state(), SessionState::Finished);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_finish_without_tools_reports_insufficient_data() {
        let llm = Arc::new(ScriptedLlm::replies(&[r#"{"tool": "finish", "args": {"result": "?"}}"#]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan something");

        match session.next_turn().await.unwrap() {
            Turn::Done(SessionOutcome::Complete { report, .. }) => match report {
                PlanReport::Insufficient { missing } => {
                    assert_eq!(missing, vec!["selected_slot", "nearby_places", "budget_estimate"]);
                }
                PlanReport::Ready(_) => panic!("expected insufficient report"),
            },
            other => panic!("expected Complete, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_the_session() {
        let llm = Arc::new(ScriptedLlm::replies(&[r#"{"tool": "teleport", "args": {}}"#]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan something");

        let err = session.next_turn().await.unwrap_err();
        assert!(matches!(err, SessionError::UnknownTool { name } if name == "teleport"));
        assert_eq!(*session.state(), SessionState::Failed);
    }

    #[tokio::test]
    async fn test_tool_fault_carries_tool_and_args() {
        // Reversed dates fail validation inside generate_slots
        let llm = Arc::new(ScriptedLlm::replies(&[
            r#"{"tool": "generate_slots", "args": {"start_date": "2025-07-12", "end_date": "2025-07-10"}}"#,
        ]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan something");

        let err = session.next_turn().await.unwrap_err();
        match err {
            SessionError::Tool { tool, args, .. } => {
                assert_eq!(tool, "generate_slots");
                assert_eq!(args["start_date"], "2025-07-12");
            }
            other => panic!("expected Tool error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_conversational_reply_is_passed_through() {
        let llm = Arc::new(ScriptedLlm::replies(&["Which city will the event be in?"]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan a dinner");

        match session.next_turn().await.unwrap() {
            Turn::Reply(text) => assert_eq!(text, "Which city will the event be in?"),
            other => panic!("expected Reply, got {:?}", other),
        }

        assert_eq!(*session.state(), SessionState::Conversing);
    }

    #[tokio::test]
    async fn test_tool_results_merge_last_write_wins() {
        let llm = Arc::new(ScriptedLlm::replies(&[
            r#"{"tool": "generate_slots", "args": {"start_date": "2025-07-10", "duration_hours": 2}}"#,
            r#"{"tool": "generate_slots", "args": {"start_date": "2025-07-10", "duration_hours": 3}}"#,
        ]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan something");

        session.next_turn().await.unwrap();
        assert_eq!(session.accumulated()["feasible_slots"].as_array().unwrap().len(), 4);

        session.next_turn().await.unwrap();
        assert_eq!(session.accumulated()["feasible_slots"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_appends_action_and_result_to_history() {
        let llm = Arc::new(ScriptedLlm::replies(&[
            r#"{"tool": "estimate_budget", "args": {"number_of_people": 2}}"#,
        ]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan something");

        let before = session.history_len();
        session.next_turn().await.unwrap();

        // decided action + tool result
        assert_eq!(session.history_len(), before + 2);
    }

    #[tokio::test]
    async fn test_rate_limit_resubmits_same_request() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Err(LlmError::RateLimited {
                retry_after: Duration::from_millis(1),
            }),
            Ok(reply(r#"{"tool": "finish", "args": {"result": "done"}}"#)),
        ]));
        let mut session = make_session(llm.clone(), SessionConfig::default());
        session.push_user("plan something");

        match session.next_turn().await.unwrap() {
            Turn::Done(SessionOutcome::Complete { .. }) => {}
            other => panic!("expected Complete after retry, got {:?}", other),
        }

        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_retry_budget_is_honored() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Err(LlmError::RateLimited {
                retry_after: Duration::from_millis(1),
            }),
            Err(LlmError::RateLimited {
                retry_after: Duration::from_millis(1),
            }),
        ]));
        let config = SessionConfig {
            rate_limit_max_retries: 1,
            ..SessionConfig::default()
        };
        let mut session = make_session(llm.clone(), config);
        session.push_user("plan something");

        let err = session.next_turn().await.unwrap_err();
        assert!(matches!(err, SessionError::Llm(e) if e.is_rate_limit()));
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_other_llm_faults_terminate() {
        let llm = Arc::new(ScriptedLlm::new(vec![Err(LlmError::InvalidResponse(
            "garbled".to_string(),
        ))]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan something");

        let err = session.next_turn().await.unwrap_err();
        assert!(matches!(err, SessionError::Llm(_)));
        assert_eq!(*session.state(), SessionState::Failed);
    }

    #[tokio::test]
    async fn test_cancellation_observed_before_next_call() {
        let llm = Arc::new(ScriptedLlm::replies(&["never requested"]));
        let config = Config::default();
        let ctx = ToolContext::new(
            "test-session".to_string(),
            llm.clone(),
            Arc::new(StaticPlaces(vec![])),
            config.schedule.clone(),
            config.budget.clone(),
        );
        let cancel = CancelToken::new();
        let mut session = PlannerSession::new(
            llm.clone(),
            ToolExecutor::standard(),
            ctx,
            SessionConfig::default(),
            &config.llm,
            cancel.clone(),
        );
        session.push_user("plan something");

        cancel.cancel();
        match session.next_turn().await.unwrap() {
            Turn::Done(SessionOutcome::Cancelled) => {}
            other => panic!("expected Cancelled, got {:?}", other),
        }

        assert_eq!(llm.call_count(), 0);
        assert_eq!(*session.state(), SessionState::Cancelled);
    }

    #[tokio::test]
    async fn test_turn_budget_exhaustion() {
        let llm = Arc::new(ScriptedLlm::replies(&["first reply", "never requested"]));
        let config = SessionConfig {
            max_turns: 1,
            ..SessionConfig::default()
        };
        let mut session = make_session(llm.clone(), config);
        session.push_user("plan something");

        assert!(matches!(session.next_turn().await.unwrap(), Turn::Reply(_)));
        session.push_user("go on");

        match session.next_turn().await.unwrap() {
            Turn::Done(SessionOutcome::MaxTurnsReached) => {}
            other => panic!("expected MaxTurnsReached, got {:?}", other),
        }

        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_history_window_keeps_anchors_and_tail() {
        let mut replies = Vec::new();
        for _ in 0..6 {
            replies.push(r#"{"tool": "estimate_budget", "args": {"number_of_people": 2}}"#);
        }
        let llm = Arc::new(ScriptedLlm::replies(&replies));
        let config = SessionConfig {
            history_window: 6,
            ..SessionConfig::default()
        };
        let mut session = make_session(llm, config);
        session.push_user("plan something");

        for _ in 0..6 {
            session.next_turn().await.unwrap();
        }

        assert!(session.history_len() <= 6);

        // System prompt and initial request survive trimming
        assert_eq!(session.conversation[0].role, crate::llm::Role::System);
        assert_eq!(session.conversation[1].content, "plan something");

        // The most recent tool call and its result are the verbatim tail
        let tail_action = &session.conversation[session.conversation.len() - 2];
        let tail_result = &session.conversation[session.conversation.len() - 1];
        assert!(tail_action.content.contains("estimate_budget"));
        assert!(tail_result.content.contains("budget_estimate"));
    }

    #[tokio::test]
    async fn test_unbounded_history_by_default() {
        let llm = Arc::new(ScriptedLlm::replies(&[
            r#"{"tool": "estimate_budget", "args": {}}"#,
            r#"{"tool": "estimate_budget", "args": {}}"#,
            r#"{"tool": "estimate_budget", "args": {}}"#,
        ]));
        let mut session = make_session(llm, SessionConfig::default());
        session.push_user("plan something");

        for _ in 0..3 {
            session.next_turn().await.unwrap();
        }

        // system + user + 3 * (action + result)
        assert_eq!(session.history_len(), 8);
    }

    #[test]
    fn test_plan_report_ready_when_all_keys_present() {
        let mut accumulated = Map::new();
        accumulated.insert("selected_slot".to_string(), serde_json::json!({"date": "2025-07-10"}));
        accumulated.insert("nearby_places".to_string(), serde_json::json!([{"name": "Cafe"}]));
        accumulated.insert("budget_estimate".to_string(), serde_json::json!({"total_budget": 600.0}));

        match PlanReport::build(&accumulated) {
            PlanReport::Ready(summary) => {
                assert_eq!(summary.nearby_places.len(), 1);
                assert!(summary.event_request.is_none());
            }
            PlanReport::Insufficient { .. } => panic!("expected ready report"),
        }
    }

    #[test]
    fn test_plan_summary_display() {
        let summary = PlanSummary {
            event_request: Some(serde_json::json!({"event_name": "family lunch"})),
            selected_slot: serde_json::json!({"date": "2025-07-10", "start_time": "13:00", "end_time": "15:00"}),
            nearby_places: vec![serde_json::json!({"name": "Cafe Madras"})],
            budget_estimate: serde_json::json!({"total_budget": 1200.0, "per_person_cost": 300.0, "currency": "INR"}),
        };

        let rendered = summary.to_string();
        assert!(rendered.contains("family lunch"));
        assert!(rendered.contains("2025-07-10 13:00-15:00"));
        assert!(rendered.contains("Cafe Madras"));
        assert!(rendered.contains("1200"));
    }
}
