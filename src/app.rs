use crate::conversation::Conversation;
use crate::errors::RollcallResult;
use crate::interpreter::{interpret, Rendering, APOLOGY};
use crate::log_view::LogView;
use crate::models::{ChartPayload, ChatRequest, ChatResponse, HealthStatus};
use crate::status_indicator::StatusIndicator;

/// Which input line keystrokes go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Query,
    Token,
}

/// Everything the event loop can feed into [`App::dispatch`]. Key presses
/// arrive already translated; responses arrive from the request task.
#[derive(Debug)]
pub enum AppEvent {
    InputChar(char),
    InputBackspace,
    Submit,
    ToggleTokenFocus,
    ClearConversation,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ExportChart,
    RequestQuit,
    ConfirmQuit,
    CancelQuit,
    Tick,
    RequestFinished {
        seq: u64,
        result: RollcallResult<ChatResponse>,
    },
    HealthChecked {
        result: RollcallResult<HealthStatus>,
    },
}

/// Work a dispatch step hands back to the runtime. Dispatch itself never
/// does IO; the loop in `main` executes these.
#[derive(Debug)]
pub enum Command {
    SendChat { seq: u64, request: ChatRequest },
    ExportChart { message_id: u64, chart: ChartPayload },
}

/// Single owned record of client state. One request may be in flight at a
/// time; `busy` plus the sequence number enforce that and fence off
/// responses from any earlier life of the flag.
#[derive(Debug)]
pub struct App {
    pub conversation: Conversation,
    pub input: String,
    pub admin_token: String,
    pub focus: InputFocus,
    pub busy: bool,
    pub scroll: u16,
    pub status: StatusIndicator,
    pub logs: LogView,
    pub show_quit_confirm: bool,
    pub should_quit: bool,
    in_flight_seq: u64,
    next_seq: u64,
}

impl App {
    pub fn new(admin_token: Option<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            admin_token: admin_token.unwrap_or_default(),
            focus: InputFocus::Query,
            busy: false,
            scroll: 0,
            status: StatusIndicator::new(),
            logs: LogView::new(),
            show_quit_confirm: false,
            should_quit: false,
            in_flight_seq: 0,
            next_seq: 0,
        }
    }

    /// Applies one event to the state, returning any follow-up work.
    pub fn dispatch(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::InputChar(c) => {
                match self.focus {
                    InputFocus::Query => self.input.push(c),
                    InputFocus::Token => self.admin_token.push(c),
                }
                None
            }
            AppEvent::InputBackspace => {
                match self.focus {
                    InputFocus::Query => self.input.pop(),
                    InputFocus::Token => self.admin_token.pop(),
                };
                None
            }
            AppEvent::Submit => self.submit(),
            AppEvent::ToggleTokenFocus => {
                self.focus = match self.focus {
                    InputFocus::Query => InputFocus::Token,
                    InputFocus::Token => InputFocus::Query,
                };
                None
            }
            AppEvent::ClearConversation => {
                self.conversation.clear();
                self.scroll = 0;
                self.logs.add("Conversation cleared.");
                None
            }
            AppEvent::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            AppEvent::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            AppEvent::ScrollPageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                None
            }
            AppEvent::ScrollPageDown => {
                self.scroll = self.scroll.saturating_add(10);
                None
            }
            AppEvent::ExportChart => self.export_latest_chart(),
            AppEvent::RequestQuit => {
                self.show_quit_confirm = true;
                None
            }
            AppEvent::ConfirmQuit => {
                self.should_quit = true;
                None
            }
            AppEvent::CancelQuit => {
                self.show_quit_confirm = false;
                None
            }
            AppEvent::Tick => {
                self.status.update_spinner();
                None
            }
            AppEvent::RequestFinished { seq, result } => {
                self.finish_request(seq, result);
                None
            }
            AppEvent::HealthChecked { result } => {
                match result {
                    Ok(health) => {
                        log::info!("backend healthy: {}", health.service);
                        self.logs.add(format!("Backend online ({}).", health.service));
                    }
                    Err(e) => {
                        log::warn!("health check failed: {}", e);
                        self.logs.add(format!("Backend unreachable: {}", e));
                        self.status.set_status("backend unreachable, check base_url");
                    }
                }
                None
            }
        }
    }

    /// Turns the input line into an outbound request. No-op when blank or
    /// when a request is already in flight.
    fn submit(&mut self) -> Option<Command> {
        if self.busy {
            log::debug!("submit ignored, request already in flight");
            return None;
        }

        if self.input.trim().is_empty() {
            return None;
        }

        // Only the blank check trims; the message itself goes out exactly
        // as typed, surrounding whitespace included.
        let message = std::mem::take(&mut self.input);

        // History is projected before the new turn is stored, so the
        // request carries only prior context and the message itself once.
        let history = self.conversation.history();
        let request =
            ChatRequest::compose(message.as_str(), history, Some(self.admin_token.as_str()));

        self.conversation.push_user(message);

        let seq = self.next_seq();
        self.in_flight_seq = seq;
        self.busy = true;
        self.status.set_busy(true);
        self.status.clear_status();
        self.logs.add("Sending query to the assistant...");
        self.scroll_to_bottom();

        Some(Command::SendChat { seq, request })
    }

    fn finish_request(&mut self, seq: u64, result: RollcallResult<ChatResponse>) {
        if !self.busy || seq != self.in_flight_seq {
            log::warn!("discarding response with stale seq {}", seq);
            return;
        }

        self.busy = false;
        self.status.set_busy(false);
        self.status.clear_status();

        match result {
            Ok(response) => {
                if !response.success {
                    log::warn!("backend reported failure: {}", response.message);
                }
                let rendering = interpret(&response);
                if let Rendering::Unrecognized { tag, raw } = &rendering {
                    log::warn!("unknown data_type {:?}, payload: {:?}", tag, raw);
                    self.logs
                        .add(format!("Unknown data_type \"{}\", showing text only.", tag));
                } else {
                    self.logs.add("Response received.");
                }
                self.conversation.push_assistant(response.message, rendering);
            }
            Err(e) => {
                log::warn!("chat request failed: {}", e);
                self.logs.add(format!("Request failed: {}", e));
                self.conversation.push_assistant(APOLOGY, Rendering::Text);
            }
        }

        self.scroll_to_bottom();
    }

    fn export_latest_chart(&mut self) -> Option<Command> {
        let found = self
            .conversation
            .messages()
            .iter()
            .rev()
            .find_map(|message| {
                message
                    .rendering
                    .exportable_chart()
                    .map(|chart| (message.id, chart.clone()))
            });

        match found {
            Some((message_id, chart)) => Some(Command::ExportChart { message_id, chart }),
            None => {
                self.logs.add("No chart in the conversation to export.");
                None
            }
        }
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Sentinel pushed past the end; the draw pass clamps it to the real
    /// bottom and writes the clamped value back.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = u16::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::errors::RollcallError;
    use serde_json::json;

    fn response(body: serde_json::Value) -> ChatResponse {
        serde_json::from_value(body).unwrap()
    }

    fn submitted(app: &mut App, text: &str) -> (u64, ChatRequest) {
        app.input = text.to_string();
        match app.dispatch(AppEvent::Submit) {
            Some(Command::SendChat { seq, request }) => (seq, request),
            other => panic!("expected send command, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_composes_request_and_marks_busy() {
        let mut app = App::new(None);
        let (_, request) = submitted(&mut app, "how many students?");

        assert_eq!(request.message, "how many students?");
        assert!(request.conversation_history.is_empty());
        assert_eq!(request.admin_token, None);

        assert!(app.busy);
        assert!(app.input.is_empty());
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.conversation.messages()[0].role, Role::User);
    }

    #[test]
    fn test_submit_sends_input_as_typed() {
        let mut app = App::new(None);
        let (_, request) = submitted(&mut app, "  how many students?  ");

        assert_eq!(request.message, "  how many students?  ");
        assert_eq!(
            app.conversation.messages()[0].content,
            "  how many students?  "
        );
    }

    #[test]
    fn test_submit_blank_input_is_noop() {
        let mut app = App::new(None);
        app.input = "   ".to_string();
        assert!(app.dispatch(AppEvent::Submit).is_none());
        assert!(!app.busy);
        assert_eq!(app.conversation.len(), 0);
    }

    #[test]
    fn test_submit_while_busy_is_noop() {
        let mut app = App::new(None);
        submitted(&mut app, "first query");

        app.input = "second query".to_string();
        assert!(app.dispatch(AppEvent::Submit).is_none());
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.input, "second query");
    }

    #[test]
    fn test_submit_carries_admin_token() {
        let mut app = App::new(Some("admin123".to_string()));
        let (_, request) = submitted(&mut app, "delete student 2025001");
        assert_eq!(request.admin_token.as_deref(), Some("admin123"));
    }

    #[test]
    fn test_history_carries_prior_turns_only() {
        let mut app = App::new(None);
        let (seq, first) = submitted(&mut app, "how many students?");
        assert!(first.conversation_history.is_empty());

        app.dispatch(AppEvent::RequestFinished {
            seq,
            result: Ok(response(json!({"success": true, "message": "42 students"}))),
        });

        let (_, second) = submitted(&mut app, "per grade?");
        let roles: Vec<&str> = second
            .conversation_history
            .iter()
            .map(|h| h.role.as_str())
            .collect();
        assert_eq!(roles, ["user", "assistant"]);
        assert_eq!(second.conversation_history[1].content, "42 students");
    }

    #[test]
    fn test_response_appends_assistant_turn() {
        let mut app = App::new(None);
        let (seq, _) = submitted(&mut app, "list students");

        app.dispatch(AppEvent::RequestFinished {
            seq,
            result: Ok(response(json!({
                "success": true,
                "message": "1 student found",
                "data": {"table": [{"name": "Alice", "age": 20}]},
                "data_type": "table"
            }))),
        });

        assert!(!app.busy);
        assert_eq!(app.conversation.len(), 2);

        let assistant = &app.conversation.messages()[1];
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.content, "1 student found");
        assert!(matches!(assistant.rendering, Rendering::Table { .. }));
    }

    #[test]
    fn test_transport_failure_appends_apology() {
        let mut app = App::new(None);
        let (seq, _) = submitted(&mut app, "list students");

        app.dispatch(AppEvent::RequestFinished {
            seq,
            result: Err(RollcallError::api_error("request failed: timeout")),
        });

        assert!(!app.busy);
        assert_eq!(app.conversation.len(), 2);

        let assistant = &app.conversation.messages()[1];
        assert_eq!(assistant.content, APOLOGY);
        assert_eq!(assistant.rendering, Rendering::Text);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut app = App::new(None);
        let (seq, _) = submitted(&mut app, "list students");

        app.dispatch(AppEvent::RequestFinished {
            seq: seq + 999,
            result: Ok(response(json!({"success": true, "message": "late"}))),
        });

        assert!(app.busy);
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn test_clear_during_flight_keeps_the_response() {
        let mut app = App::new(None);
        let (seq, _) = submitted(&mut app, "list students");

        app.dispatch(AppEvent::ClearConversation);
        assert_eq!(app.conversation.len(), 0);

        app.dispatch(AppEvent::RequestFinished {
            seq,
            result: Ok(response(json!({"success": true, "message": "done"}))),
        });
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.conversation.messages()[0].role, Role::Assistant);
    }

    #[test]
    fn test_token_focus_routes_input() {
        let mut app = App::new(None);
        app.dispatch(AppEvent::ToggleTokenFocus);
        assert_eq!(app.focus, InputFocus::Token);

        app.dispatch(AppEvent::InputChar('a'));
        app.dispatch(AppEvent::InputChar('1'));
        app.dispatch(AppEvent::InputBackspace);
        assert_eq!(app.admin_token, "a");
        assert!(app.input.is_empty());

        app.dispatch(AppEvent::ToggleTokenFocus);
        app.dispatch(AppEvent::InputChar('q'));
        assert_eq!(app.input, "q");
    }

    #[test]
    fn test_export_without_chart_is_noop() {
        let mut app = App::new(None);
        assert!(app.dispatch(AppEvent::ExportChart).is_none());
    }

    #[test]
    fn test_export_picks_latest_chart() {
        let mut app = App::new(None);
        app.conversation.push_assistant(
            "old chart",
            Rendering::Chart {
                chart: Some(ChartPayload {
                    chart_type: "bar".into(),
                    data: "b2xk".into(),
                }),
            },
        );
        let latest = app.conversation.push_assistant(
            "new chart",
            Rendering::Chart {
                chart: Some(ChartPayload {
                    chart_type: "pie".into(),
                    data: "bmV3".into(),
                }),
            },
        );

        match app.dispatch(AppEvent::ExportChart) {
            Some(Command::ExportChart { message_id, chart }) => {
                assert_eq!(message_id, latest);
                assert_eq!(chart.chart_type, "pie");
            }
            other => panic!("expected export command, got {:?}", other),
        }
    }

    #[test]
    fn test_quit_flow_requires_confirmation() {
        let mut app = App::new(None);
        app.dispatch(AppEvent::RequestQuit);
        assert!(app.show_quit_confirm);
        assert!(!app.should_quit);

        app.dispatch(AppEvent::CancelQuit);
        assert!(!app.show_quit_confirm);

        app.dispatch(AppEvent::RequestQuit);
        app.dispatch(AppEvent::ConfirmQuit);
        assert!(app.should_quit);
    }
}
