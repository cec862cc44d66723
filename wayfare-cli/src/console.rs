use crate::command::{self, Command, HELP};
use anyhow::{Context, Result, bail};
use rustyline::DefaultEditor;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use wayfare_core::ChatItem;
use wayfare_realtime::{RealtimeRunner, ServerEvent, VoiceSession};

enum Step {
    Continue,
    Stop,
}

/// Drives a session from console lines.
pub struct Console {
    runner: RealtimeRunner,
}

impl Console {
    pub fn new(session: Arc<VoiceSession>) -> Result<Self> {
        let runner = RealtimeRunner::builder().session(session).build()?;
        Ok(Self { runner })
    }

    fn session(&self) -> &Arc<VoiceSession> {
        self.runner.session()
    }

    pub async fn run_interactive(&self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        println!("Wayfare Console");
        println!("Agent: {}", self.session().active_agent_name().unwrap_or_default());
        println!("Type /help for commands. Ctrl+C to exit.\n");

        loop {
            match rl.readline("User -> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(&line)?;
                    if let Step::Stop = self.handle_line_or_close(&line).await? {
                        break;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("EOF");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    break;
                }
            }
        }
        self.session().close().await?;
        Ok(())
    }

    pub async fn run_script(&self, path: &Path) -> Result<()> {
        let script = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read script {}", path.display()))?;

        for line in script.lines() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            println!("User -> {}", line.trim());
            if let Step::Stop = self.handle_line_or_close(line).await? {
                break;
            }
        }
        self.session().close().await?;
        Ok(())
    }

    /// Like [`Self::handle_line`], but closes the session before a fatal error
    /// is returned.
    async fn handle_line_or_close(&self, line: &str) -> Result<Step> {
        match self.handle_line(line).await {
            Ok(step) => Ok(step),
            Err(e) => {
                if let Err(close_err) = self.session().close().await {
                    warn!(error = %close_err, "Failed to close session after fatal error");
                }
                Err(e)
            }
        }
    }

    async fn handle_line(&self, line: &str) -> Result<Step> {
        let command = match command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Step::Continue),
            Err(message) => {
                eprintln!("{message}");
                return Ok(Step::Continue);
            }
        };

        let event = match command {
            Command::Say(text) => ServerEvent::user(text),
            Command::Assistant(text) => ServerEvent::assistant(text),
            Command::Tool { name, arguments } => {
                let call_id = format!("call_{}", uuid::Uuid::new_v4().simple());
                ServerEvent::function_call(call_id, name, arguments.to_string())
            }
            Command::History => {
                self.print_history();
                return Ok(Step::Continue);
            }
            Command::Agent => {
                match self.session().active_agent_name() {
                    Some(name) => println!("Active agent: {name}"),
                    None => println!("No active agent"),
                }
                return Ok(Step::Continue);
            }
            Command::Help => {
                println!("{HELP}");
                return Ok(Step::Continue);
            }
            Command::Quit => return Ok(Step::Stop),
        };

        match self.runner.handle_event(event).await {
            Ok(flow) if flow.is_break() => Ok(Step::Stop),
            Ok(_) => Ok(Step::Continue),
            Err(e) if e.is_fatal() => bail!("Session stopped: {e}"),
            Err(e) => {
                eprintln!("Error: {e}");
                Ok(Step::Continue)
            }
        }
    }

    fn print_history(&self) {
        for item in self.session().chat_context().items() {
            match item {
                ChatItem::Message(message) => println!("  {}: {}", message.role, message.content),
                ChatItem::FunctionCall { name, arguments, .. } => println!("  call {name}({arguments})"),
                ChatItem::FunctionOutput { name, output, .. } => println!("  {name} -> {output}"),
            }
        }
    }
}
