//! Console line grammar.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Something the caller said.
    Say(String),
    /// Something the assistant said.
    Assistant(String),
    /// Invoke a tool on the active agent.
    Tool { name: String, arguments: Value },
    History,
    Agent,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <text>                  say something as the caller
  /assistant <text>       record an assistant reply
  /tool <name> [json]     call a tool on the active agent
  /history                show the conversation
  /agent                  show the active agent
  /help                   show this message
  /quit                   leave the console";

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Say(line.to_string())));
    };

    let (verb, args) = match rest.split_once(char::is_whitespace) {
        Some((verb, args)) => (verb, args.trim()),
        None => (rest, ""),
    };

    let command = match verb {
        "assistant" if !args.is_empty() => Command::Assistant(args.to_string()),
        "assistant" => return Err("Usage: /assistant <text>".to_string()),
        "tool" => parse_tool(args)?,
        "history" => Command::History,
        "agent" => Command::Agent,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: /{other}")),
    };
    Ok(Some(command))
}

fn parse_tool(args: &str) -> Result<Command, String> {
    let (name, json) = match args.split_once(char::is_whitespace) {
        Some((name, json)) => (name, json.trim()),
        None => (args, ""),
    };
    if name.is_empty() {
        return Err("Usage: /tool <name> [json]".to_string());
    }
    let arguments = if json.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(json).map_err(|e| format!("Invalid tool arguments: {e}"))?
    };
    Ok(Command::Tool { name: name.to_string(), arguments })
}
