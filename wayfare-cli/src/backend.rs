use async_trait::async_trait;
use wayfare_core::{RealtimeConfig, Result, SpeechBackend, ToolResponse};

/// Prints what a speech backend would be asked to do.
#[derive(Debug, Default)]
pub struct ConsoleBackend;

#[async_trait]
impl SpeechBackend for ConsoleBackend {
    async fn update_session(&self, config: &RealtimeConfig) -> Result<()> {
        println!("[session] tools: {}", config.tool_names().join(", "));
        Ok(())
    }

    async fn generate_reply(&self, instructions: &str) -> Result<()> {
        println!("\nAgent (speaks) -> {}\n", instructions.trim());
        Ok(())
    }

    async fn send_tool_response(&self, response: ToolResponse) -> Result<()> {
        let output = serde_json::to_string_pretty(&response.output)?;
        println!("[tool {}] {}", response.call_id, output);
        Ok(())
    }
}
