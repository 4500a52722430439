use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LlmPrompt<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
}
