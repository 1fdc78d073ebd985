/// Address of a stock Ollama install.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Opening assistant turn of every conversation.
pub const GREETING: &str = "Hi! I'm DeepSeek. How can I help you code today? 💻";

/// Instruction prepended to every request. Never stored in the transcript.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert AI coding assistant. Provide concise, \
correct solutions with strategic print statements for debugging. Always respond in English.";
