use lexquiz_core::types::{ChatTurn, Role};

/// Persona sent as the opening user turn of every provider conversation.
pub const LEGAL_SYSTEM_PROMPT: &str = "You are a knowledgeable Indian legal assistant specializing in Indian law, including the Constitution of India, Indian Penal Code (IPC), Bharatiya Nyaya Sanhita (BNS 2023), and landmark Supreme Court cases.

Your role:
- Help users understand Indian legal concepts, statutes, and case law
- When asked about a legal topic, provide relevant case names and brief descriptions
- When asked about specific cases, provide detailed information including year, judges, key points, and significance
- Focus on Indian legal system (Constitution, IPC, BNS, CrPC, CPC, etc.)
- Be accurate, educational, and cite sources when possible
- Keep responses concise but informative

Format your responses clearly with proper structure when listing cases or providing details.";

/// Canned model reply acknowledging the persona.
pub const PERSONA_ACK: &str = "Understood. I am ready to assist with Indian legal queries, case law, and constitutional matters. How may I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Model,
}

impl Speaker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl From<Role> for Speaker {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Self::User,
            Role::Assistant => Self::Model,
        }
    }
}

/// Full turn list for a provider request: persona, acknowledgement, prior
/// history, then the new message.
pub fn conversation(message: &str, history: &[ChatTurn]) -> Vec<(Speaker, String)> {
    let mut turns = Vec::with_capacity(history.len() + 3);
    turns.push((Speaker::User, LEGAL_SYSTEM_PROMPT.to_string()));
    turns.push((Speaker::Model, PERSONA_ACK.to_string()));
    turns.extend(history.iter().map(|t| (Speaker::from(t.role), t.content.clone())));
    turns.push((Speaker::User, message.to_string()));
    turns
}
