/// Greeting seeded as the first model turn of every conversation.
pub const GREETING: &str = "您好，我是 Nexus 业务专家 (Expert) 智能体。我可以为您解析全球宏观趋势，或协助您筛选适合家办客户的 Alpha 策略。请问有什么可以帮您？";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

/// Proof that a user turn was accepted and a completion is owed.
///
/// Only `submit` can create one and only `settle` consumes one. Together with
/// the busy flag this guarantees at most one request is in flight, so model
/// turns land in the same order their user turns were submitted.
#[derive(Debug)]
pub struct PendingTurn {
    prompt: String,
}

impl PendingTurn {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Append-only transcript plus the busy flag for the single in-flight request.
/// Past entries are never mutated; insertion order is display order.
pub struct ConversationState {
    messages: Vec<Message>,
    busy: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                role: Role::Model,
                text: GREETING.to_string(),
            }],
            busy: false,
        }
    }

    /// Accepts a user turn, or rejects it as a no-op.
    ///
    /// Rejected when the text is empty or whitespace-only, or while a request
    /// is already in flight. New submissions are never queued; the caller is
    /// expected to disable its input affordance while busy.
    pub fn submit(&mut self, text: &str) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() || self.busy {
            return None;
        }

        self.messages.push(Message {
            role: Role::User,
            text: text.to_string(),
        });
        self.busy = true;

        Some(PendingTurn {
            prompt: text.to_string(),
        })
    }

    /// Records the model's reply for an accepted turn and clears the busy flag.
    pub fn settle(&mut self, _turn: PendingTurn, reply: &str) {
        self.messages.push(Message {
            role: Role::Model,
            text: reply.to_string(),
        });
        self.busy = false;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Resets to a fresh conversation with the seeded greeting.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
