use crate::cli::chat::conversation_state::{ConversationState, Message, PendingTurn};
use crate::gemini_client::CompletionClient;

/// One conversation bound to one completion client.
///
/// `submit` is a synchronous state transition; the await happens in `settle`.
/// The surrounding surface can therefore observe the busy flag and the
/// appended user turn before the request resolves. Both fold into `send` when
/// no intermediate observation is needed.
pub struct ChatSession<C> {
    state: ConversationState,
    client: C,
}

impl<C: CompletionClient> ChatSession<C> {
    pub fn new(client: C) -> Self {
        Self {
            state: ConversationState::new(),
            client,
        }
    }

    /// See [`ConversationState::submit`]; `None` means the input was rejected.
    pub fn submit(&mut self, text: &str) -> Option<PendingTurn> {
        self.state.submit(text)
    }

    /// Resolves an accepted turn: one completion call, then the model turn is
    /// appended and the session is idle again. The client's contract is total,
    /// so this always produces a reply.
    pub async fn settle(&mut self, turn: PendingTurn) -> &Message {
        let reply = self.client.complete(turn.prompt()).await;
        self.state.settle(turn, &reply);
        self.state.messages().last().unwrap()
    }

    /// Submit and settle in one step. Returns `None` if the input was rejected.
    pub async fn send(&mut self, text: &str) -> Option<&Message> {
        let turn = self.submit(text)?;
        Some(self.settle(turn).await)
    }

    pub fn messages(&self) -> &[Message] {
        self.state.messages()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::cli::chat::conversation_state::Role;
    use crate::gemini_client::CompletionClient;

    /// Fake client that counts calls and echoes a canned reply.
    struct CountingClient {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl CountingClient {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionClient for &CountingClient {
        async fn complete(&self, _prompt: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.to_string()
        }
    }

    #[tokio::test]
    async fn sequential_turn_walks_the_state_machine() {
        let client = CountingClient::new("Nexus connects you to Blackstone.");
        let mut session = ChatSession::new(&client);
        assert_eq!(session.messages().len(), 1);

        let turn = session.submit("hello").unwrap();
        assert!(session.is_busy());
        assert_eq!(session.messages().len(), 2);
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.text, "hello");

        session.settle(turn).await;
        assert!(!session.is_busy());
        assert_eq!(session.messages().len(), 3);
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Model);
        assert!(!last.text.is_empty());
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn rejected_submissions_never_reach_the_client() {
        let client = CountingClient::new("reply");
        let mut session = ChatSession::new(&client);

        assert!(session.send("").await.is_none());
        assert!(session.send("   ").await.is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn second_submission_before_settlement_is_dropped() {
        let client = CountingClient::new("reply");
        let mut session = ChatSession::new(&client);

        let turn = session.submit("a").unwrap();
        assert!(session.submit("b").is_none());
        assert_eq!(session.messages().len(), 2);

        session.settle(turn).await;
        assert_eq!(session.messages().len(), 3);
        assert!(session.messages().iter().all(|m| m.text != "b"));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn send_trims_the_prompt_before_it_reaches_the_transcript() {
        let client = CountingClient::new("reply");
        let mut session = ChatSession::new(&client);

        session.send("  hello  ").await.unwrap();
        assert_eq!(session.messages()[1].text, "hello");
    }
}
