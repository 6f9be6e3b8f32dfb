use reqwest::Method;

use super::types::{ChatReply, ChatRequest, UserQuery};
use super::{ApiError, ScopedClient};

const CHAT_MESSAGE_PATH: &str = "/chat/message";

impl ScopedClient<'_> {
    /// Send one chat message and wait for the assistant's single reply.
    pub async fn send_chat_message(&self, message: &str) -> Result<ChatReply, ApiError> {
        let request = self
            .request(Method::POST, CHAT_MESSAGE_PATH)
            .query(&UserQuery {
                user_id: self.user_id(),
            })
            .json(&ChatRequest { message });
        self.send_json(CHAT_MESSAGE_PATH, request).await
    }
}
