#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use std::fmt;

use chrono::DateTime;
use chrono::Local;

use super::Role;

/// Opaque message identity. Ids are handed out by a single
/// `ConversationStore` in creation order and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(id: u64) -> MessageId {
        return MessageId(id);
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "msg-{}", self.0);
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(id: MessageId, role: Role, content: &str) -> Message {
        return Message {
            id,
            role,
            content: content.to_string(),
            timestamp: Local::now(),
        };
    }

    pub fn id(&self) -> MessageId {
        return self.id;
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &str {
        return &self.content;
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        return self.timestamp;
    }

    pub fn append(&mut self, text: &str) {
        self.content += text;
    }

    pub fn replace(&mut self, text: &str) {
        self.content = text.to_string();
    }
}
