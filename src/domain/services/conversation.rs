#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::collections::HashMap;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Message;
use crate::domain::models::MessageId;
use crate::domain::models::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub user_id: MessageId,
    pub reply_id: MessageId,
}

/// Ordered, append-only message log. The vector is the source of truth for
/// display order; `index` exists so the outstanding reply can be grown by id
/// even after other messages land behind it.
#[derive(Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    index: HashMap<MessageId, usize>,
    next_id: u64,
    pending_reply: Option<MessageId>,
}

impl ConversationStore {
    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        return self.index.get(&id).map(|idx| return &self.messages[*idx]);
    }

    pub fn last(&self) -> Option<&Message> {
        return self.messages.last();
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    pub fn pending_reply(&self) -> Option<MessageId> {
        return self.pending_reply;
    }

    pub fn is_awaiting_reply(&self) -> bool {
        return self.pending_reply.is_some();
    }

    fn push(&mut self, role: Role, content: &str) -> MessageId {
        self.next_id += 1;
        let id = MessageId::new(self.next_id);

        self.index.insert(id, self.messages.len());
        self.messages.push(Message::new(id, role, content));

        return id;
    }

    /// Appends a single, complete assistant message. Used for greetings and
    /// upload outcomes, which are never streamed.
    pub fn push_notification(&mut self, text: &str) -> MessageId {
        return self.push(Role::Assistant, text);
    }

    /// Appends the user's message and an empty assistant placeholder that
    /// will receive the reply. Only one reply may be outstanding at a time.
    pub fn begin_reply(&mut self, text: &str) -> Result<PendingReply> {
        if let Some(pending) = self.pending_reply {
            bail!(format!("Reply {pending} is still outstanding"));
        }

        let user_id = self.push(Role::User, text);
        let reply_id = self.push(Role::Assistant, "");
        self.pending_reply = Some(reply_id);

        return Ok(PendingReply { user_id, reply_id });
    }

    fn pending_mut(&mut self, id: MessageId) -> Result<&mut Message> {
        if self.pending_reply != Some(id) {
            bail!(format!("Message {id} is not the outstanding reply"));
        }

        let idx = match self.index.get(&id) {
            Some(idx) => *idx,
            None => bail!(format!("No message found for id {id}")),
        };

        return Ok(&mut self.messages[idx]);
    }

    pub fn append_reply(&mut self, id: MessageId, chunk: &str) -> Result<()> {
        self.pending_mut(id)?.append(chunk);
        return Ok(());
    }

    /// Overwrites whatever was streamed so far. The reply is resolved
    /// afterwards.
    pub fn fail_reply(&mut self, id: MessageId, text: &str) -> Result<()> {
        self.pending_mut(id)?.replace(text);
        self.pending_reply = None;
        return Ok(());
    }

    pub fn finish_reply(&mut self, id: MessageId) -> Result<()> {
        self.pending_mut(id)?;
        self.pending_reply = None;
        return Ok(());
    }
}
