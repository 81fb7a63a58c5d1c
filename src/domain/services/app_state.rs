#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::ConversationStore;
use super::UploadWorkflow;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GatewayError;
use crate::domain::models::ImageFile;
use crate::domain::models::MessageId;
use crate::domain::models::Session;

pub const GREETING_TEXT: &str =
    "Hello! I'm your Dental AI Assistant. Please upload an OPG X-ray image to begin the analysis.";

pub const CHAT_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Everything one client session owns: its identity, the conversation, and
/// the current upload with its analysis. Built once at startup; all worker
/// results are funnelled through `handle_event` on the owning task.
pub struct AppState {
    pub session: Session,
    pub conversation: ConversationStore,
    pub upload: UploadWorkflow,
}

impl AppState {
    pub fn new(session: Session) -> AppState {
        let mut app_state = AppState {
            session,
            conversation: ConversationStore::default(),
            upload: UploadWorkflow::default(),
        };
        app_state.conversation.push_notification(GREETING_TEXT);

        return app_state;
    }

    /// Mirrors the send trigger: disabled while a reply is outstanding or
    /// before any X-ray has been analyzed.
    pub fn can_send(&self, text: &str) -> bool {
        return !text.trim().is_empty()
            && !self.conversation.is_awaiting_reply()
            && self.upload.analysis().is_some();
    }

    pub fn submit_message(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<MessageId> {
        if text.trim().is_empty() {
            bail!("Cannot send an empty message");
        }
        if self.conversation.is_awaiting_reply() {
            bail!("Still waiting for the previous reply");
        }
        if self.upload.analysis().is_none() {
            bail!("Upload an X-ray first");
        }

        let pending = self.conversation.begin_reply(text)?;
        tracing::debug!(user_id = %pending.user_id, reply_id = %pending.reply_id, "Message submitted");
        if let Err(err) = tx.send(Action::Converse(pending.reply_id, text.to_string())) {
            self.conversation
                .fail_reply(pending.reply_id, CHAT_ERROR_TEXT)?;
            bail!(format!("Actions service is gone: {err}"));
        }

        return Ok(pending.reply_id);
    }

    /// Non-image selections fail here, synchronously, without touching any
    /// state or reaching the network.
    pub fn select_file(
        &mut self,
        file: ImageFile,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(), GatewayError> {
        let ticket = self.upload.select(&file)?;
        tracing::debug!(ticket = %ticket, name = file.name.as_str(), "Upload started");

        if tx.send(Action::UploadImage(ticket, file)).is_err() {
            let outcome = Err(GatewayError::Network("Upload worker unavailable".to_string()));
            if let Some(text) = self.upload.complete(ticket, outcome) {
                self.conversation.push_notification(&text);
            }
        }

        return Ok(());
    }

    pub fn remove_file(&mut self) {
        self.upload.remove_file();
    }

    pub fn cancel_reply(&self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.conversation.is_awaiting_reply() {
            tx.send(Action::CancelReply())?;
        }

        return Ok(());
    }

    pub fn clear_session(&self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        tx.send(Action::ClearSession())?;
        return Ok(());
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::ReplyChunk(id, chunk) => {
                self.conversation.append_reply(id, &chunk)?;
            }
            Event::ReplyDone(id) => {
                self.conversation.finish_reply(id)?;
            }
            Event::ReplyFailed(id, err) => {
                tracing::error!(error = ?err, reply_id = %id, "Chat request failed");
                self.conversation.fail_reply(id, CHAT_ERROR_TEXT)?;
            }
            Event::UploadFinished(ticket, outcome) => {
                if let Some(text) = self.upload.complete(ticket, outcome) {
                    self.conversation.push_notification(&text);
                }
            }
        }

        return Ok(());
    }
}
