#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::StreamSimulator;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GatewayBox;
use crate::domain::models::ImageFile;
use crate::domain::models::MessageId;
use crate::domain::models::Session;
use crate::domain::models::UploadTicket;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /upload (/u) [PATH] - Uploads an OPG X-ray image for analysis. A new upload replaces the previous analysis.
- /remove (/rm) - Removes the uploaded image together with its analysis.
- /analysis (/an) - Shows or hides the analysis panel for the current X-ray.
- /stop (/s) - Stops revealing the reply that is currently being typed out.
- /clear - Asks the backend to forget the conversation so far.
- /quit /exit (/q) - Exit.
- /help (/h) - Provides this help menu.

Any other text is sent to the assistant once an X-ray has been analyzed.
        "#;

    return text.trim().to_string();
}

async fn converse(
    gateway: GatewayBox,
    simulator: StreamSimulator,
    session_id: String,
    reply_id: MessageId,
    text: String,
    token: CancellationToken,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let reply = match gateway.converse(&text, &session_id).await {
        Ok(reply) => reply,
        Err(err) => {
            tx.send(Event::ReplyFailed(reply_id, err))?;
            return Ok(());
        }
    };

    let completed = simulator
        .deliver(&reply, &token, |chunk| {
            tx.send(Event::ReplyChunk(reply_id, chunk))?;
            return Ok(());
        })
        .await?;

    if !completed {
        tracing::debug!(reply_id = %reply_id, "Reply stream stopped early");
    }

    tx.send(Event::ReplyDone(reply_id))?;

    return Ok(());
}

async fn upload(
    gateway: GatewayBox,
    ticket: UploadTicket,
    file: ImageFile,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = gateway.upload_image(&file).await;
    tx.send(Event::UploadFinished(ticket, res))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs gateway work off the UI task. Every outcome is reported back as an
    /// `Event`; nothing here touches conversation state directly.
    pub async fn start(
        gateway: GatewayBox,
        simulator: StreamSimulator,
        session: Session,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut reply_token = CancellationToken::new();

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                return Ok(());
            }

            let worker_tx = tx.clone();
            let worker_gateway = gateway.clone();
            match action.unwrap() {
                Action::Converse(reply_id, text) => {
                    reply_token = CancellationToken::new();
                    let token = reply_token.clone();
                    let worker_simulator = simulator.clone();
                    let session_id = session.id.to_string();

                    tokio::spawn(async move {
                        let res = converse(
                            worker_gateway,
                            worker_simulator,
                            session_id,
                            reply_id,
                            text,
                            token,
                            worker_tx,
                        )
                        .await;

                        if let Err(err) = res {
                            tracing::error!(error = ?err, "Reply worker failed");
                        }
                    });
                }
                Action::CancelReply() => {
                    reply_token.cancel();
                }
                Action::UploadImage(ticket, file) => {
                    tokio::spawn(async move {
                        if let Err(err) = upload(worker_gateway, ticket, file, worker_tx).await {
                            tracing::error!(error = ?err, "Upload worker failed");
                        }
                    });
                }
                Action::ClearSession() => {
                    let session_id = session.id.to_string();
                    tokio::spawn(async move {
                        worker_gateway.clear_session(&session_id).await;
                    });
                }
            }
        }
    }
}
