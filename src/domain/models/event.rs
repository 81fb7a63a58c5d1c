use super::AnalysisResult;
use super::GatewayError;
use super::MessageId;
use super::UploadTicket;

#[derive(Debug)]
pub enum Event {
    ReplyChunk(MessageId, String),
    ReplyDone(MessageId),
    ReplyFailed(MessageId, GatewayError),
    UploadFinished(UploadTicket, Result<AnalysisResult, GatewayError>),
}
