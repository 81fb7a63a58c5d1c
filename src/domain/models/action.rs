use super::ImageFile;
use super::MessageId;
use super::UploadTicket;

#[derive(Debug)]
pub enum Action {
    CancelReply(),
    ClearSession(),
    Converse(MessageId, String),
    UploadImage(UploadTicket, ImageFile),
}
