use std::fmt;

/// Identifies one upload attempt. Only the most recently issued ticket may
/// change the workflow state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn new(generation: u64) -> UploadTicket {
        return UploadTicket(generation);
    }
}

impl fmt::Display for UploadTicket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "upload-{}", self.0);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum UploadState {
    Idle,
    Uploading,
    AnalysisReady,
    Failed,
}
