use crate::llm_client::CompletionRequest;

/// What a widget did with user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input accepted; the widget is now waiting on this request.
    Started(CompletionRequest),
    /// Empty or whitespace-only input. Nothing changed, nothing to send.
    Blank,
    /// A request from this widget is already in flight.
    Busy,
}

impl Submission {
    pub fn request(&self) -> Option<&CompletionRequest> {
        match self {
            Submission::Started(request) => Some(request),
            Submission::Blank | Submission::Busy => None,
        }
    }
}
