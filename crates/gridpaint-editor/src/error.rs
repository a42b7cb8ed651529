use gridpaint_data::DataLoadError;

/// Errors from setting up the editor.
///
/// Gestures on a live preview never fail; their outcome is reported through
/// [`crate::commit::CommitOutcome`] instead.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("unknown prototype '{0}'")]
    UnknownPrototype(String),
    #[error(transparent)]
    Data(#[from] DataLoadError),
}
