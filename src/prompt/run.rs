use thiserror::Error;

/// Why a selection capability could not produce an index.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("aborted by user")]
    Aborted,
    #[error("no items to select from")]
    NoItems,
    #[error("selector was already run")]
    Consumed,
    #[error("could not hand picker state to the terminal program")]
    Handoff,
    #[error("{0}")]
    Program(String),
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt failed: {0}")]
    Failed(#[source] SelectError),
}

/// Something that lets the user pick one of a list of items and reports its
/// zero-based position. The terminal widget implements this; tests plug in
/// stubs returning a fixed index or failure.
pub trait Select {
    fn select(&mut self) -> Result<usize, SelectError>;
}

/// Outcome of one prompt run. `index` is -1 whenever `error` is set.
#[derive(Debug)]
pub struct Selection {
    pub index: isize,
    pub error: Option<PromptError>,
}

impl Selection {
    pub fn into_result(self) -> Result<usize, PromptError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.index as usize),
        }
    }
}

/// Runs `prompt` and returns the position of the selected item.
pub fn terminal<S: Select + ?Sized>(prompt: &mut S) -> Selection {
    match prompt.select() {
        Ok(pos) => {
            tracing::debug!(index = pos, "selection made");
            Selection {
                index: pos as isize,
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "prompt failed");
            Selection {
                index: -1,
                error: Some(PromptError::Failed(err)),
            }
        }
    }
}
