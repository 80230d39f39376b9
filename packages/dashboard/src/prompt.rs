/// Blocking yes/no confirmation, `window.confirm` in the browser.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Ask `prompt` and turn a "no" into [`ActionError::Declined`](crate::ActionError::Declined).
pub(crate) fn require<P: Prompt>(prompt: &P, message: &str) -> Result<(), crate::ActionError> {
    if prompt.confirm(message) {
        Ok(())
    } else {
        tracing::debug!(prompt = message, "confirmation declined");
        Err(crate::ActionError::Declined)
    }
}
