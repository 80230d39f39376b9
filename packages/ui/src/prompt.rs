use dashboard::Prompt;

/// Confirmations through the browser's `window.confirm` dialog.
///
/// Off the web there is no dialog to show, so every question is declined.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn confirm(&self, message: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!(prompt = message, "no confirmation dialog available, declining");
            false
        }
    }
}
