/// Asks the user to confirm a destructive action before it is sent.
#[allow(async_fn_in_trait)]
pub trait Confirm {
    /// Returns true to go ahead.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way without asking anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = self.0, "auto-confirm");
        self.0
    }
}
