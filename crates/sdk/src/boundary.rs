//! Render failure boundary.
//!
//! A one-way latch supervising presentation code:
//!
//! ```text
//! ┌────────┐  failed render  ┌────────┐
//! │ Normal ├─────────────────►│ Failed │──┐
//! └────────┘                 └───▲────┘  │ further renders
//!                                 └───────┘ (no transition back)
//! ```
//!
//! The first unhandled failure inside a guarded render transitions the
//! boundary to `Failed` and captures the failure. While failed, renders
//! are skipped and the caller shows a recovery view instead. The boundary
//! never returns to `Normal`: recovery requires a remount, i.e.
//! constructing a new boundary. Failure detail is exposed only when the
//! diagnostics flag is set (development configurations).

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::config::ClientConfig;

/// Boundary states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryState {
    /// Renders flow through.
    Normal,
    /// A descendant render failed; renders are skipped.
    Failed,
}

/// A captured render failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    /// Human-readable failure message.
    pub message: String,
    /// Optional diagnostic detail (stack context, component info).
    pub detail: Option<String>,
}

impl RenderFailure {
    /// Creates a failure with a message only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), detail: None }
    }

    /// Attaches diagnostic detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builds a failure from a panic payload.
    fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "render panicked".to_owned());
        Self { message, detail: None }
    }
}

/// One-way failure latch for a render subtree.
#[derive(Debug)]
pub struct RenderBoundary {
    diagnostics: bool,
    failure: Option<RenderFailure>,
}

impl RenderBoundary {
    /// Creates a boundary in the `Normal` state.
    ///
    /// `diagnostics` gates whether [`detail`](Self::detail) exposes the
    /// captured failure detail.
    #[must_use]
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics, failure: None }
    }

    /// Creates a boundary whose diagnostics gating follows a
    /// [`ClientConfig`].
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.diagnostics())
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> BoundaryState {
        if self.failure.is_some() { BoundaryState::Failed } else { BoundaryState::Normal }
    }

    /// Runs a render, catching panics.
    ///
    /// Returns `Some(output)` in the `Normal` state when the render
    /// succeeds. The first panic latches the boundary to `Failed`; while
    /// failed, the render closure is not invoked at all and `None` is
    /// returned.
    pub fn render<T>(&mut self, render: impl FnOnce() -> T) -> Option<T> {
        if self.failure.is_some() {
            return None;
        }
        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(output) => Some(output),
            Err(payload) => {
                tracing::warn!("render failed, boundary latched");
                self.failure = Some(RenderFailure::from_panic(payload));
                None
            },
        }
    }

    /// Runs a fallible render.
    ///
    /// Like [`render`](Self::render) but for renders that report failure
    /// as a [`RenderFailure`] value instead of panicking.
    pub fn try_render<T>(
        &mut self,
        render: impl FnOnce() -> Result<T, RenderFailure>,
    ) -> Option<T> {
        if self.failure.is_some() {
            return None;
        }
        match render() {
            Ok(output) => Some(output),
            Err(failure) => {
                tracing::warn!(message = %failure.message, "render failed, boundary latched");
                self.failure = Some(failure);
                None
            },
        }
    }

    /// Returns the captured failure message while failed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    /// Returns the captured diagnostic detail, only when the diagnostics
    /// flag is set.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        if !self.diagnostics {
            return None;
        }
        self.failure.as_ref().and_then(|f| f.detail.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_renders_stay_normal() {
        let mut boundary = RenderBoundary::new(false);
        assert_eq!(boundary.render(|| 42), Some(42));
        assert_eq!(boundary.render(|| 43), Some(43));
        assert_eq!(boundary.state(), BoundaryState::Normal);
    }

    #[test]
    fn panic_latches_exactly_once_and_stays_failed() {
        let mut boundary = RenderBoundary::new(false);
        assert_eq!(boundary.render(|| panic!("boom")), None::<()>);
        assert_eq!(boundary.state(), BoundaryState::Failed);
        assert_eq!(boundary.message(), Some("boom"));

        // Subsequent renders of the same subtree remain failed and the
        // closure is never invoked.
        let mut invoked = false;
        assert_eq!(
            boundary.render(|| {
                invoked = true;
                1
            }),
            None
        );
        assert!(!invoked);
        assert_eq!(boundary.state(), BoundaryState::Failed);
    }

    #[test]
    fn first_failure_wins() {
        let mut boundary = RenderBoundary::new(false);
        let _ = boundary.try_render::<()>(|| Err(RenderFailure::new("first")));
        let _ = boundary.try_render::<()>(|| Err(RenderFailure::new("second")));
        assert_eq!(boundary.message(), Some("first"));
    }

    #[test]
    fn remount_returns_to_normal() {
        let mut boundary = RenderBoundary::new(false);
        let _ = boundary.render::<()>(|| panic!("boom"));
        assert_eq!(boundary.state(), BoundaryState::Failed);

        // No reset API: a remount is a new boundary.
        let boundary = RenderBoundary::new(false);
        assert_eq!(boundary.state(), BoundaryState::Normal);
    }

    #[test]
    fn detail_is_gated_on_diagnostics() {
        let failure = RenderFailure::new("boom").with_detail("at Card::render");

        let mut prod = RenderBoundary::new(false);
        let _ = prod.try_render::<()>(|| Err(failure.clone()));
        assert_eq!(prod.message(), Some("boom"));
        assert_eq!(prod.detail(), None);

        let mut dev = RenderBoundary::new(true);
        let _ = dev.try_render::<()>(|| Err(failure));
        assert_eq!(dev.detail(), Some("at Card::render"));
    }

    #[test]
    fn from_config_gates_detail_on_diagnostics() {
        let failure = RenderFailure::new("boom").with_detail("at Card::render");

        let dev_config = ClientConfig::builder().with_diagnostics(true).build().unwrap();
        let mut dev = RenderBoundary::from_config(&dev_config);
        let _ = dev.try_render::<()>(|| Err(failure.clone()));
        assert_eq!(dev.detail(), Some("at Card::render"));

        let mut prod = RenderBoundary::from_config(&ClientConfig::default());
        let _ = prod.try_render::<()>(|| Err(failure));
        assert_eq!(prod.detail(), None);
    }

    #[test]
    fn string_panic_payloads_are_captured() {
        let mut boundary = RenderBoundary::new(false);
        let _ = boundary.render::<()>(|| panic!("{}", String::from("dynamic failure")));
        assert_eq!(boundary.message(), Some("dynamic failure"));
    }
}
