//! Navigation seam: the router is owned by the presentation layer.

/// What: Side-effecting navigation trigger.
///
/// Details:
/// - Invoked by the controller loop with the path derived by a filter operation
///   (`/area/Italian`, `/category/Beef`, `/ingredients/chicken`, `/`).
/// - Any `FnMut(&str)` closure is a navigator.
pub trait Navigator: Send + 'static {
    /// Move the presentation layer to `path`.
    fn navigate(&mut self, path: &str);
}

impl<F> Navigator for F
where
    F: FnMut(&str) + Send + 'static,
{
    fn navigate(&mut self, path: &str) {
        self(path);
    }
}

/// Navigator that ignores every path, for headless embedders.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&mut self, path: &str) {
        tracing::trace!(path, "[Nav] Ignored navigation");
    }
}
