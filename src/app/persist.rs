use crate::state::DisplayMode;
use crate::store::PersistentStore;

/// What: Read the display mode persisted under `nightMode`.
///
/// Inputs:
/// - `store`: Device store
///
/// Output:
/// - The stored mode, or [`DisplayMode::default`] when absent or invalid.
///
/// Details:
/// - Invalid values are logged and left in place; the next toggle overwrites them.
pub fn load_display_mode<P: PersistentStore + ?Sized>(store: &P) -> DisplayMode {
    let Some(raw) = store.get(DisplayMode::STORE_KEY) else {
        return DisplayMode::default();
    };
    DisplayMode::from_stored(&raw).unwrap_or_else(|| {
        tracing::warn!(
            key = DisplayMode::STORE_KEY,
            value = %raw,
            "[Persist] Invalid display mode; using default"
        );
        DisplayMode::default()
    })
}

/// What: Persist `mode` under `nightMode`.
///
/// Output:
/// - Writes `"0"`/`"1"`; failures are logged, not propagated.
pub fn save_display_mode<P: PersistentStore + ?Sized>(store: &P, mode: DisplayMode) {
    match store.set(DisplayMode::STORE_KEY, mode.as_stored()) {
        Ok(()) => tracing::debug!(mode = ?mode, "[Persist] Display mode persisted"),
        Err(e) => tracing::warn!(
            error = %e,
            "[Persist] Failed to write display mode"
        ),
    }
}
