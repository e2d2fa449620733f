use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::state::manager::AppState;

/// Load application state from a JSON file.
///
/// A missing file yields a fresh, empty state.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<AppState> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "State file not found, starting fresh");
        return Ok(AppState::default());
    }

    let content = fs::read_to_string(path)?;
    let state: AppState = serde_json::from_str(&content)?;
    debug!(
        path = %path.display(),
        plans = state.plans.len(),
        chat = state.chat_history.len(),
        "Loaded state"
    );
    Ok(state)
}

/// Save application state as pretty-printed JSON, replacing the file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &AppState) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "Saved state");
    Ok(())
}
