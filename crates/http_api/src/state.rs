use rand::RngCore;

use app_api::AppContext;

/// Shared router state: the app context plus the per-run API token every
/// /api request must present.
#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    csrf_token: String,
}

impl HttpState {
    /// Creates state with a freshly generated token. Restarting the server
    /// invalidates any client still holding the old one.
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            csrf_token: fresh_token(),
        }
    }

    /// Creates state with a caller-supplied token.
    pub fn with_token(context: AppContext, csrf_token: String) -> Self {
        Self {
            context,
            csrf_token,
        }
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

pub(crate) fn fresh_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
