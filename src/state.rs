//! Shared application state for all routes.

use crate::store::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Bound once at startup; handlers only see the contract.
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        AppState { storage }
    }
}
