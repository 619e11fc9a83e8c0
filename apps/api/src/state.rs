use std::sync::Arc;

use crate::config::Config;
use crate::feedback::FeedbackGenerator;
use crate::resume::structurer::ResumeStructurer;
use crate::roles::RoleCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; read-only afterwards.
    pub catalog: Arc<RoleCatalog>,
    pub structurer: Arc<dyn ResumeStructurer>,
    pub feedback: Arc<dyn FeedbackGenerator>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        config: &Config,
        catalog: RoleCatalog,
        structurer: Arc<dyn ResumeStructurer>,
        feedback: Arc<dyn FeedbackGenerator>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            structurer,
            feedback,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
