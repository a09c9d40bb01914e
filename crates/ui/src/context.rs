use std::sync::Arc;

use services::{ContentGateway, QuizOrchestrator};

pub trait UiApp: Send + Sync {
    fn gateway(&self) -> Arc<dyn ContentGateway>;
}

#[derive(Clone)]
pub struct AppContext {
    orchestrator: QuizOrchestrator,
    question_count: usize,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let gateway = app.gateway();
        let question_count = gateway.question_count();
        Self {
            orchestrator: QuizOrchestrator::new(gateway),
            question_count,
        }
    }

    #[must_use]
    pub fn orchestrator(&self) -> QuizOrchestrator {
        self.orchestrator.clone()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
