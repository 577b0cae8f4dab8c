use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Receiver of human-readable operation reports.
pub trait MessageSink: Send + Sync {
    fn add(&self, message: String);
}

/// Buffering sink that a UI (or the CLI) drains and clears.
#[derive(Clone, Debug, Default)]
pub struct MessageService {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MessageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageSink for MessageService {
    fn add(&self, message: String) {
        self.lock().push(message);
    }
}
