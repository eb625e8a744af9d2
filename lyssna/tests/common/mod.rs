use lyssna::{BoxError, Callback, Event};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Callbacks
// ============================================================================

/// Records its id into a shared list when invoked.
pub struct OrderCallback {
    pub id: usize,
    pub order: Arc<Mutex<Vec<usize>>>,
}

impl Callback for OrderCallback {
    fn invoke(&self, _event: &mut Event) -> Result<(), BoxError> {
        self.order.lock().unwrap().push(self.id);
        Ok(())
    }
}
