//! Application state module

use std::{fmt, sync::Arc};

use crate::domain::receipts::ReceiptService;

/// Global application state
#[derive(Clone)]
pub struct AppState<R: ReceiptService> {
    /// Receipt service
    pub receipts: Arc<R>,
}

/// Implementation of the application state
impl<R> AppState<R>
where
    R: ReceiptService,
{
    /// Create a new application state
    pub fn new(receipts: R) -> Self {
        Self {
            receipts: Arc::new(receipts),
        }
    }
}

impl<R> fmt::Debug for AppState<R>
where
    R: ReceiptService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("receipts", &"ReceiptService")
            .finish()
    }
}
