use crate::shared::infrastructure::vision::{ReceiptImage, VisionEngine, VisionError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers every call with the same text or error.
pub struct CannedVisionEngine {
    reply: Result<String, VisionError>,
    calls: AtomicUsize,
}

impl CannedVisionEngine {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: VisionError) -> Self {
        Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionEngine for CannedVisionEngine {
    async fn read_receipt(&self, _image: &ReceiptImage) -> Result<String, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}
