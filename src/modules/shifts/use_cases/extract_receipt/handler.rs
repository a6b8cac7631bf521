use crate::modules::shifts::core::normalize::{Normalization, normalize_model_text};
use crate::modules::shifts::core::record::ShiftDefaults;
use crate::shared::infrastructure::vision::{ReceiptImage, VisionEngine, VisionError};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::info;

/// Reads a receipt image into a normalized record for review. Stores nothing.
pub struct ExtractReceiptHandler {
    engine: Arc<dyn VisionEngine>,
}

impl ExtractReceiptHandler {
    pub fn new(engine: Arc<dyn VisionEngine>) -> Self {
        Self { engine }
    }

    pub async fn handle(
        &self,
        image: ReceiptImage,
        received_at: NaiveDateTime,
    ) -> Result<Normalization, VisionError> {
        let text = self.engine.read_receipt(&image).await?;
        let normalization = normalize_model_text(&text, &ShiftDefaults::at(received_at));
        info!(
            mime_type = image.mime_type(),
            report = ?normalization.report,
            "receipt extracted"
        );
        Ok(normalization)
    }
}
