pub mod http;
pub mod prompt;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageProblem {
    #[error("image is empty")]
    Empty,

    #[error("image is {0} bytes, above the limit")]
    TooLarge(usize),

    #[error("unsupported image type {0}")]
    UnsupportedType(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VisionError {
    #[error("invalid image: {0}")]
    InvalidImage(#[from] ImageProblem),

    #[error("access to the vision engine was denied")]
    AccessDenied,

    #[error("the vision engine did not answer in time")]
    Timeout,

    #[error("the vision engine is rate limiting requests")]
    RateLimited,

    #[error("vision engine answered {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl VisionError {
    /// Only throttling and timeouts are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, VisionError::RateLimited | VisionError::Timeout)
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            VisionError::InvalidImage(ImageProblem::TooLarge(_)) => {
                "Filen är för stor. Maximal storlek är 10MB."
            }
            VisionError::InvalidImage(ImageProblem::UnsupportedType(_)) => {
                "Ogiltigt filformat. Endast JPEG, PNG och WebP stöds."
            }
            VisionError::InvalidImage(ImageProblem::Empty) => "Ingen bild skickades.",
            VisionError::AccessDenied => {
                "API-åtkomst nekad. Kontrollera API-nyckeln och behörigheter."
            }
            VisionError::Timeout => "Förfrågan tog för lång tid. Försök igen.",
            VisionError::RateLimited => "För många förfrågningar. Vänta en stund och försök igen.",
            VisionError::Upstream { .. } | VisionError::Transport(_) => {
                "Kvittot kunde inte läsas just nu. Försök igen senare."
            }
        }
    }
}

/// A receipt photo, base64 encoded, that passed the size and type checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    mime_type: String,
    base64: String,
}

impl ReceiptImage {
    pub const MAX_BYTES: usize = 10 * 1024 * 1024;
    pub const ALLOWED_TYPES: [&'static str; 3] = ["image/jpeg", "image/png", "image/webp"];

    /// Accepts raw base64 or a `data:` URL.
    pub fn from_base64(mime_type: &str, data: &str) -> Result<Self, ImageProblem> {
        let mime_type = mime_type.trim().to_lowercase();
        if !Self::ALLOWED_TYPES.contains(&mime_type.as_str()) {
            return Err(ImageProblem::UnsupportedType(mime_type));
        }
        let base64 = data
            .split_once(";base64,")
            .map_or(data, |(_, payload)| payload)
            .trim();
        if base64.is_empty() {
            return Err(ImageProblem::Empty);
        }
        let size = decoded_len(base64);
        if size > Self::MAX_BYTES {
            return Err(ImageProblem::TooLarge(size));
        }
        Ok(Self {
            mime_type,
            base64: base64.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

fn decoded_len(base64: &str) -> usize {
    let padding = base64.bytes().rev().take_while(|b| *b == b'=').count();
    (base64.len() / 4 * 3).saturating_sub(padding)
}

/// Reads a receipt image and answers with the model's free-form text.
#[async_trait]
pub trait VisionEngine: Send + Sync {
    async fn read_receipt(&self, image: &ReceiptImage) -> Result<String, VisionError>;
}
