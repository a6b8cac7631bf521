use crate::modules::shifts::adapters::outbound::master_data::EntityKind;
use crate::modules::shifts::adapters::outbound::shift_store::StoreError;
use crate::modules::shifts::core::corrections::CorrectionError;
use crate::modules::shifts::core::shift::ShiftId;
use crate::modules::shifts::core::validate::ValidationReport;
use crate::modules::shifts::use_cases::submit_receipt::persist::DetailStep;
use crate::modules::shifts::use_cases::submit_receipt::resolve::ResolveError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("the extraction could not be interpreted")]
    Unreadable,

    #[error("validation failed: {}", .0.message)]
    Invalid(ValidationReport),

    #[error(transparent)]
    Correction(#[from] CorrectionError),

    #[error("{entity:?} not found for {key}")]
    NotFound { entity: EntityKind, key: String },

    #[error("shift already registered")]
    Duplicate { existing: Option<ShiftId> },

    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error("shift {shift_id} was only partially stored ({failed:?}), rolled back: {rolled_back}")]
    PartiallyStored {
        shift_id: ShiftId,
        failed: Vec<DetailStep>,
        rolled_back: bool,
    },
}

impl From<ResolveError> for SubmissionError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { entity, key } => SubmissionError::NotFound { entity, key },
            ResolveError::Store(err) => SubmissionError::Persistence(err),
        }
    }
}

impl SubmissionError {
    /// Short Swedish message that is safe to show to the person submitting.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Unreadable => {
                "Kvittot kunde inte tolkas. Försök igen med en tydligare bild.".into()
            }
            SubmissionError::Invalid(report) => report.message.clone(),
            SubmissionError::Correction(_) => "Korrigeringen kunde inte tillämpas".into(),
            SubmissionError::NotFound { entity, key } => match entity {
                EntityKind::Company => format!("Företag med org.nr {key} hittades inte"),
                EntityKind::Car => format!("Bil med reg.nr {key} hittades inte"),
                EntityKind::Driver => format!("Förare med ID {key} hittades inte"),
            },
            SubmissionError::Duplicate { .. } => {
                "Ett skift med samma information finns redan registrerat".into()
            }
            SubmissionError::Persistence(_) | SubmissionError::PartiallyStored { .. } => {
                "Ett fel uppstod när skiftet skulle sparas".into()
            }
        }
    }

    /// Fields to highlight for the user, if any.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            SubmissionError::Invalid(report) => report.missing_fields.clone(),
            _ => Vec::new(),
        }
    }
}
