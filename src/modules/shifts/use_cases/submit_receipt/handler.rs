use crate::modules::shifts::adapters::outbound::master_data::MasterDataLookup;
use crate::modules::shifts::adapters::outbound::shift_store::ShiftStore;
use crate::modules::shifts::core::corrections::apply_corrections;
use crate::modules::shifts::core::normalize::{Normalization, NormalizationReport, normalize};
use crate::modules::shifts::core::record::ShiftDefaults;
use crate::modules::shifts::core::shift::{CompositeDuplicateKey, ShiftRecord};
use crate::modules::shifts::core::validate::{ValidationRules, validate};
use crate::modules::shifts::use_cases::submit_receipt::command::SubmitReceipt;
use crate::modules::shifts::use_cases::submit_receipt::detect_duplicate::is_duplicate;
use crate::modules::shifts::use_cases::submit_receipt::errors::SubmissionError;
use crate::modules::shifts::use_cases::submit_receipt::persist::{PersistOutcome, persist_shift};
use crate::modules::shifts::use_cases::submit_receipt::resolve::resolve_references;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Refuse extractions that are not even a JSON object.
    pub reject_uninterpretable: bool,
    pub rules: ValidationRules,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reject_uninterpretable: true,
            rules: ValidationRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedShift {
    pub shift: ShiftRecord,
    pub report: NormalizationReport,
}

pub struct SubmitReceiptHandler<TLookup, TStore>
where
    TLookup: MasterDataLookup + 'static,
    TStore: ShiftStore + 'static,
{
    config: PipelineConfig,
    lookup: Arc<TLookup>,
    store: Arc<TStore>,
}

impl<TLookup, TStore> SubmitReceiptHandler<TLookup, TStore>
where
    TLookup: MasterDataLookup + 'static,
    TStore: ShiftStore + 'static,
{
    pub fn new(config: PipelineConfig, lookup: Arc<TLookup>, store: Arc<TStore>) -> Self {
        Self {
            config,
            lookup,
            store,
        }
    }

    pub async fn handle(&self, command: SubmitReceipt) -> Result<SubmittedShift, SubmissionError> {
        let defaults = ShiftDefaults::at(command.received_at);
        let Normalization { mut record, report } = normalize(&command.extraction, &defaults);

        if report == NormalizationReport::Uninterpretable {
            if self.config.reject_uninterpretable {
                warn!("rejecting uninterpretable extraction");
                return Err(SubmissionError::Unreadable);
            }
            warn!("uninterpretable extraction, continuing with the default template");
        }

        apply_corrections(&mut record, &command.corrections)?;

        let validation = validate(&mut record, &self.config.rules);
        if !validation.is_valid {
            return Err(SubmissionError::Invalid(validation));
        }

        let refs = resolve_references(&*self.lookup, &record).await?;

        let key = CompositeDuplicateKey::for_record(&record, &refs);
        if is_duplicate(&*self.store, &key).await? {
            return Err(SubmissionError::Duplicate { existing: None });
        }

        match persist_shift(&*self.store, &record, &refs).await? {
            PersistOutcome::Committed(shift) => {
                info!(shift_id = %shift.id, report_nr = %record.report_nr, "receipt submitted");
                Ok(SubmittedShift { shift, report })
            }
            PersistOutcome::Conflict(existing) => Err(SubmissionError::Duplicate {
                existing: Some(existing),
            }),
            PersistOutcome::PartiallyFailed {
                shift_id,
                failed,
                rolled_back,
            } => Err(SubmissionError::PartiallyStored {
                shift_id,
                failed,
                rolled_back,
            }),
        }
    }
}
