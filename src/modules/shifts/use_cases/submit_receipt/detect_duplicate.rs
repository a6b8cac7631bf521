use crate::modules::shifts::adapters::outbound::shift_store::{ShiftStore, StoreError};
use crate::modules::shifts::core::shift::CompositeDuplicateKey;
use tracing::{debug, warn};

/// True when a shift with exactly this key is already stored.
///
/// Lookup failures propagate; they never count as "not a duplicate".
pub async fn is_duplicate(
    store: &impl ShiftStore,
    key: &CompositeDuplicateKey,
) -> Result<bool, StoreError> {
    let exists = store.exists(key).await?;
    if exists {
        warn!(
            car_id = %key.car_id,
            driver_id = %key.driver_id,
            report_nr = %key.report_nr,
            "shift already registered"
        );
    } else {
        debug!(report_nr = %key.report_nr, "no duplicate shift");
    }
    Ok(exists)
}
