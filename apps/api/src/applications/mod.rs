// Hiring pipeline after a seeker applies: status changes, shortlists and offers.

pub mod handlers;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::offer::{OfferRow, OfferStatus};

/// Only pending offers can be answered or withdrawn.
pub fn ensure_pending(offer: &OfferRow) -> Result<(), AppError> {
    if offer.status == OfferStatus::Pending.as_str() {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Offer {} is already {}",
            offer.id, offer.status
        )))
    }
}

/// Maps a guarded offer write that matched no row to a conflict: another
/// request changed the offer between the read and the write.
pub fn changed_concurrently(
    written: Option<OfferRow>,
    offer_id: Uuid,
) -> Result<OfferRow, AppError> {
    written.ok_or_else(|| AppError::Conflict(format!("Offer {offer_id} is no longer pending")))
}
