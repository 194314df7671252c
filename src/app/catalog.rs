//! Per-operation validation schemas for the PulsarTrack API.
//!
//! One schema per operation, built once when the host wires its router and
//! shared read-only by the middleware for every invocation.

use crate::domain::{FieldRule, ValidationSchema};

/// `POST /api/campaigns`
#[must_use]
pub fn create_campaign() -> ValidationSchema {
    ValidationSchema::new()
        .body(
            "name",
            FieldRule::text().required().min_length(3).max_length(120),
        )
        .body("advertiser", FieldRule::stellar_address().required())
        .body(
            "budget_stroops",
            FieldRule::number().required().integer().min(1.0),
        )
        .body("cpi_stroops", FieldRule::number().integer().min(1.0))
}

/// `GET /api/campaigns/{id}`
#[must_use]
pub fn get_campaign() -> ValidationSchema {
    ValidationSchema::new().param("id", FieldRule::number().required().integer().min(1.0))
}

/// `GET /api/campaigns`
#[must_use]
pub fn list_campaigns() -> ValidationSchema {
    ValidationSchema::new()
        .query("limit", FieldRule::number().integer().min(1.0).max(100.0))
        .query("advertiser", FieldRule::stellar_address())
}

/// `POST /api/auctions/{auction_id}/bids`
#[must_use]
pub fn place_bid() -> ValidationSchema {
    ValidationSchema::new()
        .param(
            "auction_id",
            FieldRule::number().required().integer().min(1.0),
        )
        .body("bidder", FieldRule::stellar_address().required())
        .body(
            "amount_stroops",
            FieldRule::number().required().integer().min(1.0),
        )
}

/// `POST /api/impressions`
#[must_use]
pub fn record_impression() -> ValidationSchema {
    ValidationSchema::new()
        .body(
            "campaign_id",
            FieldRule::number().required().integer().min(1.0),
        )
        .body("publisher", FieldRule::stellar_address().required())
        .body("count", FieldRule::number().integer().min(1.0))
}
