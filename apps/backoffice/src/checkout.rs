//! # Checkout Orchestration
//!
//! Turns an accumulation into a persisted header plus detail rows.
//!
//! ## Write Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    persist_checkout(accumulation, ..)                   │
//! │                                                                         │
//! │  empty? ──────────────────────► Rejected(EmptyAccumulation)            │
//! │     │                            (nothing written)                      │
//! │     ▼                                                                   │
//! │  write_header(total) ── Err ──► HeaderWrite                            │
//! │     │                            (nothing written, cart kept)           │
//! │     │ Ok(header)                                                        │
//! │     ▼                                                                   │
//! │  write_details(to_detail_rows(header.id)) ── Err ──► DetailWrite       │
//! │     │                            (header stays, no rollback, no retry)  │
//! │     │ Ok                                                                │
//! │     ▼                                                                   │
//! │  CheckoutReceipt { header, details }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The accumulation is only borrowed, so it survives every failure.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::error::ApiResult;
use crate::state::AppConfig;
use joshub_core::{Accumulation, CheckoutKind, CoreError, DetailRow, EntryForm, Header, Money};
use joshub_db::{DbError, DbResult};

// =============================================================================
// Errors
// =============================================================================

/// Which step of a checkout failed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Refused before any write.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The header write failed; nothing was persisted.
    #[error("Could not save the {kind} header: {source}")]
    HeaderWrite {
        kind: CheckoutKind,
        #[source]
        source: DbError,
    },

    /// The header is persisted under `header_id` but its detail rows are
    /// not.
    #[error("The {kind} #{header_id} was saved but its detail rows were not: {source}")]
    DetailWrite {
        kind: CheckoutKind,
        header_id: i64,
        #[source]
        source: DbError,
    },
}

// =============================================================================
// Receipt
// =============================================================================

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt<H> {
    pub header: H,
    pub details: Vec<DetailRow>,
}

// =============================================================================
// Orchestration
// =============================================================================

/// Writes the header, then all detail rows tagged with its id.
///
/// `write_header` receives the accumulation total; `write_details`
/// receives the rows for one batch insert.
pub async fn persist_checkout<H, WH, HF, WD, DF>(
    accumulation: &Accumulation,
    write_header: WH,
    write_details: WD,
) -> Result<CheckoutReceipt<H>, CheckoutError>
where
    H: Header,
    WH: FnOnce(Money) -> HF,
    HF: Future<Output = DbResult<H>>,
    WD: FnOnce(Vec<DetailRow>) -> DF,
    DF: Future<Output = DbResult<u64>>,
{
    let kind = accumulation.kind();

    if accumulation.is_empty() {
        return Err(CoreError::EmptyAccumulation {
            kind: kind.to_string(),
        }
        .into());
    }

    let total = accumulation.total();
    debug!(%kind, lines = accumulation.len(), total_cents = total.cents(), "Writing checkout header");

    let header = write_header(total).await.map_err(|source| {
        warn!(%kind, error = %source, "Checkout header write failed");
        CheckoutError::HeaderWrite { kind, source }
    })?;

    let header_id = header.id();
    let details = accumulation.to_detail_rows(header_id);

    write_details(details.clone()).await.map_err(|source| {
        error!(%kind, header_id, error = %source, "Checkout detail write failed; header left without lines");
        CheckoutError::DetailWrite {
            kind,
            header_id,
            source,
        }
    })?;

    info!(%kind, header_id, lines = details.len(), total_cents = total.cents(), "Checkout saved");

    Ok(CheckoutReceipt { header, details })
}

// =============================================================================
// Entry Form & Summary Table
// =============================================================================

/// Validates an entry form and folds it into the accumulation.
///
/// On error the accumulation is unchanged.
pub fn add_entry(accumulation: &mut Accumulation, form: EntryForm) -> ApiResult<()> {
    let kind = accumulation.kind();
    let item = form.into_line_item(kind)?;

    debug!(%kind, code = %item.product_code(), quantity = item.quantity, "Adding line");

    let current = std::mem::replace(accumulation, Accumulation::new(kind));
    *accumulation = current.add_or_merge(item);
    Ok(())
}

/// One formatted row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub unit_price: String,
    pub line_total: String,
}

/// The summary table under the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub kind: CheckoutKind,
    pub lines: Vec<SummaryRow>,
    pub total_cents: i64,
    pub total: String,
}

pub fn summarize(config: &AppConfig, accumulation: &Accumulation) -> CheckoutSummary {
    let total = accumulation.total();

    CheckoutSummary {
        kind: accumulation.kind(),
        lines: accumulation
            .summary()
            .into_iter()
            .map(|line| SummaryRow {
                unit_price: config.format_currency(line.unit_price_cents),
                line_total: config.format_currency(line.line_total_cents),
                code: line.product_code,
                name: line.name,
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
                line_total_cents: line.line_total_cents,
            })
            .collect(),
        total_cents: total.cents(),
        total: config.format_currency(total.cents()),
    }
}
