// src/evaluators/image.rs
//! Photo authenticity signal (max 15). Only scheduled when a photo is attached.

use super::{degraded, within, SignalContext};
use crate::report::ReportInput;
use crate::signal::{Evidence, SignalKind, SignalResult};

const BASE: u32 = 8;
const EXPECTED_SIZE_BONUS: u32 = 4;
const OTHER_SIZE_BONUS: u32 = 1;
/// Reserved for EXIF/metadata validation; granted unconditionally for now.
const METADATA_PLACEHOLDER_BONUS: u32 = 3;

const MIN_EXPECTED_BYTES: u64 = 100 * 1024;
const MAX_EXPECTED_BYTES: u64 = 5 * 1024 * 1024;

pub async fn evaluate(ctx: &SignalContext, report: &ReportInput) -> SignalResult {
    let Some(path) = report.photo() else {
        return SignalResult::new(
            SignalKind::Image,
            0,
            "No photo provided",
            Evidence::untagged(),
        );
    };

    let stat = within(ctx.timeout, async {
        ctx.photos.size_of(path).await.map_err(anyhow::Error::from)
    })
    .await;

    match stat {
        Ok(Some(size)) => score(size),
        Ok(None) => {
            tracing::info!(target: "confidence", "attached photo is not accessible");
            crate::metrics::record_fallback(SignalKind::Image);
            SignalResult::new(
                SignalKind::Image,
                0,
                "Image file not accessible",
                Evidence::untagged(),
            )
        }
        Err(e) => degraded(SignalKind::Image, &e),
    }
}

pub fn score(size_bytes: u64) -> SignalResult {
    let expected = (MIN_EXPECTED_BYTES..=MAX_EXPECTED_BYTES).contains(&size_bytes);
    let score = BASE
        + if expected {
            EXPECTED_SIZE_BONUS
        } else {
            OTHER_SIZE_BONUS
        }
        + METADATA_PLACEHOLDER_BONUS;

    let reason = if expected {
        format!("Photo provided ({} KB, typical camera size)", size_bytes / 1024)
    } else {
        format!("Photo provided ({} KB, unusual size)", size_bytes / 1024)
    };

    let evidence = Evidence::new("image_analysis")
        .with("size_bytes", size_bytes)
        .with("typical_size", expected)
        .with("metadata_validated", false);

    SignalResult::new(SignalKind::Image, score, reason, evidence)
}
