//! Caller-facing entry point that never fails.
//!
//! [`process_try_on`] is what a UI or CLI calls: it resolves the seed, runs
//! the job, and folds every error into a status message.

use tryon_core::codec::require_image;
use tryon_core::seed::resolve_seed;
use tryon_core::types::{RgbImage, Seed};

use crate::api::TryOnApi;
use crate::client::{KlingClient, TryOnError, SUCCESS_MESSAGE};

/// Everything a caller needs to render the result of one invocation.
#[derive(Debug, Clone)]
pub struct TryOnOutcome {
    /// Result image; `None` on any failure.
    pub image: Option<RgbImage>,
    /// Seed actually submitted (or the caller's seed if nothing was sent).
    pub seed: Seed,
    /// Human-readable status line.
    pub message: String,
}

impl TryOnOutcome {
    pub fn is_success(&self) -> bool {
        self.image.is_some()
    }
}

/// Run a try-on and report the outcome.
///
/// If either image is missing or empty the caller's seed is returned unchanged and
/// no request is made. Otherwise the seed is randomized when asked and the
/// job is run; errors become the outcome message.
pub async fn process_try_on<A: TryOnApi>(
    client: &KlingClient<A>,
    person: Option<&RgbImage>,
    garment: Option<&RgbImage>,
    seed: Seed,
    randomize: bool,
) -> TryOnOutcome {
    if require_image(person, "person").is_err() || require_image(garment, "garment").is_err() {
        return TryOnOutcome {
            image: None,
            seed,
            message: "Empty image".to_string(),
        };
    }

    let seed = resolve_seed(seed, randomize);

    match client.try_on(person, garment, seed).await {
        Ok(image) => TryOnOutcome {
            image: Some(image),
            seed,
            message: SUCCESS_MESSAGE.to_string(),
        },
        Err(e) => {
            if !matches!(e, TryOnError::TimedOut | TryOnError::TookTooLong) {
                tracing::error!(seed, error = %e, "Error in try-on");
            }
            TryOnOutcome {
                image: None,
                seed,
                message: e.user_message(),
            }
        }
    }
}
