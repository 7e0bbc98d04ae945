//! Scoring for validation reports and integration health
//!
//! Both scores are pure functions of counts collected elsewhere, so a
//! re-run over identical input always yields identical numbers.
//!
//! # Validation Score
//!
//! ```text
//! score = 100
//!       - 15 * errors
//!       - 5  * warnings
//!       + min(20, 2 * builtin_usage)
//!       - max(0, complexity - 15) * 2
//!       - floor(max(0, calculations - 300) / 50) * 5
//! score = clamp(score, 0, 100)
//! ```
//!
//! A missing file is one error with zero metrics, so it scores 85. An empty
//! file fails both the version and the declaration check and scores 70.
//!
//! # Health Score
//!
//! Five weighted categories, maxima summing to 100:
//!
//! | Category                   | Max |
//! |----------------------------|-----|
//! | Script availability        | 20  |
//! | Export validity            | 25  |
//! | Import resolution          | 25  |
//! | Signature integrity        | 15  |
//! | Cross-script communication | 15  |
//!
//! Each category scores `max * passed / total`; a category with nothing to
//! check scores its maximum.

mod health;

pub use health::{ratio_score, CategoryScore, HealthStatus, HealthWeights, HEALTH_WEIGHTS};

use crate::models::ScriptMetrics;

const ERROR_PENALTY: i64 = 15;
const WARNING_PENALTY: i64 = 5;
const BUILTIN_BONUS_PER_USE: i64 = 2;
const MAX_BUILTIN_BONUS: i64 = 20;
const COMPLEXITY_ALLOWANCE: i64 = 15;
const COMPLEXITY_PENALTY: i64 = 2;
const CALCULATION_ALLOWANCE: i64 = 300;
const CALCULATION_STEP: i64 = 50;
const CALCULATION_STEP_PENALTY: i64 = 5;

/// Score one script from its issue counts and metrics
pub fn validation_score(errors: usize, warnings: usize, metrics: &ScriptMetrics) -> u32 {
    let errors = errors as i64;
    let warnings = warnings as i64;
    let builtins = metrics.builtin_usage as i64;
    let complexity = metrics.complexity as i64;
    let calculations = metrics.calculations as i64;

    let score = 100 - ERROR_PENALTY * errors - WARNING_PENALTY * warnings
        + (BUILTIN_BONUS_PER_USE * builtins).min(MAX_BUILTIN_BONUS)
        - (complexity - COMPLEXITY_ALLOWANCE).max(0) * COMPLEXITY_PENALTY
        - ((calculations - CALCULATION_ALLOWANCE).max(0) / CALCULATION_STEP)
            * CALCULATION_STEP_PENALTY;

    score.clamp(0, 100) as u32
}

/// Rounded mean of per-script scores; 0 for an empty batch
pub fn overall_score(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u64 = scores.iter().map(|&s| s as u64).sum();
    (sum as f64 / scores.len() as f64).round() as u32
}
