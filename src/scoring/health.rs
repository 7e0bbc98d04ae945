//! Weighted health categories for the integration checker

use serde::{Deserialize, Serialize};

/// Maximum points per health category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthWeights {
    pub availability: u32,
    pub exports: u32,
    pub imports: u32,
    pub signatures: u32,
    pub communication: u32,
}

impl HealthWeights {
    pub const fn total(&self) -> u32 {
        self.availability + self.exports + self.imports + self.signatures + self.communication
    }

    /// Weights must add up to exactly 100 points
    pub const fn is_valid(&self) -> bool {
        self.total() == 100
    }
}

pub const HEALTH_WEIGHTS: HealthWeights = HealthWeights {
    availability: 20,
    exports: 25,
    imports: 25,
    signatures: 15,
    communication: 15,
};

const _: () = assert!(HEALTH_WEIGHTS.is_valid());

/// Fractional score of `passed / total` out of `max`.
///
/// An empty category (`total == 0`) earns the full maximum.
pub fn ratio_score(max: u32, passed: usize, total: usize) -> f64 {
    if total == 0 {
        return max as f64;
    }
    max as f64 * passed.min(total) as f64 / total as f64
}

/// Score for one health category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
    pub max: u32,
    pub passed: usize,
    pub total: usize,
}

impl CategoryScore {
    pub fn new(name: impl Into<String>, max: u32, passed: usize, total: usize) -> Self {
        Self {
            name: name.into(),
            score: ratio_score(max, passed, total),
            max,
            passed,
            total,
        }
    }
}

/// Health band for a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Excellent,
    Good,
    NeedsAttention,
    Critical,
}

impl HealthStatus {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 90 => HealthStatus::Excellent,
            p if p >= 75 => HealthStatus::Good,
            p if p >= 50 => HealthStatus::NeedsAttention,
            _ => HealthStatus::Critical,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "EXCELLENT"),
            HealthStatus::Good => write!(f, "GOOD"),
            HealthStatus::NeedsAttention => write!(f, "NEEDS_ATTENTION"),
            HealthStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}
