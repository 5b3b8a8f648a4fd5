//! Size recommendation heuristic.
//!
//! A simple BMI-banded mapping from body measurements to a starting suit
//! size and fit drop. Either input missing means no recommendation, never a
//! computed value over fallback zeros.

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Fit drop band derived from BMI.
pub enum FitDrop {
    /// BMI under 20.
    Slim,
    /// BMI 20 to 26.
    Regular,
    /// BMI over 26.
    Comfort,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Suggested starting point for made-to-measure adjustments.
pub struct SizeRecommendation {
    /// European suit size (even sizes).
    pub size: u32,
    /// Fit drop band.
    pub drop: FitDrop,
    /// Body mass index the recommendation was derived from.
    pub bmi: f64,
}

/// Recommend a size from height (cm) and weight (kg).
///
/// Returns `None` when either input is absent or not a positive finite
/// number.
pub fn recommend_size(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<SizeRecommendation> {
    let height = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;

    let meters = height / 100.0;
    let bmi = weight / (meters * meters);

    let drop = if bmi < 20.0 {
        FitDrop::Slim
    } else if bmi <= 26.0 {
        FitDrop::Regular
    } else {
        FitDrop::Comfort
    };

    // EU size approximates half the chest circumference; chest tracks height
    // with a BMI correction. Rounded to the nearest even size.
    let raw = height * 0.26 + (bmi - 22.0) * 0.75;
    let size = ((raw / 2.0).round() as i64 * 2).clamp(40, 70) as u32;

    Some(SizeRecommendation { size, drop, bmi })
}

#[cfg(test)]
#[path = "../../tests/unit/measure/recommend.rs"]
mod tests;
