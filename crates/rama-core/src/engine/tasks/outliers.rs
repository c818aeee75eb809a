use crate::core::models::angles::{AngleRecord, DatasetAngleRecord, OutlierFlags};
use tracing::{debug, instrument};

const IQR_FENCE: f64 = 1.5;

/// Tukey fences for one angle column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Whether `value` lies within the fences, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Computes quartiles by linear interpolation and the 1.5 IQR fences.
///
/// Returns `None` for an empty slice. NaN values are ignored.
pub fn iqr_bounds(values: &[f64]) -> Option<IqrBounds> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    Some(IqrBounds {
        q1,
        q3,
        iqr,
        lower: q1 - IQR_FENCE * iqr,
        upper: q3 + IQR_FENCE * iqr,
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (position - lo as f64)
}

/// Flags phi and psi outliers, one entry per input record.
///
/// Each column gets its own fences computed over the records where that
/// angle is present. Absent angles are never flagged.
#[instrument(skip_all, name = "outlier_detection")]
pub fn detect_outliers_by_iqr(records: &[AngleRecord]) -> Vec<OutlierFlags> {
    flag_columns(records.iter().map(|r| (r.phi, r.psi)).collect())
}

/// Same as [`detect_outliers_by_iqr`] over a multi-structure dataset.
#[instrument(skip_all, name = "outlier_detection")]
pub fn detect_dataset_outliers(records: &[DatasetAngleRecord]) -> Vec<OutlierFlags> {
    flag_columns(
        records
            .iter()
            .map(|r| (r.angles.phi, r.angles.psi))
            .collect(),
    )
}

fn flag_columns(columns: Vec<(Option<f64>, Option<f64>)>) -> Vec<OutlierFlags> {
    let phi_values: Vec<f64> = columns.iter().filter_map(|(phi, _)| *phi).collect();
    let psi_values: Vec<f64> = columns.iter().filter_map(|(_, psi)| *psi).collect();
    let phi_bounds = iqr_bounds(&phi_values);
    let psi_bounds = iqr_bounds(&psi_values);

    let is_outside = |bounds: Option<IqrBounds>, value: Option<f64>| match (bounds, value) {
        (Some(b), Some(v)) => !b.contains(v),
        _ => false,
    };

    let flags: Vec<OutlierFlags> = columns
        .iter()
        .map(|&(phi, psi)| {
            let phi_is_outlier = is_outside(phi_bounds, phi);
            let psi_is_outlier = is_outside(psi_bounds, psi);
            OutlierFlags {
                phi_is_outlier,
                psi_is_outlier,
                is_outlier: phi_is_outlier || psi_is_outlier,
            }
        })
        .collect();

    debug!(
        rows = flags.len(),
        outliers = flags.iter().filter(|f| f.is_outlier).count(),
        ?phi_bounds,
        ?psi_bounds,
        "Outlier flags computed."
    );
    flags
}
