use crate::percentiles;

/// Default whisker reach, in multiples of the interquartile range.
pub const DEFAULT_WHISKER_COEF: f64 = 1.5;

/// Box-and-whisker summary of a dataset.
///
/// Quartiles are linearly interpolated. Whiskers extend to the most extreme
/// data points still inside the Tukey fences `Q1 - coef * IQR` and
/// `Q3 + coef * IQR`; every point outside the fences is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    /// Smallest value in the dataset (may be an outlier).
    pub min: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Largest value in the dataset (may be an outlier).
    pub max: f64,
    /// Lowest data point inside the lower fence.
    pub whisker_low: f64,
    /// Highest data point inside the upper fence.
    pub whisker_high: f64,
    /// Data points outside the fences, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Computes a box summary from unsorted values.
    ///
    /// Returns `None` for an empty dataset.
    #[must_use]
    pub fn new<I>(values: I, coef: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, coef)
    }

    /// Computes a box summary from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], coef: f64) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let q1 = percentiles::compute_percentile(sorted_values, 25.0);
        let median = percentiles::compute_percentile(sorted_values, 50.0);
        let q3 = percentiles::compute_percentile(sorted_values, 75.0);

        let iqr = q3 - q1;
        let lower_fence = q1 - coef * iqr;
        let upper_fence = q3 + coef * iqr;

        // The box itself always lies inside the fences, so both searches succeed
        // for non-empty input.
        let whisker_low = sorted_values
            .iter()
            .copied()
            .find(|v| *v >= lower_fence)
            .unwrap_or(q1);
        let whisker_high = sorted_values
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= upper_fence)
            .unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| *v < lower_fence || *v > upper_fence)
            .collect();

        Some(Self {
            min,
            q1,
            median,
            q3,
            max,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Interquartile range (`Q3 - Q1`).
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}
