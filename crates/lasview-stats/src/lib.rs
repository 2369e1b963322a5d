//! Statistical utilities for the lasview project.
//!
//! This crate provides the small set of numeric summaries the log explorer needs:
//!
//! - **Descriptive statistics**: count, mean, median, variance, standard deviation
//! - **Percentiles**: linearly interpolated quantiles of a dataset
//! - **Box summaries**: quartiles, whiskers and outliers for box-and-whisker plots
//!
//! All functions operate on `f64` values that are already known to be present;
//! callers filter out missing entries before handing values over.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`boxplot`]: Five-number summaries with Tukey fences
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use lasview_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use lasview_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! assert_eq!(percentiles.get(25.0), Some(2.0));
//! ```
//!
//! ## Summarizing a box plot
//!
//! ```
//! use lasview_stats::boxplot::BoxSummary;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
//! let summary = BoxSummary::new(values, 1.5).unwrap();
//! assert_eq!(summary.outliers, vec![100.0]);
//! assert_eq!(summary.whisker_high, 5.0);
//! ```

pub mod boxplot;
pub mod descriptive;
pub mod percentiles;
