//! Tabular well-log data and the selection/resolution pipeline.
//!
//! This crate owns everything between a LAS file on disk and a table that is
//! ready to plot:
//!
//! 1. **Read** ([`las::LasFile`]): parse LAS 2.0 text into a [`table::Table`]
//! 2. **Inspect** ([`describe`], [`nullity`]): summary statistics and missing-value patterns
//! 3. **Select** ([`selection::Selection`]): pick the working subset of columns
//! 4. **Resolve** ([`resolve::resolve`]): remove or impute missing values,
//!    producing a [`resolve::ResolvedTable`]
//!
//! Every step returns a new value; the loaded table is never modified.
//!
//! # Example
//!
//! ```
//! use lasview_data::{
//!     resolve::{self, FillStrategy, Imputation, ResolutionPolicy},
//!     selection::Selection,
//!     table::{Column, Table},
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let table = Table::new(vec![
//!     Column::from_values("DEPTH", [1.0, 2.0, 3.0]),
//!     Column::from_values("GR", [100.0, 110.0, f64::NAN]),
//! ])?;
//!
//! let selection = Selection::select(&table, &["GR"])?;
//! let policy = ResolutionPolicy::Impute(Imputation::Global(FillStrategy::Mean));
//! let resolved = resolve::resolve(&table, &selection, &policy)?;
//!
//! assert_eq!(resolved.column("GR").unwrap().values(), &[100.0, 110.0, 105.0]);
//! # Ok(())
//! # }
//! ```

pub mod describe;
pub mod las;
pub mod nullity;
pub mod resolve;
pub mod selection;
pub mod table;
