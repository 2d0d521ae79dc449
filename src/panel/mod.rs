//! panel — validated input container for single-treated-unit designs.
//!
//! [`PanelData`] owns the treated series, the control panel and the
//! immutable `(T0, T1)` split. Every inference entry point builds one
//! first, so downstream code can rely on consistent shapes and finite
//! values.

pub mod data;

pub use self::data::PanelData;
