//! Comparative bar-chart reports for column generation benchmark results.
//!
//! Each report reads a `;`-separated results table, keeps the instances that
//! were solved, and draws the two compared variants side by side as grouped
//! bars (generated columns, execution time) into a PDF.

pub mod app;
pub mod chart;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod state;
pub mod ui;
