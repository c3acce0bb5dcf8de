//! Chart layer: backend-independent grouped bar layout and the PDF writer.
//!
//! The viewer in `ui::plot` draws the same [`layout::Figure`] with egui_plot.

pub mod layout;
pub mod pdf;

pub use layout::{Axis, BarPanel, Figure, Scale, Series};
