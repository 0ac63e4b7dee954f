//! Output module for the tabular report and the length-distribution chart
//!
//! This module handles:
//! - Writing extracted rows to a CSV file in fetch order
//! - Rendering the length-distribution chart to a PNG image

mod chart;
mod table;

pub use chart::{compose_chart_svg, render_length_chart};
pub use table::{read_csv, write_csv};
