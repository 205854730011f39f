pub mod hierarchy_plot;
pub mod panels;
pub mod plot;
