//! egui frontend: toolbar and menus, the log-log plot, and the band table.

pub mod panels;
pub mod plot;
pub mod table;
