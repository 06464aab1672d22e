pub mod cell;
pub mod chart;
pub mod hover;
pub mod table;

pub use cell::*;
pub use chart::*;
pub use hover::*;
pub use table::*;
