pub mod balance;
pub mod place;

pub use balance::{balance, SideAssignment, LEFT_ANCHORED};
pub use place::{layout_by_type, layout_grouped, PlacedPin, Side, SymbolLayout};
