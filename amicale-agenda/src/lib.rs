mod agenda;
pub mod codec;
pub mod dashboard;
mod structs;

#[cfg(feature = "ics")]
mod ics;

pub use agenda::{build_agenda, generate_empty_agenda, DayRange};
pub use structs::{Agenda, Event};
