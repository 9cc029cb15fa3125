//! Domain models for the AeroSense field simulation

mod alert;
mod crop;
mod plot;
mod reading;
mod summary;

pub use alert::*;
pub use crop::*;
pub use plot::*;
pub use reading::*;
pub use summary::*;
