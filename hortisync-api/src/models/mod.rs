mod actuator;
mod schedule;
mod sensor;
mod status;
mod targets;

pub use actuator::*;
pub use schedule::*;
pub use sensor::*;
pub use status::*;
pub use targets::*;
