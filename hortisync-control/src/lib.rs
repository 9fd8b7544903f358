pub mod error;
pub mod rule;
pub mod schedule;
pub mod source;
pub mod state;

pub use error::*;
pub use rule::*;
pub use schedule::*;
pub use source::*;
pub use state::*;
