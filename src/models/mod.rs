pub mod participant;
pub mod prize;
pub mod winner;

pub use participant::*;
pub use prize::*;
pub use winner::*;
