pub mod draw_service;
pub mod participant_service;
pub mod prize_service;
pub mod winner_service;

pub use draw_service::*;
pub use participant_service::*;
pub use prize_service::*;
pub use winner_service::*;
