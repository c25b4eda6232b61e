pub mod controls;
pub mod intent;
pub mod surface;
pub mod transport;

pub use surface::{MediaCommand, MediaEvent, MediaEventKind};
pub use transport::{PlaybackStatus, PlayerController};
