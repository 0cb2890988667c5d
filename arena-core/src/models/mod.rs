pub mod participant;

pub use participant::{Capabilities, Identity, RoomName};
