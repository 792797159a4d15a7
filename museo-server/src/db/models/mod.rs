//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod user;

// Rooms and Events
pub mod event;
pub mod room;

// Ticketing
pub mod reservation;

// Inventory
pub mod inventory;

// Re-exports
pub use event::{Event, EventCreate, EventId, EventUpdate, EventWithRoom};
pub use inventory::{
    EventProduct, InventoryProduct, InventoryProductCreate, InventoryProductId,
    InventoryProductUpdate,
};
pub use reservation::{Reservation, ReservationCreate, ReservationId};
pub use room::{Room, RoomCreate, RoomId, RoomUpdate};
pub use user::{User, UserId, UserRegister, UserUpdate};
