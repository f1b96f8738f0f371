//! Core systems for Trellis.
//!
//! This crate provides the reactive plumbing that the Trellis widget crates
//! are built on:
//!
//! - **Signal/Slot System**: Type-safe change notification between objects
//! - **Property System**: Values with change detection
//!
//! Trellis widgets are notification-driven: state objects emit signals when
//! they change, and widgets react inside the handler, synchronously, on the
//! thread that performed the mutation. There is no event loop in this crate;
//! emission always invokes connected slots directly.
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use trellis_core::{Property, Signal};
//!
//! // A reactive flag with change notification
//! struct Toggle {
//!     active: Property<bool>,
//!     active_changed: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn new() -> Self {
//!         Self {
//!             active: Property::new(false),
//!             active_changed: Signal::new(),
//!         }
//!     }
//!
//!     fn set_active(&self, active: bool) {
//!         if self.active.set(active) {
//!             self.active_changed.emit(active);
//!         }
//!     }
//! }
//! ```

pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
