//! # Event Bus Module
//!
//! Publish/subscribe channel that carries every state change in AOIKit.
//!
//! ## Overview
//!
//! - The AOI store publishes after each mutation
//! - The draw controller publishes gesture progress
//! - The session publishes user notifications
//! - Surfaces subscribe and re-render; they never poll
//!
//! The bus is an ordinary value that is shared via `Arc`. There is no global
//! instance, so each session and each test gets its own.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aoikit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//! use std::sync::Arc;
//!
//! let bus = Arc::new(EventBus::new());
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Aoi]),
//!     |event| println!("{}", event.description()),
//! );
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
