//! # Repository Module
//!
//! Database repository implementations for LightBnB.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                                                                │
//! │       │  db.properties().search(&criteria, limit)                      │
//! │       ▼                                                                 │
//! │  PropertyRepository                                                    │
//! │  ├── search(&self, criteria, limit)   ← SQL from lightbnb-core         │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, property)                                           │
//! │  └── add_review(&self, review)                                         │
//! │       │  SQL + bound parameters                                        │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Lookup and registration
//! - [`ReservationRepository`](reservation::ReservationRepository) - Guest trips and booking
//! - [`PropertyRepository`](property::PropertyRepository) - Search, listing and reviews

pub mod property;
pub mod reservation;
pub mod user;
