// src/domain/deck/mod.rs
//
// Deck Domain
//
// "Sorting" cards means bucketing them into printable rows. Order is the
// link list order; nothing is compared or reordered.

pub mod paginator;

pub use paginator::{paginate, Deck, Row};
