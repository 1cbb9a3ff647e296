//! Engine integration tests.

mod capture;
mod dynamic;
mod gates;
mod language;
mod locking;
mod navigation;
mod saving;
mod structure;
