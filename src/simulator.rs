//! Balance simulator for the clicker economy.
//! Run with: cargo test simulate_ -- --nocapture
