//! Vector ingestion: seed-file preload and single inserts

pub mod loader;
pub mod seed;

pub use loader::{generate_point_id, PreloadOutcome, VectorLoader};
pub use seed::{read_seed_file, SeedEntry};
