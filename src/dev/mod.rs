//! Development-mode helpers: a mock store backed by fixture data.

pub mod mock_store;
