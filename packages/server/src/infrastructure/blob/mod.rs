//! Photo blob storage.

pub mod filesystem;

pub use filesystem::FileSystemBlobStore;
