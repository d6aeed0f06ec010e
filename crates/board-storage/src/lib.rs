//! # board-storage
//!
//! Filesystem implementation of the [`BlobStore`](board_core::BlobStore) port.
//!
//! Blobs live under `<root>/<namespace>/<uuid>.<ext>` and are referenced by the
//! root-relative path `/<namespace>/<uuid>.<ext>`.

mod fs_store;

pub use fs_store::FsBlobStore;
