//! Avatar file storage

pub mod fs_avatar_store;

pub use fs_avatar_store::{FsAvatarStore, PROFILE_IMAGES_DIR};
