pub mod handlers;

// Re-export the helpers the binary and integration tests share
pub use handlers::{
    AppPaths, apply_settings, commit_batch, init_target, load_classifier, open_database,
    parse_confirmation, read_input, review_batch,
};
