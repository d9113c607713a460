mod persistence;

pub use persistence::{load_json, remove_if_exists, save_json, temp_sibling, write_atomic};
