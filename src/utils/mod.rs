mod helpers;

pub use helpers::random_dir_path;
