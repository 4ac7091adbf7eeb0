use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generates a fresh directory path under the OS temp directory.
///
/// The path combines `dir_prefix` with a millisecond timestamp and a
/// random alphanumeric suffix, e.g. `model_selection_1724486400123_x7Kq2mTe`.
/// The directory is not created here.
pub fn random_dir_path(dir_prefix: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    std::env::temp_dir().join(format!("{dir_prefix}_{stamp}_{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_carry_the_prefix() {
        let path = random_dir_path("model_selection");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("model_selection_"));
    }

    #[test]
    fn consecutive_paths_differ() {
        assert_ne!(random_dir_path("split"), random_dir_path("split"));
    }
}
