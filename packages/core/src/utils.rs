// ABOUTME: Shared utility functions for Daybook
// ABOUTME: Random object-name segments and file extension handling

use std::path::Path;

/// Generate a random 16-character segment for object storage file names
pub fn random_file_segment() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..16)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Lower-cased extension of `file_name`, or `fallback` when it has none
pub fn file_extension(file_name: &str, fallback: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_file_segment() {
        let a = random_file_segment();
        let b = random_file_segment();

        assert_eq!(a.len(), 16);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("me.JPG", "png"), "jpg");
        assert_eq!(file_extension("avatar", "png"), "png");
        assert_eq!(file_extension("/tmp/photo.webp", "png"), "webp");
    }
}
