//! Optional asset lookup
//!
//! Every asset is optional. Lookups return `None` when nothing is on disk.

use std::path::{Path, PathBuf};

pub const BACKGROUND_IMAGES: [&str; 2] = ["background.jpg", "background.png"];
pub const BACKGROUND_MUSIC: [&str; 2] = ["background_music.mp3", "background_music.wav"];
pub const SOUND_CORRECT: &str = "correct.wav";
pub const SOUND_WRONG: &str = "wrong.wav";
pub const SOUND_GAME_OVER: &str = "game_over.wav";

/// First candidate that exists as a file in `dir`
pub fn find_first(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Background image, if one is present
pub fn probe_background(dir: &Path) -> Option<PathBuf> {
    let found = find_first(dir, &BACKGROUND_IMAGES);
    match &found {
        Some(path) => log::info!("Using background image {}", path.display()),
        None => log::debug!("No background image in {}", dir.display()),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_prefers_first_candidate() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(probe_background(dir.path()), None);

        fs::write(dir.path().join("background.png"), b"png").unwrap();
        assert_eq!(
            probe_background(dir.path()),
            Some(dir.path().join("background.png"))
        );

        fs::write(dir.path().join("background.jpg"), b"jpg").unwrap();
        assert_eq!(
            probe_background(dir.path()),
            Some(dir.path().join("background.jpg"))
        );
    }

    #[test]
    fn test_directories_are_not_assets() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(SOUND_CORRECT)).unwrap();
        assert_eq!(find_first(dir.path(), &[SOUND_CORRECT]), None);
    }
}
