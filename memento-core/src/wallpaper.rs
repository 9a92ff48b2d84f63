use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which wallpaper slot(s) a finished image is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperTarget {
    Home,
    Lock,
    Both,
}

/// Outcome of handing an image to a wallpaper sink.
///
/// A tagged value rather than an error type so the caller's retry
/// decision stays explicit at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    Applied,
    Rejected(String),
}

/// Anything that can accept a finished wallpaper image.
pub trait WallpaperSink {
    fn set(&self, image: &RgbaImage, target: WallpaperTarget) -> SetOutcome;
}

/// Sink that writes the image as PNG files into a directory.
///
/// Stands in for a platform wallpaper service: `home.png` and/or
/// `lock.png` land in the configured directory for whatever mechanism
/// applies them.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: expand_home(dir.into()),
        }
    }

    fn paths_for(&self, target: WallpaperTarget) -> Vec<PathBuf> {
        let names: &[&str] = match target {
            WallpaperTarget::Home => &["home.png"],
            WallpaperTarget::Lock => &["lock.png"],
            WallpaperTarget::Both => &["home.png", "lock.png"],
        };
        names.iter().map(|name| self.dir.join(name)).collect()
    }
}

impl WallpaperSink for FileSink {
    fn set(&self, image: &RgbaImage, target: WallpaperTarget) -> SetOutcome {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            return SetOutcome::Rejected(format!(
                "cannot create output directory {}: {}",
                self.dir.display(),
                e
            ));
        }

        for path in self.paths_for(target) {
            log::info!("Writing wallpaper to: {}", path.display());
            if let Err(e) = image.save(&path) {
                return SetOutcome::Rejected(format!(
                    "failed to write {}: {}",
                    path.display(),
                    e
                ));
            }
        }

        log::info!(
            "Wallpaper written: {}x{} pixels ({} bytes raw)",
            image.width(),
            image.height(),
            image.as_raw().len()
        );
        SetOutcome::Applied
    }
}

/// Expand a leading tilde to the home directory.
fn expand_home(path: PathBuf) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path;
    };
    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            let mut expanded = PathBuf::from(home);
            expanded.push(rest);
            return expanded;
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> RgbaImage {
        RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]))
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("memento-sink-tests").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_home_target_writes_one_file() {
        let dir = scratch_dir("home");
        let sink = FileSink::new(&dir);
        assert_eq!(
            sink.set(&test_image(), WallpaperTarget::Home),
            SetOutcome::Applied
        );
        assert!(dir.join("home.png").exists());
        assert!(!dir.join("lock.png").exists());
    }

    #[test]
    fn test_both_target_writes_both_files() {
        let dir = scratch_dir("both");
        let sink = FileSink::new(&dir);
        assert_eq!(
            sink.set(&test_image(), WallpaperTarget::Both),
            SetOutcome::Applied
        );
        assert!(dir.join("home.png").exists());
        assert!(dir.join("lock.png").exists());
    }

    #[test]
    fn test_written_file_round_trips() {
        let dir = scratch_dir("roundtrip");
        let sink = FileSink::new(&dir);
        sink.set(&test_image(), WallpaperTarget::Lock);

        let read_back = image::open(dir.join("lock.png")).unwrap().to_rgba8();
        assert_eq!(read_back.dimensions(), (4, 4));
        assert_eq!(read_back.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_unwritable_directory_is_rejected_not_panicked() {
        // A file where the directory should be makes create_dir_all fail
        let base = scratch_dir("blocked");
        std::fs::create_dir_all(&base).unwrap();
        let blocker = base.join("occupied");
        std::fs::write(&blocker, b"x").unwrap();

        let sink = FileSink::new(&blocker);
        match sink.set(&test_image(), WallpaperTarget::Home) {
            SetOutcome::Rejected(msg) => assert!(msg.contains("occupied")),
            SetOutcome::Applied => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_tilde_expansion() {
        if std::env::var_os("HOME").is_some() {
            let sink = FileSink::new("~/wallpapers");
            assert!(!sink.dir.to_string_lossy().starts_with('~'));
        }
    }
}
