//! Loading of the TrueType font used for all chart text.

use crate::plotting::error::PlotError;
use crate::plotting::FONT;
use log::{debug, info};
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Environment variable naming a `.ttf` file to use instead of searching.
pub const FONT_ENV: &str = "WINDROSE_FONT";

const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static LOADED: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Makes sure a font is registered, returning the file it was loaded from.
///
/// `explicit` wins over [`FONT_ENV`], which wins over the built-in list of
/// common system locations. Registration happens once per process.
pub fn ensure_font(explicit: Option<&Path>) -> Result<PathBuf, PlotError> {
    let mut loaded = LOADED
        .lock()
        .map_err(|_| PlotError::Font("font registry lock poisoned".to_string()))?;
    if let Some(path) = loaded.as_ref() {
        return Ok(path.clone());
    }

    let from_env = std::env::var_os(FONT_ENV).map(PathBuf::from);
    let path = explicit
        .map(Path::to_path_buf)
        .or(from_env)
        .or_else(|| {
            CANDIDATES
                .iter()
                .map(PathBuf::from)
                .find(|p| p.is_file())
        })
        .ok_or_else(|| {
            PlotError::Font(format!(
                "no TrueType font found; set {} or pass --font",
                FONT_ENV
            ))
        })?;

    register_file(&path)?;
    info!("Using chart font {:?}", path);
    *loaded = Some(path.clone());
    Ok(path)
}

fn register_file(path: &Path) -> Result<(), PlotError> {
    debug!("Loading chart font from {:?}", path);
    let bytes = std::fs::read(path).map_err(|e| PlotError::FontRead(path.to_path_buf(), e))?;
    // plotters keeps a reference for the lifetime of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT, FontStyle::Normal, bytes)
        .map_err(|_| PlotError::Font(format!("{:?} is not a usable font", path)))
}

#[cfg(test)]
pub(crate) fn font_available() -> bool {
    match ensure_font(None) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("skipping rendering test: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_font() {
        match ensure_font(Some(Path::new("/definitely/not/a/font.ttf"))) {
            // another test registered a system font first
            Ok(_) => {}
            Err(e) => assert!(matches!(e, PlotError::FontRead(..))),
        }
    }

    #[test]
    fn test_invalid_font_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font")?;
        match register_file(&path) {
            Err(PlotError::Font(message)) => assert!(message.contains("not a usable font")),
            other => panic!("unexpected {:?}", other),
        }
        Ok(())
    }
}
