use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// File name stem shared by the raw dump and the plot of one variable:
/// `[{run_id}_]{location}_hourly_{variable}`.
pub fn output_stem(location: &str, variable: &str, run_id: Option<&str>) -> String {
    match run_id {
        Some(id) => format!("{}_{}_hourly_{}", id, location, variable),
        None => format!("{}_hourly_{}", location, variable),
    }
}

pub fn plot_path(plot_dir: &Path, stem: &str) -> PathBuf {
    plot_dir.join(format!("{}.png", stem))
}

pub fn raw_path(data_dir: &Path, stem: &str) -> PathBuf {
    data_dir.join(format!("{}.json", stem))
}

pub async fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "path exists but is not a directory",
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating directory: {}", path.display());
            tokio::fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_stem() {
        assert_eq!(
            output_stem("kurmi", "wind_speed_100m", None),
            "kurmi_hourly_wind_speed_100m"
        );
        assert_eq!(
            output_stem("kurmi", "wind_direction_10m", Some("nov26")),
            "nov26_kurmi_hourly_wind_direction_10m"
        );
    }

    #[test]
    fn test_paths() {
        let stem = "laane_hourly_wind_speed_100m";
        assert_eq!(
            plot_path(Path::new("plots"), stem),
            PathBuf::from("plots/laane_hourly_wind_speed_100m.png")
        );
        assert_eq!(
            raw_path(Path::new("data"), stem),
            PathBuf::from("data/laane_hourly_wind_speed_100m.json")
        );
    }

    #[tokio::test]
    async fn test_ensure_dir_exists() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("a").join("b");
        ensure_dir_exists(&nested).await?;
        assert!(nested.is_dir());
        // second call is a no-op
        ensure_dir_exists(&nested).await?;

        let file = dir.path().join("file");
        std::fs::write(&file, b"x")?;
        let err = ensure_dir_exists(&file).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }
}
