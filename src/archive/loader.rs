use crate::archive::error::ArchiveError;
use crate::archive::response::{error_reason, parse_hourly};
use crate::types::date_range::DateRange;
use crate::types::location::LatLon;
use crate::types::series::HourlySeries;
use crate::types::variable::{WindSpeedUnit, WindVariable};
use bon::bon;
use log::{debug, info, warn};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Public Open-Meteo historical weather endpoint.
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Parameters of one archive query: one hourly variable at one coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub lat_lon: LatLon,
    pub range: DateRange,
    /// Archive variable name, e.g. `wind_direction_100m`.
    pub variable: String,
    pub unit: WindSpeedUnit,
}

impl ArchiveRequest {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.lat_lon.0.to_string()),
            ("longitude", self.lat_lon.1.to_string()),
            ("start_date", self.range.start_str()),
            ("end_date", self.range.end_str()),
            (WindVariable::CATEGORY, self.variable.clone()),
            ("windspeed_unit", self.unit.query_value().to_string()),
        ]
    }
}

pub struct ArchiveLoader {
    base_url: String,
    download_client: Client,
}

impl Default for ArchiveLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[bon]
impl ArchiveLoader {
    pub fn new() -> ArchiveLoader {
        Self::with_base_url(ARCHIVE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> ArchiveLoader {
        ArchiveLoader {
            base_url: base_url.into(),
            download_client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one hourly series.
    ///
    /// When `raw_path` is set the unmodified response body is written there
    /// before it is parsed. With `reuse_raw` an existing file at `raw_path`
    /// is parsed instead of contacting the archive.
    #[builder]
    pub async fn fetch(
        &self,
        request: &ArchiveRequest,
        raw_path: Option<PathBuf>,
        reuse_raw: Option<bool>,
    ) -> Result<HourlySeries, ArchiveError> {
        let reuse_raw = reuse_raw.unwrap_or(false);

        if let Some(path) = raw_path.as_deref().filter(|_| reuse_raw) {
            if fs::metadata(path).await.is_ok() {
                info!(
                    "Raw response hit for {} at {:?}, skipping download",
                    request.variable, path
                );
                let body = fs::read(path)
                    .await
                    .map_err(|e| ArchiveError::RawDumpRead(path.to_path_buf(), e))?;
                return parse_hourly(&body, &request.variable);
            }
            warn!(
                "Raw response miss for {} at {:?}. Downloading.",
                request.variable, path
            );
        }

        let body = self.download(request).await?;
        if let Some(path) = raw_path.as_deref() {
            Self::write_raw(&body, path).await?;
        }

        let series = parse_hourly(&body, &request.variable)?;
        info!(
            "Parsed {} hourly samples of {}",
            series.len(),
            request.variable
        );
        Ok(series)
    }

    /// Issues the GET request and returns the body bytes of a 2xx response.
    async fn download(&self, request: &ArchiveRequest) -> Result<Vec<u8>, ArchiveError> {
        info!(
            "Requesting {} for ({}, {}) from {} to {}",
            request.variable,
            request.lat_lon.0,
            request.lat_lon.1,
            request.range.start_str(),
            request.range.end_str()
        );

        let response = self
            .download_client
            .get(&self.base_url)
            .query(&request.query())
            .send()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(self.base_url.clone(), e))?;

        let status = response.status();
        let url = response.url().to_string();
        debug!("Archive answered {} for {}", status, url);

        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?;

        if !status.is_success() {
            let reason = error_reason(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("no reason given")
                    .to_string()
            });
            warn!("HTTP error for {}: {} ({})", url, status, reason);
            return Err(ArchiveError::HttpStatus {
                url,
                status,
                reason,
            });
        }

        Ok(body.to_vec())
    }

    async fn write_raw(body: &[u8], path: &Path) -> Result<(), ArchiveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ArchiveError::DirCreation(parent.to_path_buf(), e))?;
        }
        fs::write(path, body)
            .await
            .map_err(|e| ArchiveError::RawDumpWrite(path.to_path_buf(), e))?;
        info!("Saved raw response ({} bytes) to {:?}", body.len(), path);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    pub(crate) const SPEED_BODY: &str = r#"{"latitude":58.22,"longitude":25.2,"hourly_units":{"time":"iso8601","wind_speed_100m":"m/s"},"hourly":{"time":["2024-11-26T14:00","2024-11-26T15:00","2024-11-26T16:00","2024-11-26T17:00"],"wind_speed_100m":[4.5,null,6.25,3.0]}}"#;

    /// Serves exactly one HTTP response on a local port and returns the
    /// base URL together with the request line the client sent.
    pub(crate) async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (format!("http://{}/v1/archive", addr), handle)
    }

    pub(crate) fn speed_request() -> ArchiveRequest {
        ArchiveRequest {
            lat_lon: LatLon(58.213667, 25.200861),
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 11, 26).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 27).unwrap(),
            )
            .unwrap(),
            variable: "wind_speed_100m".to_string(),
            unit: WindSpeedUnit::Ms,
        }
    }

    #[test]
    fn test_query_parameters() {
        let query = speed_request().query();
        assert_eq!(
            query,
            vec![
                ("latitude", "58.213667".to_string()),
                ("longitude", "25.200861".to_string()),
                ("start_date", "2024-11-26".to_string()),
                ("end_date", "2024-11-27".to_string()),
                ("hourly", "wind_speed_100m".to_string()),
                ("windspeed_unit", "ms".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_parses() -> Result<(), Box<dyn std::error::Error>> {
        let (url, server) = serve_once("200 OK", SPEED_BODY).await;
        let loader = ArchiveLoader::with_base_url(url);

        let series = loader.fetch().request(&speed_request()).call().await?;

        assert_eq!(series.values(), &[Some(4.5), None, Some(6.25), Some(3.0)]);
        let request_line = server.await?;
        assert!(request_line.starts_with("GET /v1/archive?"));
        assert!(request_line.contains("hourly=wind_speed_100m"));
        assert!(request_line.contains("start_date=2024-11-26"));
        assert!(request_line.contains("windspeed_unit=ms"));
        Ok(())
    }

    #[tokio::test]
    async fn test_raw_dump_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let raw_path = dir.path().join("data").join("run1_joekaaru_hourly_wind_speed_100m.json");
        let (url, server) = serve_once("200 OK", SPEED_BODY).await;
        let loader = ArchiveLoader::with_base_url(url);

        let series = loader
            .fetch()
            .request(&speed_request())
            .raw_path(raw_path.clone())
            .call()
            .await?;
        server.await?;

        let on_disk = std::fs::read(&raw_path)?;
        assert_eq!(on_disk, SPEED_BODY.as_bytes());
        let reparsed = parse_hourly(&on_disk, "wind_speed_100m")?;
        assert_eq!(reparsed, series);
        Ok(())
    }

    #[tokio::test]
    async fn test_reuse_raw_skips_download() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let raw_path = dir.path().join("cached.json");
        std::fs::write(&raw_path, SPEED_BODY)?;
        // Nothing listens here, a download attempt would fail.
        let loader = ArchiveLoader::with_base_url("http://127.0.0.1:9/v1/archive");

        let series = loader
            .fetch()
            .request(&speed_request())
            .raw_path(raw_path)
            .reuse_raw(true)
            .call()
            .await?;
        assert_eq!(series.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_http_error_carries_reason() {
        let (url, server) = serve_once(
            "400 Bad Request",
            r#"{"error":true,"reason":"Parameter 'start_date' is out of allowed range"}"#,
        )
        .await;
        let loader = ArchiveLoader::with_base_url(url);

        let err = loader
            .fetch()
            .request(&speed_request())
            .call()
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            ArchiveError::HttpStatus { status, reason, .. } => {
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert_eq!(reason, "Parameter 'start_date' is out of allowed range");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let loader = ArchiveLoader::with_base_url("http://127.0.0.1:9/v1/archive");
        let err = loader
            .fetch()
            .request(&speed_request())
            .call()
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveError::NetworkRequest(..)));
    }
}
