use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use windrose::{
    summarize, ArchiveLoader, ArchiveRequest, Binning, DateRange, DirectionHistogram, LatLon,
    QuantileSet, SpeedHistogram, WindSpeedUnit,
};

// A year of hourly samples.
const HOURS: usize = 24 * 366;

fn degrees() -> Vec<f64> {
    (0..HOURS).map(|i| (i * 7919 % 3600) as f64 / 10.0).collect()
}

fn speeds() -> Vec<f64> {
    (0..HOURS).map(|i| (i * 104_729 % 2500) as f64 / 100.0).collect()
}

fn raw_body() -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let times = (0..HOURS)
        .map(|h| format!("\"{}\"", (start + chrono::Duration::hours(h as i64)).format("%Y-%m-%dT%H:%M")))
        .collect::<Vec<_>>()
        .join(",");
    let values = speeds()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"hourly":{{"time":[{}],"wind_speed_100m":[{}]}}}}"#, times, values)
}

fn bench_analysis(c: &mut Criterion) {
    let degrees = degrees();
    let speeds = speeds();
    c.bench_function("direction_histogram", |b| {
        b.iter(|| DirectionHistogram::from_degrees(black_box(&degrees).iter().copied()))
    });
    c.bench_function("speed_histogram_count", |b| {
        b.iter(|| SpeedHistogram::new(black_box(&speeds), Binning::Count(30)))
    });
    c.bench_function("speed_histogram_capped", |b| {
        b.iter(|| {
            SpeedHistogram::new(
                black_box(&speeds),
                Binning::Capped {
                    width: 1.0,
                    cap: 20.0,
                },
            )
        })
    });
    c.bench_function("quantiles_five", |b| {
        b.iter(|| summarize(black_box(&speeds), QuantileSet::Five))
    });
}

fn bench_raw_reload(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench_hourly_wind_speed_100m.json");
    std::fs::write(&path, raw_body()).unwrap();
    let request = ArchiveRequest {
        lat_lon: LatLon(58.213667, 25.200861),
        range: DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .unwrap(),
        variable: "wind_speed_100m".to_string(),
        unit: WindSpeedUnit::Ms,
    };
    let loader = ArchiveLoader::new();
    let runtime = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("reload_raw_dump", |b| {
        b.to_async(&runtime).iter(|| async {
            loader
                .fetch()
                .request(&request)
                .raw_path(path.clone())
                .reuse_raw(true)
                .call()
                .await
        })
    });
}

criterion_group!(benches, bench_analysis, bench_raw_reload);
criterion_main!(benches);
