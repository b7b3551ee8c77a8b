/*
 * Integration tests for w1-therm-exporter
 *
 * These tests drive the sampler against a fake sysfs tree, publish into the
 * Prometheus gauges and check what a scraper would see.
 */

use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use w1_core::constants::paths::SLAVE_FILE;
use w1_core::{Sampler, W1Bus};
use w1_therm_exporter::server;
use w1_therm_exporter::TemperatureGauges;

const T0: i64 = 1_700_000_000;

fn write_sensor(root: &Path, id: &str, payload: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(SLAVE_FILE), payload).unwrap();
}

fn fake_bus() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("w1_bus_master1")).unwrap();
    write_sensor(
        tmp.path(),
        "28-000001",
        "50 05 4b 46 7f ff 0c 10 1c : crc=1c YES\n50 05 4b 46 7f ff 0c 10 1c t=21312\n",
    );
    write_sensor(
        tmp.path(),
        "28-000002",
        "4b 01 4b 46 7f ff 05 10 d8 : crc=00 NO\n4b 01 4b 46 7f ff 05 10 d8 t=18875\n",
    );
    tmp
}

#[test]
fn test_cycle_publishes_only_valid_sensors() {
    let tmp = fake_bus();
    let gauges = TemperatureGauges::new().unwrap();
    let mut sampler = Sampler::new(W1Bus::new(tmp.path()), gauges.clone());

    sampler.run_cycle_at(T0).unwrap();

    let text = gauges.render().unwrap();
    assert!(text.contains("w1_therm_temperature_celsius{sensor_id=\"28-000001\"} 21.3"));
    assert!(!text.contains("28-000002"));
    assert!(!text.contains("w1_bus_master1"));
    assert_eq!(sampler.live().ids(), vec!["28-000001"]);
}

#[test]
fn test_registry_and_gauges_stay_in_sync() {
    let tmp = fake_bus();
    let gauges = TemperatureGauges::new().unwrap();
    let mut sampler = Sampler::new(W1Bus::new(tmp.path()), gauges.clone());

    sampler.run_cycle_at(T0).unwrap();
    // 28-000002 recovers, 28-000001 starts failing its CRC
    write_sensor(tmp.path(), "28-000002", "crc=d8 YES\nt=-1062\n");
    write_sensor(tmp.path(), "28-000001", "crc=1c NO\nt=21312\n");
    sampler.run_cycle_at(T0 + 10).unwrap();

    for id in ["28-000001", "28-000002"] {
        assert_eq!(sampler.live().contains(id), gauges.is_published(id), "{}", id);
    }
    assert_eq!(gauges.value("28-000002"), Some(-1.0));
    assert!(!gauges.is_published("28-000001"));
}

#[test]
fn test_disconnected_sensor_expires() {
    let tmp = fake_bus();
    let gauges = TemperatureGauges::new().unwrap();
    let mut sampler = Sampler::new(W1Bus::new(tmp.path()), gauges.clone());
    sampler.run_cycle_at(T0).unwrap();

    fs::remove_dir_all(tmp.path().join("28-000001")).unwrap();
    sampler.run_cycle_at(T0 + 299).unwrap();
    assert_eq!(gauges.value("28-000001"), Some(21.3));

    sampler.run_cycle_at(T0 + 301).unwrap();
    assert_eq!(gauges.render().unwrap(), "");
    assert!(sampler.live().is_empty());
}

#[tokio::test]
async fn test_http_scrape() {
    let tmp = fake_bus();
    let gauges = TemperatureGauges::new().unwrap();
    let mut sampler = Sampler::new(W1Bus::new(tmp.path()), gauges.clone());
    sampler.run_cycle_at(T0).unwrap();

    let listener = server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::run_server(listener, gauges, async move {
        let _ = stop_rx.await;
    }));

    let metrics = http_get(addr, "/metrics").await;
    assert!(metrics.starts_with("HTTP/1.1 200"));
    assert!(metrics.contains("# TYPE w1_therm_temperature_celsius gauge"));
    assert!(metrics.contains("w1_therm_temperature_celsius{sensor_id=\"28-000001\"} 21.3"));
    assert!(!metrics.contains("28-000002"));

    let missing = http_get(addr, "/").await;
    assert!(missing.starts_with("HTTP/1.1 404"));

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not shut down")
        .unwrap()
        .unwrap();
}

async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("response timed out")
        .unwrap();
    String::from_utf8(response).unwrap()
}
