use super::*;
use chickenshield_protocols::Verdict;
use tempfile::TempDir;

fn report(ts: &str, verdict: Verdict) -> RiskReport {
    let mut report = RiskReport {
        timestamp: ts.to_string(),
        source: "https://example.com".to_string(),
        title: "Example".to_string(),
        ..Default::default()
    };
    report.assessment.verdict = verdict;
    report.assessment.risk_score = 42;
    report
}

#[tokio::test]
async fn test_open_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("nested").join("data");
    let store = FileResultStore::open(&dir).await.unwrap();
    assert!(dir.is_dir());
    assert_eq!(store.data_dir(), dir.as_path());
}

#[tokio::test]
async fn test_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileResultStore::open(temp_dir.path()).await.unwrap();
    assert!(store.get_last().await.unwrap().is_none());
    assert!(store.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_last_persists_under_fixed_name() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileResultStore::open(temp_dir.path()).await.unwrap();

    store.set_last(report("2024-01-01T00:00:00.000Z", Verdict::Safe)).await.unwrap();

    let path = temp_dir.path().join("lastScanResult.json");
    assert!(path.exists());
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(raw["verdict"], "safe");
    assert_eq!(raw["risk_score"], 42);
}

#[tokio::test]
async fn test_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = FileResultStore::open(temp_dir.path()).await.unwrap();
        store.set_last(report("t1", Verdict::Dangerous)).await.unwrap();
        store.append_history(report("t1", Verdict::Dangerous)).await.unwrap();
    }

    let store = FileResultStore::open(temp_dir.path()).await.unwrap();
    let last = store.get_last().await.unwrap().unwrap();
    assert_eq!(last.verdict(), Verdict::Dangerous);
    assert_eq!(store.history().await.unwrap().len(), 1);
    assert!(temp_dir.path().join("chicken_history.json").exists());
}

#[tokio::test]
async fn test_history_rejects_duplicate_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileResultStore::open(temp_dir.path()).await.unwrap();

    assert!(store.append_history(report("t1", Verdict::Safe)).await.unwrap());
    assert!(!store.append_history(report("t1", Verdict::Dangerous)).await.unwrap());

    let history = store.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].verdict(), Verdict::Safe);
}

#[tokio::test]
async fn test_history_capped_newest_first() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileResultStore::open(temp_dir.path()).await.unwrap();

    for i in 0..12 {
        store.append_history(report(&format!("t{:02}", i), Verdict::Safe)).await.unwrap();
    }

    let history = store.history().await.unwrap();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].timestamp, "t11");
    assert_eq!(history[9].timestamp, "t02");
}

#[tokio::test]
async fn test_custom_history_limit() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileResultStore::open_with_limit(temp_dir.path(), 2).await.unwrap();
    for ts in ["a", "b", "c"] {
        store.append_history(report(ts, Verdict::Safe)).await.unwrap();
    }
    assert_eq!(store.history().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_writes_visible_to_second_handle() {
    let temp_dir = TempDir::new().unwrap();
    let writer = FileResultStore::open(temp_dir.path()).await.unwrap();
    let reader = FileResultStore::open(temp_dir.path()).await.unwrap();

    writer.set_last(report("t1", Verdict::Suspicious)).await.unwrap();
    assert_eq!(reader.get_last().await.unwrap().unwrap().verdict(), Verdict::Suspicious);
}

#[tokio::test]
async fn test_corrupt_entry() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("chicken_history.json"), "{not json").unwrap();
    let store = FileResultStore::open(temp_dir.path()).await.unwrap();

    assert!(matches!(store.history().await, Err(StoreError::Corrupt { .. })));

    // A write replaces the corrupt entry.
    assert!(store.append_history(report("t1", Verdict::Safe)).await.unwrap());
    assert_eq!(store.history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_change_notifications() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileResultStore::open(temp_dir.path()).await.unwrap();
    let mut changes = store.subscribe();

    store.set_last(report("t1", Verdict::Safe)).await.unwrap();
    store.set_last(report("t2", Verdict::Dangerous)).await.unwrap();

    changes.recv().await.unwrap();
    match changes.recv().await.unwrap() {
        StoreChange::LastResult { old_value, new_value } => {
            assert_eq!(old_value.unwrap().timestamp, "t1");
            assert_eq!(new_value.timestamp, "t2");
        }
        other => panic!("unexpected change: {:?}", other),
    }
}
