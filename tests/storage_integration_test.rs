use anyhow::Result;
use std::io::Read;
use tempfile::TempDir;
use water_intake::core::session::{NotificationKind, RESULTS_KEY, THEME_KEY};
use water_intake::domain::model::{SavedResult, Theme};
use water_intake::domain::ports::{ShareSink, Storage};
use water_intake::{ClipboardFile, IntakeEngine, LocalStorage, Locale};

fn engine_in(dir: &TempDir, locale: Locale) -> IntakeEngine<LocalStorage> {
    let base = dir.path().to_str().unwrap().to_string();
    IntakeEngine::new(LocalStorage::new(base), locale)
}

#[test]
fn test_local_storage_missing_key_is_none() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let value = tokio_test::block_on(storage.get(THEME_KEY)).unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn test_local_storage_round_trip_and_remove() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path().join("nested").to_str().unwrap().to_string());

    storage.set(THEME_KEY, "dark").await?;
    assert_eq!(storage.get(THEME_KEY).await?.as_deref(), Some("dark"));

    storage.remove(THEME_KEY).await?;
    storage.remove(THEME_KEY).await?;
    assert!(storage.get(THEME_KEY).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_local_storage_rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    assert!(storage.set("../escape", "x").await.is_err());
}

#[tokio::test]
async fn test_saved_results_persist_across_engines() -> Result<()> {
    let dir = TempDir::new()?;

    {
        let engine = engine_in(&dir, Locale::Ar);
        let result = engine.compute(Some("70"), Some("medium"))?;
        let notification = engine.save_last(Some(&result)).await?;
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, "تم حفظ النتيجة بنجاح!");
    }

    let engine = engine_in(&dir, Locale::En);
    let history = engine.history().await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result.total_milliliters, 2450);
    assert_eq!(history[0].result.activity_label, "النشاط المتوسط");

    // stored as a JSON array of flattened results
    let raw = std::fs::read_to_string(dir.path().join(RESULTS_KEY))?;
    let parsed: Vec<SavedResult> = serde_json::from_str(&raw)?;
    assert_eq!(parsed, history);
    assert!(raw.contains("\"total_liters\":\"2.5\""));
    Ok(())
}

#[tokio::test]
async fn test_theme_persists_on_disk() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_in(&dir, Locale::En);

    assert_eq!(engine.toggle_theme().await?, Theme::Dark);
    assert_eq!(std::fs::read_to_string(dir.path().join(THEME_KEY))?, "dark");

    let reopened = engine_in(&dir, Locale::En);
    assert_eq!(reopened.theme().await?, Theme::Dark);
    Ok(())
}

#[tokio::test]
async fn test_export_writes_zip_archive_outside_data_dir() -> Result<()> {
    let data_dir = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let engine = engine_in(&data_dir, Locale::En);
    for (weight, activity) in [("60", "low"), ("90", "high")] {
        let result = engine.compute(Some(weight), Some(activity))?;
        engine.save_result(&result).await?;
    }

    let zip_path = out_dir.path().join("exports/history.zip");
    let count = engine.export_history(&zip_path).await?;
    assert_eq!(count, 2);
    assert!(!data_dir.path().join("exports").exists());

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&zip_path)?)?;
    let mut csv_content = String::new();
    archive.by_name("history.csv")?.read_to_string(&mut csv_content)?;

    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",60.0,low,1800,1.8"));
    assert!(lines[2].ends_with(",90.0,high,3600,3.6"));
    Ok(())
}

#[tokio::test]
async fn test_export_relative_path_resolves_against_working_dir() -> Result<()> {
    let data_dir = TempDir::new()?;
    let engine = engine_in(&data_dir, Locale::En);
    let result = engine.compute(Some("70"), Some("medium"))?;
    engine.save_result(&result).await?;

    // a scratch dir under the working directory, addressed by a relative path
    let scratch = TempDir::new_in(".")?;
    let dir_name = scratch.path().file_name().unwrap().to_str().unwrap();
    let relative = format!("{}/water-history.zip", dir_name);

    engine.export_history(&relative).await?;

    assert!(std::env::current_dir()?.join(&relative).exists());
    assert!(!data_dir.path().join(&relative).exists());
    assert!(!data_dir.path().join("water-history.zip").exists());
    Ok(())
}

#[tokio::test]
async fn test_clipboard_file_share() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_in(&dir, Locale::En);
    let clip_path = dir.path().join("clipboard.txt");
    let clipboard = ClipboardFile::new(&clip_path);
    assert_eq!(clipboard.name(), "clipboard-file");

    let result = engine.compute(Some("100"), Some("high"))?;
    let notification = engine
        .share(Some(&result), None, &clipboard, "https://example.com/water")
        .await;
    assert_eq!(notification.kind, NotificationKind::Success);

    let copied = std::fs::read_to_string(&clip_path)?;
    assert_eq!(
        copied,
        "You need 4.0 L of water daily to stay healthy!\nCalculate your water needs: https://example.com/water"
    );
    Ok(())
}

#[tokio::test]
async fn test_clipboard_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(&dir, Locale::En);
    let clipboard = ClipboardFile::new(dir.path().join("missing-dir/clipboard.txt"));

    let notification = engine.share(None, None, &clipboard, "https://x.example").await;
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Sharing failed");
}
