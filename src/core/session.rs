use crate::core::calculator;
use crate::core::locale::{self, strings};
use crate::core::report;
use crate::domain::model::{CalculationResult, Locale, SavedResult, Theme};
use crate::domain::ports::{SharePayload, ShareSink, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

pub const THEME_KEY: &str = "theme";
pub const RESULTS_KEY: &str = "waterCalculatorResults";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn new(kind: NotificationKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Ties the calculator to storage and sharing. Each operation is a separate
/// step; callers decide the order (compute, then save, then render).
pub struct IntakeEngine<S: Storage> {
    storage: S,
    locale: Locale,
}

impl<S: Storage> IntakeEngine<S> {
    pub fn new(storage: S, locale: Locale) -> Self {
        Self { storage, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn compute(
        &self,
        raw_weight: Option<&str>,
        raw_activity: Option<&str>,
    ) -> Result<CalculationResult> {
        let input = calculator::validate(raw_weight, raw_activity)?;
        let result = calculator::calculate_with_locale(&input, self.locale);
        tracing::info!(
            "Calculated {} ml ({} L) for {} kg at {} activity",
            result.total_milliliters,
            result.total_liters,
            result.weight_kg,
            result.activity_tier
        );
        Ok(result)
    }

    pub async fn history(&self) -> Result<Vec<SavedResult>> {
        match self.storage.get(RESULTS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save_result(&self, result: &CalculationResult) -> Result<SavedResult> {
        let mut saved = self.history().await?;
        let now = Utc::now();
        // ids are millisecond timestamps; bump on collision so they stay unique
        let id = match saved.last() {
            Some(last) if last.id >= now.timestamp_millis() => last.id + 1,
            _ => now.timestamp_millis(),
        };
        let entry = SavedResult {
            id,
            date: now,
            result: result.clone(),
        };
        saved.push(entry.clone());
        self.storage
            .set(RESULTS_KEY, &serde_json::to_string(&saved)?)
            .await?;
        tracing::info!("Saved result #{} ({} entries stored)", id, saved.len());
        Ok(entry)
    }

    /// Saves the last result when there is one.
    pub async fn save_last(&self, last: Option<&CalculationResult>) -> Result<Notification> {
        let s = strings(self.locale);
        match last {
            Some(result) => {
                self.save_result(result).await?;
                Ok(Notification::new(NotificationKind::Success, s.saved))
            }
            None => Ok(Notification::new(NotificationKind::Info, s.nothing_to_save)),
        }
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.storage.remove(RESULTS_KEY).await?;
        tracing::info!("Cleared saved results");
        Ok(())
    }

    pub async fn theme(&self) -> Result<Theme> {
        let stored = self.storage.get(THEME_KEY).await?;
        Ok(match stored {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            None => Theme::default(),
        })
    }

    pub async fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().await?.toggled();
        self.storage.set(THEME_KEY, theme.as_str()).await?;
        tracing::debug!("Theme switched to {}", theme.as_str());
        Ok(theme)
    }

    /// Native share when a result and a native target exist, clipboard otherwise.
    pub async fn share(
        &self,
        result: Option<&CalculationResult>,
        native: Option<&dyn ShareSink>,
        clipboard: &dyn ShareSink,
        page_url: &str,
    ) -> Notification {
        let s = strings(self.locale);

        if let (Some(result), Some(native)) = (result, native) {
            let payload = SharePayload {
                title: s.share_title.to_string(),
                text: format!(
                    "{}!",
                    locale::need_sentence(self.locale, &result.total_liters.to_string())
                ),
                url: page_url.to_string(),
            };
            return match native.share(&payload).await {
                Ok(()) => Notification::new(NotificationKind::Success, s.shared),
                Err(e) => {
                    tracing::error!("Share via {} failed: {}", native.name(), e);
                    Notification::new(NotificationKind::Error, s.share_failed)
                }
            };
        }

        let amount = result
            .map(|r| r.total_liters.to_string())
            .unwrap_or_else(|| "X".to_string());
        let payload = SharePayload {
            title: s.share_title.to_string(),
            text: format!(
                "{}!\n{} {}",
                locale::need_sentence(self.locale, &amount),
                s.calculate_prompt,
                page_url
            ),
            url: page_url.to_string(),
        };
        match clipboard.share(&payload).await {
            Ok(()) => Notification::new(NotificationKind::Success, s.copied),
            Err(e) => {
                tracing::error!("Copy via {} failed: {}", clipboard.name(), e);
                Notification::new(NotificationKind::Error, s.share_failed)
            }
        }
    }

    /// Zip archive holding `history.csv` and `history.json`, plus the entry count.
    pub async fn history_archive(&self) -> Result<(usize, Vec<u8>)> {
        let saved = self.history().await?;
        let csv_output = report::history_csv(&saved)?;
        let json_output = serde_json::to_string_pretty(&saved)?;

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("history.csv", FileOptions::default())?;
            zip.write_all(csv_output.as_bytes())?;

            zip.start_file::<_, ()>("history.json", FileOptions::default())?;
            zip.write_all(json_output.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        Ok((saved.len(), zip_data))
    }

    /// Writes the history archive to `path`, resolved against the working
    /// directory rather than the data dir.
    pub async fn export_history(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let (count, zip_data) = self.history_archive().await?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tracing::debug!(
            "Writing export archive ({} bytes) to {}",
            zip_data.len(),
            path.display()
        );
        tokio::fs::write(path, &zip_data).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::IntakeError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        values: Arc<Mutex<HashMap<String, String>>>,
    }

    impl Storage for MockStorage {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().await.remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        fail: bool,
        received: std::sync::Mutex<Vec<SharePayload>>,
    }

    #[async_trait]
    impl ShareSink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        async fn share(&self, payload: &SharePayload) -> Result<()> {
            if self.fail {
                return Err(IntakeError::ShareError {
                    message: "cancelled".to_string(),
                });
            }
            self.received.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    fn engine() -> IntakeEngine<MockStorage> {
        IntakeEngine::new(MockStorage::default(), Locale::En)
    }

    #[test]
    fn test_compute_rejects_invalid_input() {
        let err = engine().compute(None, Some("medium")).unwrap_err();
        assert!(matches!(err, IntakeError::InputError(_)));
    }

    #[tokio::test]
    async fn test_save_and_list_history() {
        let engine = engine();
        let result = engine.compute(Some("70"), Some("medium")).unwrap();

        let first = engine.save_result(&result).await.unwrap();
        let second = engine.save_result(&result).await.unwrap();
        assert!(second.id > first.id);

        let history = engine.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].result, result);

        engine.clear_history().await.unwrap();
        assert!(engine.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_last_without_result() {
        let notification = engine().save_last(None).await.unwrap();
        assert_eq!(notification.kind, NotificationKind::Info);
    }

    #[tokio::test]
    async fn test_theme_defaults_to_light_and_toggles() {
        let engine = engine();
        assert_eq!(engine.theme().await.unwrap(), Theme::Light);
        assert_eq!(engine.toggle_theme().await.unwrap(), Theme::Dark);
        assert_eq!(engine.theme().await.unwrap(), Theme::Dark);
        assert_eq!(engine.toggle_theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_corrupt_theme_falls_back_to_default() {
        let engine = engine();
        engine.storage().set(THEME_KEY, "purple").await.unwrap();
        assert_eq!(engine.theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_share_prefers_native_sink() {
        let engine = engine();
        let result = engine.compute(Some("70"), Some("low")).unwrap();
        let native = RecordingSink::default();
        let clipboard = RecordingSink::default();

        let notification = engine
            .share(Some(&result), Some(&native), &clipboard, "https://example.com")
            .await;

        assert_eq!(notification.kind, NotificationKind::Success);
        let sent = native.received.lock().unwrap();
        assert_eq!(sent[0].text, "You need 2.1 L of water daily to stay healthy!");
        assert_eq!(sent[0].url, "https://example.com");
        assert!(clipboard.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_share_falls_back_to_clipboard_without_result() {
        let clipboard = RecordingSink::default();
        let notification = engine()
            .share(None, None, &clipboard, "https://example.com")
            .await;

        assert_eq!(notification.message, "Result copied to clipboard!");
        let sent = clipboard.received.lock().unwrap();
        assert!(sent[0].text.starts_with("You need X L"));
        assert!(sent[0].text.ends_with("https://example.com"));
    }

    #[tokio::test]
    async fn test_share_reports_failure() {
        let clipboard = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let notification = engine().share(None, None, &clipboard, "https://x.y").await;
        assert_eq!(notification.kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_history_archive_zip() {
        let engine = engine();
        let result = engine.compute(Some("100"), Some("high")).unwrap();
        engine.save_result(&result).await.unwrap();

        let (count, zip_bytes) = engine.history_archive().await.unwrap();
        assert_eq!(count, 1);

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        let mut csv_content = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name("history.csv").unwrap(),
            &mut csv_content,
        )
        .unwrap();
        assert!(csv_content.starts_with("id,date,weight_kg,activity,total_milliliters,total_liters"));
        assert!(csv_content.contains(",100.0,high,4000,4.0"));
        assert!(archive.by_name("history.json").is_ok());
    }
}
