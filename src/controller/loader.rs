//! Asynchronous image loading for the media preview
//!
//! One loader task per load ticket. The task reads the asset, races a safety
//! timeout, and reports back to the model; the generation check on the model
//! side drops anything a later navigation superseded.

use std::time::Duration;

use crate::model::{LoadOutcome, LoadTicket, LOAD_TIMEOUT_SECS};

use super::AppController;

impl AppController {
    /// Spawns the loader for `ticket` and registers its abort handle so the
    /// next navigation (or close) cancels it explicitly.
    pub(crate) async fn start_image_load(&self, ticket: LoadTicket) {
        let model = self.model.clone();
        let generation = ticket.generation;

        let task = tokio::spawn(async move {
            let timeout = Duration::from_secs(LOAD_TIMEOUT_SECS);
            let outcome = match tokio::time::timeout(timeout, tokio::fs::read(&ticket.src)).await {
                Ok(Ok(bytes)) => {
                    tracing::debug!(src = %ticket.src, bytes = bytes.len(), "image loaded");
                    LoadOutcome::Loaded { byte_len: bytes.len() as u64 }
                }
                Ok(Err(e)) => {
                    tracing::warn!(src = %ticket.src, error = %e, "image load failed");
                    LoadOutcome::Failed
                }
                Err(_) => {
                    tracing::warn!(src = %ticket.src, "image load timed out");
                    LoadOutcome::TimedOut
                }
            };
            model.lock().await.finish_image_load(generation, outcome).await;
        });

        // A loader that already finished is fine here: attaching checks the
        // generation and aborting a completed task is a no-op.
        self.model
            .lock()
            .await
            .attach_loader(generation, task.abort_handle())
            .await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use tokio::sync::Mutex;

    use crate::config::AppConfig;
    use crate::model::{
        AppModel, LoadState, MediaImage, PreferenceStore, PreviewRequest, ThemeResolver,
    };

    use super::*;

    async fn controller_with_gallery(images: Vec<MediaImage>) -> AppController {
        let config = Arc::new(AppConfig { gallery: images, ..AppConfig::default() });
        let theme = ThemeResolver::new(PreferenceStore::unavailable(), None);
        let model = Arc::new(Mutex::new(AppModel::new(config.clone(), theme)));
        AppController::new(model, config)
    }

    fn image(src: &str) -> MediaImage {
        MediaImage {
            src: src.to_string(),
            alt: "test image".to_string(),
            caption: None,
            download_href: None,
            download_name: None,
        }
    }

    async fn wait_for_settled(controller: &AppController) -> LoadState {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let state = {
                let model = controller.model.lock().await;
                model.get_preview().await.map(|v| v.load_state)
            };
            match state {
                Some(LoadState::Loading) | None if Instant::now() < deadline => {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
                Some(state) => return state,
                None => panic!("preview closed while waiting for load"),
            }
        }
    }

    #[tokio::test]
    async fn a_readable_file_loads_successfully() {
        let path = std::env::temp_dir().join(format!(
            "homepage-rs-loader-ok-{}.png",
            std::process::id()
        ));
        std::fs::write(&path, b"not really a png").unwrap();

        let controller =
            controller_with_gallery(vec![image(path.to_str().unwrap())]).await;
        let request = PreviewRequest::new(vec![image(path.to_str().unwrap())]).unwrap();
        let ticket = {
            let model = controller.model.lock().await;
            model.open_preview(request).await
        };
        controller.start_image_load(ticket).await;

        assert_eq!(
            wait_for_settled(&controller).await,
            LoadState::Ready { byte_len: 16 }
        );
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn a_missing_file_reveals_the_broken_state() {
        let controller =
            controller_with_gallery(vec![image("definitely/missing.png")]).await;
        let request = PreviewRequest::new(vec![image("definitely/missing.png")]).unwrap();
        let ticket = {
            let model = controller.model.lock().await;
            model.open_preview(request).await
        };
        controller.start_image_load(ticket).await;

        assert_eq!(wait_for_settled(&controller).await, LoadState::Failed);
    }
}
