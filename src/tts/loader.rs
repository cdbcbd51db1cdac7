//! Load-once access to the speech model.
//!
//! The loader is created at startup and handed to whoever needs the model.
//! The first [`ModelLoader::load`] resolves the compute device and connects;
//! later calls return the same instance. A failed load is not cached, so the
//! next user action tries again.

use super::{ChatterboxModel, SpeechModel};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::system_profile::resolve_device;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

pub struct ModelLoader {
    config: ModelConfig,
    model: OnceCell<Arc<dyn SpeechModel>>,
}

impl ModelLoader {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            model: OnceCell::new(),
        }
    }

    /// Return the model, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Model`](crate::error::PolyglotError::Model) if
    /// the model cannot be loaded.
    pub async fn load(&self) -> Result<Arc<dyn SpeechModel>> {
        let model = self
            .model
            .get_or_try_init(|| async {
                let device = resolve_device(self.config.device);
                info!(device = %device, accelerated = device.is_accelerated(), "loading model");
                let model = ChatterboxModel::connect(&self.config, device).await?;
                Ok::<Arc<dyn SpeechModel>, crate::error::PolyglotError>(Arc::new(model))
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Whether the model has been loaded already.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }
}
