use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::charts::{ChartRenderer, ChartSpec};

pub const FAKE_PNG: &[u8] = b"\x89PNG fake";

/// Renderer that records each chart and answers with fixed bytes
#[derive(Clone)]
pub struct FakeChartRenderer {
    png: Arc<Vec<u8>>,
    charts: Arc<Mutex<Vec<ChartSpec>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl Default for FakeChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeChartRenderer {
    pub fn new() -> Self {
        Self::with_png(FAKE_PNG.to_vec())
    }

    pub fn with_png(png: Vec<u8>) -> Self {
        Self {
            png: Arc::new(png),
            charts: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    pub async fn rendered_charts(&self) -> Vec<ChartSpec> {
        self.charts.lock().await.clone()
    }
}

#[async_trait]
impl ChartRenderer for FakeChartRenderer {
    async fn render_png(&self, chart: &ChartSpec) -> Result<Vec<u8>> {
        self.charts.lock().await.push(chart.clone());

        if let Some(message) = self.failure.lock().await.clone() {
            return Err(anyhow!(message));
        }
        Ok(self.png.as_ref().clone())
    }
}
