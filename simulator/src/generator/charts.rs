use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use covidcore::domain::Chart;
use std::fs;
use std::path::PathBuf;

/// 1x1 transparent PNG served when no pre-rendered chart is available.
pub const PLACEHOLDER_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Resolves chart images from `<graphs_dir>/<slug>.png`.
#[derive(Debug, Clone, Default)]
pub struct ChartSource {
    graphs_dir: Option<PathBuf>,
}

impl ChartSource {
    pub fn new(graphs_dir: Option<PathBuf>) -> Self {
        Self { graphs_dir }
    }

    pub fn image_for(&self, chart: Chart) -> anyhow::Result<String> {
        let Some(dir) = &self.graphs_dir else {
            return Ok(PLACEHOLDER_PNG.to_string());
        };
        let path = dir.join(format!("{}.png", chart.slug()));
        if !path.exists() {
            return Ok(PLACEHOLDER_PNG.to_string());
        }
        let bytes = fs::read(&path).with_context(|| format!("reading chart {}", path.display()))?;
        Ok(STANDARD.encode(bytes))
    }
}
