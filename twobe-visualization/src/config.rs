//! Viewer configuration

use std::path::PathBuf;
use twobe_gpu::RenderConfig;

/// Window and output settings for [`crate::InteractiveViewer`]
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub render: RenderConfig,
    /// Overrides the `~/Documents/TwoBe` screenshot directory
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "TwoBe by Adobo - 3D Model Viewer".to_string(),
            width: 800,
            height: 600,
            render: RenderConfig::default(),
            screenshot_dir: None,
        }
    }
}
