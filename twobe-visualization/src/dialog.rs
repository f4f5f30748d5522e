//! Native file picker

use rfd::FileDialog;
use std::path::PathBuf;

/// Ask the user for a model file; `None` when the dialog is dismissed
pub fn pick_model_file() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Open 3D Model")
        .add_filter("OBJ files", &["obj"])
        .add_filter("All files", &["*"])
        .pick_file()
}
