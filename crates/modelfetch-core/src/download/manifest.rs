//! Built-in item table.

use super::types::DownloadItem;

/// Remote object key paired with its path relative to the base directory.
pub const DEFAULT_ITEMS: &[(&str, &str)] = &[
    (
        "diffusion_models/z_image_turbo_bf16.safetensors",
        "models/diffusion_models/z_image_turbo_bf16.safetensors",
    ),
    (
        "text_encoders/qwen_3_4b.safetensors",
        "models/text_encoders/qwen_3_4b.safetensors",
    ),
    ("vae/ae.safetensors", "models/vae/ae.safetensors"),
];

/// Materialize the built-in table as download items.
pub fn default_items() -> Vec<DownloadItem> {
    DEFAULT_ITEMS
        .iter()
        .map(|(key, path)| DownloadItem::new(*key, *path))
        .collect()
}
