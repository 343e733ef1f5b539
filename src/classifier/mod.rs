use std::path::Path;

use anyhow::{anyhow, bail, Context};
use tract_onnx::prelude::*;

pub mod cuisine;

const IMAGE_SIZE: usize = 224;
const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Pretrained general-purpose image classifier, consumed as an ONNX artifact.
/// Loaded once at startup and shared across requests.
pub struct ImageClassifier {
    model: TypedRunnableModel<TypedModel>,
}

impl ImageClassifier {
    pub fn load(model_path: &Path) -> anyhow::Result<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("Failed to read ONNX model at: {}", model_path.display()))?
            .with_input_fact(0, f32::fact([1, 3, IMAGE_SIZE, IMAGE_SIZE]).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model })
    }

    /// Decode the uploaded image, run one forward pass, return the top-1
    /// class index.
    pub fn classify(&self, image_bytes: &[u8]) -> anyhow::Result<usize> {
        let input = preprocess(image_bytes)?;
        let outputs = self.model.run(tvec!(input.into()))?;
        let scores = outputs[0].to_array_view::<f32>()?;

        scores
            .iter()
            .cloned()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
            .ok_or_else(|| anyhow!("Model produced an empty score tensor"))
    }
}

/// Resize to 224x224 and normalize with the standard ImageNet statistics.
fn preprocess(image_bytes: &[u8]) -> anyhow::Result<Tensor> {
    let img = image::load_from_memory(image_bytes)
        .context("Failed to decode uploaded image")?
        .to_rgb8();
    let resized = image::imageops::resize(
        &img,
        IMAGE_SIZE as u32,
        IMAGE_SIZE as u32,
        image::imageops::FilterType::Triangle,
    );

    let tensor = tract_ndarray::Array4::from_shape_fn((1, 3, IMAGE_SIZE, IMAGE_SIZE), |(_, c, y, x)| {
        (resized[(x as u32, y as u32)][c] as f32 / 255.0 - CHANNEL_MEAN[c]) / CHANNEL_STD[c]
    });

    Ok(tensor.into())
}

/// Fetch the plain-text class label list once at startup; handlers index
/// into it by predicted class.
pub async fn fetch_labels(labels_url: &str) -> anyhow::Result<Vec<String>> {
    let body = reqwest::get(labels_url)
        .await
        .with_context(|| format!("Failed to fetch class labels from: {}", labels_url))?
        .error_for_status()
        .context("Label source responded with an error status")?
        .text()
        .await
        .context("Failed to read the class label response body")?;

    let labels: Vec<String> = body.lines().map(str::to_owned).collect();
    if labels.is_empty() {
        bail!("Label source returned an empty list");
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_rejects_garbage_bytes() {
        assert!(preprocess(b"not an image").is_err());
    }

    #[test]
    fn preprocess_normalizes_a_valid_image() {
        // Minimal 1x1 PNG, white pixel; resize stretches it to 224x224.
        let png: &[u8] = &[
            0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00,
            0x00, 0x90, 0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x78,
            0x9c, 0x63, 0xf8, 0xff, 0xff, 0x3f, 0x00, 0x05, 0xfe, 0x02, 0xfe, 0x0d, 0xef, 0x46,
            0xb8, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
        ];

        let tensor = preprocess(png).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        // White (1.0) normalized by the red-channel statistics.
        let view = tensor.to_array_view::<f32>().unwrap();
        let expected = (1.0 - CHANNEL_MEAN[0]) / CHANNEL_STD[0];
        assert!((view[[0, 0, 0, 0]] - expected).abs() < 1e-4);
    }
}
