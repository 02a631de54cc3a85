//! Top-level operations
//!
//! The full training/inference round trip and the model reset, sequenced
//! exactly as the service expects: encode the image volume, composite and
//! encode the label volume, build the request, send it, and only then touch
//! the annotation hierarchy. Everything runs on the calling thread; the
//! payload is fully built before the first byte is sent.

use image::DynamicImage;
use tracing::info;

use crate::codec::{composite_labels, serialize_images, serialize_label_volume};
use crate::error::Result;
use crate::hierarchy::{reconcile, AnnotationStore, ReconcileSummary};
use crate::io::CellsparseClient;
use crate::protocol::{ResetRequest, TrainingConfig, TrainingRequest};
use crate::source::{LabelFrame, RegionSource};

/// Run one training and/or inference pass against the service
///
/// Serializes the image volume, composites the background/foreground label
/// pair into one label volume and serializes it, posts the request, and
/// reconciles the predicted objects into the hierarchy.
///
/// The hierarchy is only mutated after a successful response: any failure
/// while building the payload or during the exchange returns early and
/// leaves it exactly as it was.
pub fn run_training<I, B, F>(
    client: &CellsparseClient,
    images: &I,
    background: &B,
    foreground: &F,
    hierarchy: &mut dyn AnnotationStore,
    config: &TrainingConfig,
    train: bool,
) -> Result<ReconcileSummary>
where
    I: RegionSource<Frame = DynamicImage>,
    B: RegionSource<Frame = LabelFrame>,
    F: RegionSource<Frame = LabelFrame>,
{
    info!(
        model = %config.model_name,
        train,
        "starting training/inference request"
    );

    let b64img = serialize_images(images)?;
    let labels = composite_labels(background, foreground)?;
    let b64lbl = serialize_label_volume(&labels)?;

    let request = TrainingRequest::builder(&config.model_name)
        .b64img(b64img)
        .b64lbl(b64lbl)
        .train(train)
        .eval(true)
        .epochs(config.epochs)
        .batchsize(config.batchsize)
        .steps(config.steps)
        .build();

    let predicted = client.train(&request)?;
    Ok(reconcile(hierarchy, &predicted))
}

/// Ask the service to discard the model's learned state
///
/// Success carries no payload; the caller shows a confirmation to the user.
/// No local state is touched either way.
pub fn run_reset(client: &CellsparseClient, config: &TrainingConfig) -> Result<()> {
    info!(model = %config.model_name, "resetting model");
    client.reset(&ResetRequest::new(&config.model_name))
}
