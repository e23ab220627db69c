use crate::*;

/// Turns a captured frame into labelled character crops for OCR training.
///
/// The character collection handler calls this after it has written the raw
/// frame to `datasets.ocr_frames_dir()` as `frame_<frame_uuid>.png`.
pub trait TokenPreparer {
    fn prepare_dataset_tokens(
        &self,
        frame: &GameFrame,
        frame_uuid: &str,
        datasets: &DatasetPaths,
    ) -> GameAgentResult<()>;
}

/// Preparer that produces no crops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTokenPreparer;

impl TokenPreparer for NullTokenPreparer {
    fn prepare_dataset_tokens(
        &self,
        _frame: &GameFrame,
        _frame_uuid: &str,
        _datasets: &DatasetPaths,
    ) -> GameAgentResult<()> {
        Ok(())
    }
}

impl<G> TokenPreparer for G
where
    G: Fn(&GameFrame, &str, &DatasetPaths) -> GameAgentResult<()>,
{
    fn prepare_dataset_tokens(
        &self,
        frame: &GameFrame,
        frame_uuid: &str,
        datasets: &DatasetPaths,
    ) -> GameAgentResult<()> {
        self(frame, frame_uuid, datasets)
    }
}
