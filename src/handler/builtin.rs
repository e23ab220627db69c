use crate::*;
use log::info;
use std::time::Duration;

pub fn noop_interval(_config: &AgentConfig) -> GameAgentResult<Duration> {
    Ok(NOOP_INTERVAL)
}

pub fn handle_noop(_context: &HandlerContext, _frame: &GameFrame) -> GameAgentResult<()> {
    Ok(())
}

pub fn handle_collect_frames(context: &HandlerContext, frame: &GameFrame) -> GameAgentResult<()> {
    let path = frame_path(&context.datasets.collect_frames_dir(), &new_frame_uuid());
    write_frame_png(frame, &path)
}

pub fn setup_collect_frames_for_context(context: &HandlerContext) -> GameAgentResult<()> {
    let dir = context
        .datasets
        .context_dir(&context.config.collect_frames_for_context.context);
    if !dir.is_dir() {
        create_dataset_dir(&dir)?;
        info!("Created context dataset directory {:?}", dir);
    }
    Ok(())
}

pub fn handle_collect_frames_for_context(
    context: &HandlerContext,
    frame: &GameFrame,
) -> GameAgentResult<()> {
    let dir = context
        .datasets
        .context_dir(&context.config.collect_frames_for_context.context);
    let resized_frame = frame.half_size()?;
    write_frame_png(&resized_frame, &frame_path(&dir, &new_frame_uuid()))
}

pub fn handle_collect_characters(
    context: &HandlerContext,
    frame: &GameFrame,
) -> GameAgentResult<()> {
    let frame_uuid = new_frame_uuid();
    let path = frame_path(&context.datasets.ocr_frames_dir(), &frame_uuid);
    write_frame_png(frame, &path)?;
    context
        .token_preparer
        .prepare_dataset_tokens(frame, &frame_uuid, &context.datasets)
}
