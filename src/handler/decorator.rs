use crate::*;
use std::time::Duration;

/// Wraps a handler so that each successful call is followed by a sleep of
/// the interval `interval` resolves from the agent's configuration. The
/// interval is looked up on every call, so configuration changes apply to the
/// next frame.
#[derive(new)]
pub struct Paced<H, I> {
    handler: H,
    interval: I,
}

impl<H, I> FrameHandler for Paced<H, I>
where
    H: FrameHandler,
    I: Fn(&AgentConfig) -> GameAgentResult<Duration>,
{
    fn handle_frame(
        &mut self,
        context: &HandlerContext,
        frame: &GameFrame,
    ) -> GameAgentResult<()> {
        self.handler.handle_frame(context, frame)?;
        let interval = (self.interval)(context.config)?;
        context.sleeper.sleep(interval);
        Ok(())
    }
}
