use super::error::Result;
use super::host::WindowController;
use super::surface::EditingSurface;

const MAX_ROUNDS: usize = 64;

/// Pump both halves until neither has anything queued.
///
/// Returns the number of frames delivered in total.
pub fn settle(controller: &mut WindowController, surface: &mut EditingSurface) -> Result<usize> {
    let mut total = 0;
    for _ in 0..MAX_ROUNDS {
        let handled = controller.pump()? + surface.pump()?;
        if handled == 0 {
            return Ok(total);
        }
        total += handled;
    }
    tracing::warn!(total, "bus did not settle after {MAX_ROUNDS} rounds");
    Ok(total)
}
