//! Platform abstraction layer
//!
//! The story text lives in a DOM overlay above the canvas. The overlay is
//! built from the composition table and restyled every frame from the
//! simulation, so text and canvas stay in lockstep.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use crate::compose::{Backdrop, CopyFrame};
use crate::sim::Stage;
use crate::sim::container::TransitionFrame;

/// DOM id of a stage's overlay section
pub fn section_id(stage: Stage) -> String {
    format!("stage-{}", stage.as_str())
}

/// Class list of a stage section; text colours key off the backdrop class
pub fn section_class(stage: Stage, shaking: bool) -> String {
    let backdrop = Backdrop::for_stage(stage).class();
    if shaking {
        format!("stage {} shake", backdrop)
    } else {
        format!("stage {}", backdrop)
    }
}

/// Inline style for a mounted stage section
pub fn section_style(transition: &TransitionFrame) -> String {
    format!(
        "display:flex;opacity:{:.3};transform:scale({:.4});",
        transition.opacity, transition.scale
    )
}

/// Inline style for a section that is not mounted
pub const HIDDEN_STYLE: &str = "display:none;";

/// Inline style for one text line
pub fn line_style(frame: &CopyFrame) -> String {
    // Invisible lines must not swallow clicks meant for the stage
    let events = if frame.opacity > 0.01 { "auto" } else { "none" };
    format!(
        "opacity:{:.3};transform:translate({:.1}px,{:.1}px) scale({:.4});pointer-events:{};",
        frame.opacity, frame.offset_x, frame.offset_y, frame.scale, events
    )
}
