//! Browser text overlay

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::{HIDDEN_STYLE, line_style, section_class, section_id, section_style};
use crate::compose::{CopyLine, CopyRole, stage_layout};
use crate::settings::Settings;
use crate::sim::{Stage, StoryState};

struct Section {
    stage: Stage,
    element: Element,
    lines: Vec<(CopyLine, Element)>,
}

/// One overlay section per stage, inside `#overlay`
pub struct Overlay {
    sections: Vec<Section>,
    restart: Option<Element>,
}

impl Overlay {
    /// Create every stage's text elements up front, all hidden
    pub fn build(document: &Document) -> Result<Self, JsValue> {
        let root = document
            .get_element_by_id("overlay")
            .ok_or_else(|| JsValue::from_str("missing #overlay element"))?;

        let mut sections = Vec::with_capacity(Stage::ALL.len());
        let mut restart = None;

        for stage in Stage::ALL {
            let element = document.create_element("section")?;
            element.set_id(&section_id(stage));
            element.set_class_name(&section_class(stage, false));
            element.set_attribute("style", HIDDEN_STYLE)?;

            let mut lines = Vec::new();
            for line in stage_layout(stage).copy {
                let tag = if line.role == CopyRole::Restart { "button" } else { "p" };
                let el = document.create_element(tag)?;
                el.set_class_name(line.role.class());
                el.set_text_content(Some(line.text));
                if line.role == CopyRole::Restart {
                    el.set_id("restart-btn");
                    restart = Some(el.clone());
                }
                element.append_child(&el)?;
                lines.push((*line, el));
            }

            root.append_child(&element)?;
            sections.push(Section {
                stage,
                element,
                lines,
            });
        }

        log::debug!("Overlay built ({} sections)", sections.len());
        Ok(Self { sections, restart })
    }

    /// The restart control on the closing stage
    pub fn restart_button(&self) -> Option<&Element> {
        self.restart.as_ref()
    }

    /// Restyle every section from the current state
    pub fn sync(&self, state: &StoryState, settings: &Settings) {
        for section in &self.sections {
            // Prefer the live instance over one still fading out
            let container = state
                .containers()
                .filter(|c| c.stage == section.stage)
                .last();

            let Some(container) = container else {
                let _ = section.element.set_attribute("style", HIDDEN_STYLE);
                continue;
            };

            let _ = section
                .element
                .set_attribute("style", &section_style(&container.transition()));

            let shaking = section.stage == Stage::NameReveal
                && state.is_shaking()
                && settings.effective_shake();
            let class = section_class(section.stage, shaking);
            if section.element.class_name() != class {
                section.element.set_class_name(&class);
            }

            for (line, el) in &section.lines {
                let _ = el.set_attribute("style", &line_style(&line.frame(container.elapsed)));
            }
        }
    }
}
