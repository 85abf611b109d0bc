use bevy::prelude::*;

use crate::config::{AppConfig, UpdateDrawColorRequest};
use crate::constants::DEFAULT_FILL_COLOR;
use crate::css_color::is_color;
use crate::overlay::DrawColor;

/// The draw color text field: what is typed, and the last text that parsed.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DrawColorInput {
    text: String,
    last_valid: String,
}

impl Default for DrawColorInput {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_COLOR)
    }
}

impl DrawColorInput {
    pub fn new(initial: &str) -> Self {
        let last_valid = if is_color(initial) {
            initial.to_string()
        } else {
            DEFAULT_FILL_COLOR.to_string()
        };
        Self {
            text: initial.to_string(),
            last_valid,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn last_valid(&self) -> &str {
        &self.last_valid
    }

    pub fn is_valid(&self) -> bool {
        is_color(&self.text)
    }

    /// Replace the text, accepting it if it is a color. Returns true when the
    /// accepted value changed.
    pub fn set_text(&mut self, text: String) -> bool {
        self.text = text;
        if self.is_valid() && self.text != self.last_valid {
            self.last_valid = self.text.clone();
            return true;
        }
        false
    }

    pub fn reset(&mut self) -> bool {
        self.set_text(DEFAULT_FILL_COLOR.to_string())
    }
}

/// Startup system to restore the last accepted color from config
pub fn init_color_input(config: Res<AppConfig>, mut input: ResMut<DrawColorInput>) {
    *input = DrawColorInput::new(&config.data.draw_color);
}

/// Hand the accepted color to the draw interaction overlay and remember it.
pub fn publish_draw_color(
    input: Res<DrawColorInput>,
    mut draw_color: ResMut<DrawColor>,
    mut color_events: MessageWriter<UpdateDrawColorRequest>,
) {
    if draw_color.0.as_deref() == Some(input.last_valid()) {
        return;
    }
    draw_color.0 = Some(input.last_valid().to_string());
    color_events.write(UpdateDrawColorRequest {
        color: input.last_valid().to_string(),
    });
    debug!("Draw color set to {}", input.last_valid());
}
