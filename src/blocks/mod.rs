//! Block definitions grouped by toolbox category.
//!
//! - [`lcd`] – LiquidCrystal display blocks (`lcd_begin`, `lcd_print`,
//!   `lcd_set_cursor`, `lcd_clear`)

pub mod lcd;

use crate::board::BoardRegistry;
use crate::locale::Localizer;
use crate::model::{FieldDefinition, OptionSet};

/// Collaborators a block builder reads from.
#[derive(Clone, Copy)]
pub struct SchemaContext<'a> {
    pub board: &'a dyn BoardRegistry,
    pub messages: &'a dyn Localizer,
}

impl<'a> SchemaContext<'a> {
    pub fn new(board: &'a dyn BoardRegistry, messages: &'a dyn Localizer) -> Self {
        Self { board, messages }
    }

    pub fn msg(&self, key: &str) -> String {
        self.messages.message(key)
    }

    /// Dropdown over the selected board's digital pins. The board is queried
    /// on every call.
    pub fn pin_dropdown(&self, key: &str) -> FieldDefinition {
        let pins = self.board.digital_pins();
        if pins.is_empty() {
            tracing::warn!(
                board = %self.board.selected().name,
                field = key,
                "board has no digital pins"
            );
        }
        FieldDefinition::dropdown(key, OptionSet::DigitalPins(pins))
    }
}
