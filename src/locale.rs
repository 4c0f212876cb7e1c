//! Keyed display strings for block labels and tooltips.
//!
//! Every user-facing string of a block goes through a [`Localizer`], including
//! labels that only exist in English today. A missing key never fails: the
//! lookup falls back to a `[KEY]` placeholder.

use anyhow::{Context, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

pub mod keys {
    pub const LCD_CATEGORY: &str = "LCD_CATEGORY";
    pub const LCD_ID: &str = "LCD_ID";

    pub const ARD_LCD_BEGIN: &str = "ARD_LCD_BEGIN";
    pub const ARD_LCD_BEGIN_TIP: &str = "ARD_LCD_BEGIN_TIP";
    pub const LCD_SET_ON: &str = "LCD_SET_ON";
    pub const LCD_TYPE: &str = "LCD_TYPE";
    pub const LCD_SIZE: &str = "LCD_SIZE";
    pub const LCD_PIN_RS: &str = "LCD_PIN_RS";
    pub const LCD_PIN_EN: &str = "LCD_PIN_EN";
    pub const LCD_PIN_D4: &str = "LCD_PIN_D4";
    pub const LCD_PIN_D5: &str = "LCD_PIN_D5";
    pub const LCD_PIN_D6: &str = "LCD_PIN_D6";
    pub const LCD_PIN_D7: &str = "LCD_PIN_D7";
    pub const LCD_I2C_ADDRESS: &str = "LCD_I2C_ADDRESS";

    pub const ARD_LCD_PRINT: &str = "ARD_LCD_PRINT";
    pub const ARD_LCD_PRINT_TIP: &str = "ARD_LCD_PRINT_TIP";
    pub const LCD_PRINT_TO: &str = "LCD_PRINT_TO";

    pub const ARD_LCD_SET_CURSOR_TIP: &str = "ARD_LCD_SET_CURSOR_TIP";
    pub const LCD_SET_CURSOR: &str = "LCD_SET_CURSOR";
    pub const LCD_COL: &str = "LCD_COL";
    pub const LCD_ROW: &str = "LCD_ROW";

    pub const ARD_LCD_CLEAR_TIP: &str = "ARD_LCD_CLEAR_TIP";
    pub const LCD_CLEAR: &str = "LCD_CLEAR";
}

/// Lookup of display strings by fixed key.
pub trait Localizer {
    fn lookup(&self, key: &str) -> Option<String>;

    /// Like [`Localizer::lookup`] but yields `[KEY]` for unknown keys.
    fn message(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(text) => text,
            None => {
                tracing::debug!(key, "missing message, using placeholder");
                placeholder(key)
            }
        }
    }
}

pub fn placeholder(key: &str) -> String {
    format!("[{}]", key)
}

static ENGLISH: Lazy<IndexMap<String, String>> = Lazy::new(|| {
    use self::keys::*;
    [
        (LCD_CATEGORY, "LCD"),
        (LCD_ID, "lcd#"),
        (ARD_LCD_BEGIN, "LCD"),
        (
            ARD_LCD_BEGIN_TIP,
            "Initializes the LCD and sets its type, size and wiring",
        ),
        (LCD_SET_ON, "Set LCD On"),
        (LCD_TYPE, "lcd type"),
        (LCD_SIZE, "lcd size"),
        (LCD_PIN_RS, "RS"),
        (LCD_PIN_EN, "EN"),
        (LCD_PIN_D4, "D4"),
        (LCD_PIN_D5, "D5"),
        (LCD_PIN_D6, "D6"),
        (LCD_PIN_D7, "D7"),
        (LCD_I2C_ADDRESS, "I2C Address"),
        (ARD_LCD_PRINT, "text"),
        (ARD_LCD_PRINT_TIP, "Prints text or a value at the cursor position"),
        (LCD_PRINT_TO, "Print to LCD"),
        (
            ARD_LCD_SET_CURSOR_TIP,
            "Moves the cursor to the given column and row",
        ),
        (LCD_SET_CURSOR, "Set Cursor"),
        (LCD_COL, "Col"),
        (LCD_ROW, "Row"),
        (ARD_LCD_CLEAR_TIP, "Clears the display and homes the cursor"),
        (LCD_CLEAR, "Clear LCD"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
});

/// In-memory message table.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: IndexMap<String, String>,
}

impl MessageCatalog {
    /// Catalog with no messages; every lookup yields a placeholder.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self {
            messages: ENGLISH.clone(),
        }
    }

    /// Replace or add messages, keeping the catalog's key order for existing keys.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in overrides {
            self.messages.insert(k.into(), v.into());
        }
        self
    }

    /// Apply overrides from a flat JSON object (`{"KEY": "text", ...}`).
    pub fn load_json_file(self, path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
        let overrides: IndexMap<String, String> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse messages in {}", path))?;
        tracing::info!(path = %path, count = overrides.len(), "loaded message overrides");
        Ok(self.with_overrides(overrides))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localizer for MessageCatalog {
    fn lookup(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_placeholder() {
        let catalog = MessageCatalog::empty();
        assert_eq!(catalog.lookup(keys::LCD_CLEAR), None);
        assert_eq!(catalog.message(keys::LCD_CLEAR), "[LCD_CLEAR]");
    }

    #[test]
    fn overrides_replace_defaults() {
        let catalog = MessageCatalog::english().with_overrides([(keys::LCD_CLEAR, "LCD leeren")]);
        assert_eq!(catalog.message(keys::LCD_CLEAR), "LCD leeren");
        assert_eq!(catalog.message(keys::LCD_ID), "lcd#");
        assert_eq!(catalog.len(), MessageCatalog::english().len());
    }
}
