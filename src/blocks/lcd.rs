//! Blocks for the Arduino LiquidCrystal library.
//!
//! The function syntax is documented at
//! <http://arduino.cc/en/Reference/LiquidCrystal>.

use crate::error::SchemaError;
use crate::locale::keys;
use crate::model::{
    BlockSchema, Connections, DisplayHue, FieldDefinition, FieldGroup, OptionSet, TypeCheck,
    VisibilityRule,
};
use crate::registry::BlockRegistry;

use super::SchemaContext;

/// Hue shared by every block in the LCD category.
pub const LCD_HUE: DisplayHue = DisplayHue(50);

pub const LCD_BEGIN: &str = "lcd_begin";
pub const LCD_PRINT: &str = "lcd_print";
pub const LCD_SET_CURSOR: &str = "lcd_set_cursor";
pub const LCD_CLEAR: &str = "lcd_clear";

/// Name of the `lcd_begin` group holding the parallel-bus pins.
pub const STANDARD_PINS_GROUP: &str = "standardPinsGroup";
/// Name of the `lcd_begin` group holding the I2C backpack address.
pub const I2C_ADDRESS_GROUP: &str = "i2cAddressGroup";

pub const LCD_IDS: [&str; 4] = ["1", "2", "3", "4"];
pub const LCD_TYPES: [&str; 2] = ["standard", "i2c"];
pub const LCD_SIZES: [&str; 3] = ["16x2", "16x4", "20x4"];
pub const I2C_ADDRESSES: [&str; 8] = [
    "0x27", "0x3F", "0x20", "0x38", "0x3E", "0x62", "0x3C", "0x3D",
];

/// Parallel-bus pins in wiring order, paired with their label keys.
pub const PARALLEL_PINS: [(&str, &str); 6] = [
    ("RS", keys::LCD_PIN_RS),
    ("EN", keys::LCD_PIN_EN),
    ("D4", keys::LCD_PIN_D4),
    ("D5", keys::LCD_PIN_D5),
    ("D6", keys::LCD_PIN_D6),
    ("D7", keys::LCD_PIN_D7),
];

const HELP_BASE: &str = "http://arduino.cc/en/Reference/";

fn statement(block_type: &str, help: &str, tooltip: String) -> BlockSchema {
    let mut schema = BlockSchema::new(block_type, LCD_HUE);
    schema.help_url = Some(format!("{}{}", HELP_BASE, help));
    schema.tooltip = tooltip;
    schema.connections = Connections::statement();
    schema
}

fn id_row(ctx: &SchemaContext<'_>) -> FieldGroup {
    FieldGroup::dummy()
        .label(ctx.msg(keys::LCD_ID))
        .field(id_dropdown())
}

fn id_dropdown() -> FieldDefinition {
    FieldDefinition::dropdown("ID", OptionSet::fixed(LCD_IDS))
}

/// `lcd.begin()`: display number, wiring type, size and either the parallel
/// pins or the I2C address.
pub fn lcd_begin(ctx: &SchemaContext<'_>) -> BlockSchema {
    let mut schema = statement(LCD_BEGIN, "LiquidCrystalBegin", ctx.msg(keys::ARD_LCD_BEGIN_TIP));

    schema.groups.push(
        FieldGroup::dummy()
            .label(ctx.msg(keys::ARD_LCD_BEGIN))
            .label(ctx.msg(keys::LCD_SET_ON))
            .label(ctx.msg(keys::LCD_ID))
            .field(id_dropdown())
            .label(ctx.msg(keys::LCD_TYPE))
            .field(FieldDefinition::dropdown("LCDTYPE", OptionSet::fixed(LCD_TYPES)))
            .label(ctx.msg(keys::LCD_SIZE))
            .field(FieldDefinition::dropdown("LCDSIZE", OptionSet::fixed(LCD_SIZES))),
    );

    let mut pins = FieldGroup::dummy().named(STANDARD_PINS_GROUP);
    for (key, label) in PARALLEL_PINS {
        pins = pins.label(ctx.msg(label)).field(ctx.pin_dropdown(key));
    }
    schema.groups.push(pins);

    schema.groups.push(
        FieldGroup::dummy()
            .named(I2C_ADDRESS_GROUP)
            .label(ctx.msg(keys::LCD_I2C_ADDRESS))
            .field(FieldDefinition::dropdown(
                "I2C_ADDRESS",
                OptionSet::fixed(I2C_ADDRESSES),
            )),
    );

    schema.visibility = Some(
        VisibilityRule::new("LCDTYPE", "standard")
            .case("standard", STANDARD_PINS_GROUP)
            .case("i2c", I2C_ADDRESS_GROUP),
    );
    schema
}

/// `lcd.print()`: prints any printable expression.
pub fn lcd_print(ctx: &SchemaContext<'_>) -> BlockSchema {
    let mut schema = statement(LCD_PRINT, "LiquidCrystalPrint", ctx.msg(keys::ARD_LCD_PRINT_TIP));
    schema.groups.push(
        FieldGroup::value("TEXT", TypeCheck::Any)
            .label(ctx.msg(keys::LCD_PRINT_TO))
            .label(ctx.msg(keys::ARD_LCD_PRINT)),
    );
    schema.groups.push(id_row(ctx));
    schema
}

/// `lcd.setCursor()`: numeric column and row.
pub fn lcd_set_cursor(ctx: &SchemaContext<'_>) -> BlockSchema {
    let mut schema = statement(
        LCD_SET_CURSOR,
        "LiquidCrystalSetCursor",
        ctx.msg(keys::ARD_LCD_SET_CURSOR_TIP),
    );
    schema.groups.push(
        FieldGroup::value("COL", TypeCheck::numeric())
            .label(ctx.msg(keys::LCD_SET_CURSOR))
            .label(ctx.msg(keys::LCD_COL)),
    );
    schema
        .groups
        .push(FieldGroup::value("ROW", TypeCheck::numeric()).label(ctx.msg(keys::LCD_ROW)));
    schema.groups.push(id_row(ctx));
    schema
}

/// `lcd.clear()`.
pub fn lcd_clear(ctx: &SchemaContext<'_>) -> BlockSchema {
    let mut schema = statement(LCD_CLEAR, "LiquidCrystalClear", ctx.msg(keys::ARD_LCD_CLEAR_TIP));
    schema.groups.push(
        FieldGroup::dummy()
            .label(ctx.msg(keys::LCD_CLEAR))
            .label(ctx.msg(keys::LCD_ID))
            .field(id_dropdown()),
    );
    schema
}

/// Build and register all LCD blocks in toolbox order.
pub fn register_lcd_blocks(
    registry: &mut BlockRegistry,
    ctx: &SchemaContext<'_>,
) -> Result<(), SchemaError> {
    let builders: [fn(&SchemaContext<'_>) -> BlockSchema; 4] =
        [lcd_begin, lcd_print, lcd_set_cursor, lcd_clear];
    for build in builders {
        registry.register(build(ctx))?;
    }
    Ok(())
}
