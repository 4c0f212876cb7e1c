use lcdblocks::board::BoardCatalog;
use lcdblocks::generator::toolbox_xml::generate_toolbox_xml;
use lcdblocks::locale::MessageCatalog;

#[test]
fn toolbox_lists_lcd_blocks_in_order() {
    let registry = lcdblocks::lcd_registry(&BoardCatalog::new(), &MessageCatalog::english()).unwrap();
    let xml = generate_toolbox_xml(&registry, "LCD & Display");

    let doc = roxmltree::Document::parse(&xml).expect("well-formed toolbox XML");
    let category = doc
        .descendants()
        .find(|n| n.has_tag_name("category"))
        .expect("category element");
    assert_eq!(category.attribute("name"), Some("LCD & Display"));
    assert_eq!(category.attribute("colour"), Some("50"));

    let types: Vec<&str> = category
        .children()
        .filter(|n| n.has_tag_name("block"))
        .filter_map(|n| n.attribute("type"))
        .collect();
    assert_eq!(types, ["lcd_begin", "lcd_print", "lcd_set_cursor", "lcd_clear"]);
}

#[test]
fn value_inputs_get_typed_shadows() {
    let registry = lcdblocks::lcd_registry(&BoardCatalog::new(), &MessageCatalog::english()).unwrap();
    let xml = generate_toolbox_xml(&registry, "LCD");
    let doc = roxmltree::Document::parse(&xml).unwrap();

    let shadow_for = |block: &str, input: &str| -> Option<String> {
        doc.descendants()
            .filter(|n| n.has_tag_name("block") && n.attribute("type") == Some(block))
            .flat_map(|b| b.children())
            .find(|v| v.has_tag_name("value") && v.attribute("name") == Some(input))
            .and_then(|v| v.children().find(|s| s.has_tag_name("shadow")))
            .and_then(|s| s.attribute("type").map(str::to_string))
    };
    assert_eq!(shadow_for("lcd_set_cursor", "COL").as_deref(), Some("math_number"));
    assert_eq!(shadow_for("lcd_set_cursor", "ROW").as_deref(), Some("math_number"));
    assert_eq!(shadow_for("lcd_print", "TEXT").as_deref(), Some("text"));
    assert_eq!(shadow_for("lcd_clear", "ID"), None);
}

#[test]
fn export_json_exposes_visibility_rule() {
    let registry = lcdblocks::lcd_registry(&BoardCatalog::new(), &MessageCatalog::english()).unwrap();
    let json = serde_json::to_value(&registry).unwrap();
    let begin = &json["blocks"]["lcd_begin"];
    assert_eq!(begin["type"], "lcd_begin");
    assert_eq!(begin["hue"], 50);
    assert_eq!(begin["visibility"]["field"], "LCDTYPE");
    assert_eq!(begin["visibility"]["cases"]["i2c"], "i2cAddressGroup");
}
