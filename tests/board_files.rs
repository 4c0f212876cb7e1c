use camino::Utf8PathBuf;
use lcdblocks::board::{BoardCatalog, BoardRegistry};
use lcdblocks::locale::{Localizer, MessageCatalog, keys};
use std::fs;

const ESP32: &str = r#"{
  "name": "esp32",
  "description": "ESP32 DevKit",
  "digital_pins": ["2", "4", "5", "12", "13"]
}"#;

fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path).expect("utf-8 temp path")
}

#[test]
fn loads_profiles_from_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested = temp_dir.path().join("vendor/espressif");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("esp32.json"), ESP32).unwrap();
    fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

    let mut catalog = BoardCatalog::new();
    let loaded = catalog.load_dir(utf8(temp_dir.path().to_path_buf())).unwrap();
    assert_eq!(loaded, ["esp32"]);

    catalog.select("esp32").unwrap();
    assert_eq!(catalog.digital_pins(), ["2", "4", "5", "12", "13"]);
    assert!(catalog.selected().analog_pins.is_empty());
    assert!(catalog.names().any(|n| n == "uno"));
}

#[cfg(unix)]
#[test]
fn symlink_loop_does_not_abort_directory_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested = temp_dir.path().join("vendor");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("esp32.json"), ESP32).unwrap();
    std::os::unix::fs::symlink(temp_dir.path(), nested.join("loop")).unwrap();

    let mut catalog = BoardCatalog::new();
    let loaded = catalog.load_dir(utf8(temp_dir.path().to_path_buf())).unwrap();
    assert_eq!(loaded, ["esp32"]);
}

#[test]
fn missing_board_directory_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut catalog = BoardCatalog::new();
    let missing = utf8(temp_dir.path().join("absent"));
    assert!(matches!(
        catalog.load_dir(missing),
        Err(lcdblocks::BoardError::Walk(_))
    ));
}

#[test]
fn board_file_replaces_builtin_profile() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("uno.json");
    fs::write(&path, r#"{"name": "uno", "digital_pins": ["7", "8"]}"#).unwrap();

    let mut catalog = BoardCatalog::new();
    assert_eq!(catalog.load_file(utf8(path)).unwrap(), "uno");
    assert_eq!(catalog.digital_pins(), ["7", "8"]);

    let registry = lcdblocks::lcd_registry(&catalog, &MessageCatalog::english()).unwrap();
    let rs = registry.get("lcd_begin").and_then(|s| s.field("RS")).unwrap();
    assert_eq!(rs.options().map(|o| o.options().len()), Some(2));
}

#[test]
fn message_overrides_load_from_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("de.json");
    fs::write(&path, r#"{"LCD_CLEAR": "LCD leeren", "LCD_ID": "lcd Nr."}"#).unwrap();

    let messages = MessageCatalog::english().load_json_file(utf8(path)).unwrap();
    assert_eq!(messages.message(keys::LCD_CLEAR), "LCD leeren");
    assert_eq!(messages.message(keys::LCD_SET_CURSOR), "Set Cursor");

    let registry = lcdblocks::lcd_registry(&BoardCatalog::new(), &messages).unwrap();
    let clear = registry.get("lcd_clear").unwrap();
    assert_eq!(
        clear.groups[0].labels().collect::<Vec<_>>(),
        ["LCD leeren", "lcd Nr."]
    );
}

#[test]
fn malformed_message_file_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("bad.json");
    fs::write(&path, "[1, 2]").unwrap();
    assert!(MessageCatalog::english().load_json_file(utf8(path)).is_err());
}
