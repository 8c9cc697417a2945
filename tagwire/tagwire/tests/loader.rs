#![cfg(feature = "schema")]

use std::{fs, path::PathBuf};

use tagwire::{LoadError, MismatchPolicy, SchemaLoader, core::Message, core::Value};

const GEOMETRY: &str = "message Point {\n  1: f32 x;\n  2: f32 y;\n}\n";
const CIRCLE: &str = "message Circle {\n  1: Point center;\n  2: f32 radius;\n}\n";

const CIRCLE_BYTES: [u8; 17] = [
    0x0A, 0x0A, 0x0D, 0x00, 0x00, 0x80, 0x3F, 0x15, 0x00, 0x00, 0x00, 0x40, 0x15, 0x00, 0x00,
    0x40, 0x40,
];

fn temp_schema(name: &str, text: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tagwire-loader-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn sources_may_reference_each_other() {
    let mut loader = SchemaLoader::new();
    loader
        .add_str("circle.tws", CIRCLE)
        .unwrap()
        .add_str("geometry.tws", GEOMETRY)
        .unwrap();
    assert_eq!(loader.descriptors().len(), 2);
    let codec = loader.build().unwrap();

    let circle = codec.decode("Circle", &CIRCLE_BYTES).unwrap();
    let center = circle.get(1).unwrap().try_message().unwrap();
    assert_eq!(center.get(2), Some(&Value::F32(2.0)));
    assert_eq!(codec.encode(&circle).unwrap()[..], CIRCLE_BYTES);
}

#[test]
fn loads_from_file() {
    let path = temp_schema("point.tws", GEOMETRY);
    let mut loader = SchemaLoader::new();
    loader.add_file(&path).unwrap();
    let codec = loader.build().unwrap();
    let point = Message::new("Point").with(1, Value::F32(1.5));
    let bytes = codec.encode(&point).unwrap();
    assert_eq!(codec.decode("Point", &bytes).unwrap(), point);
}

#[test]
fn options_carry_into_the_codec() {
    let mut loader = SchemaLoader::new().with_options(tagwire::DecodeOptions::resilient());
    loader.add_str("geometry.tws", GEOMETRY).unwrap();
    let codec = loader.build().unwrap();
    assert_eq!(codec.options().mismatch, MismatchPolicy::Resilient);
    // x as a varint falls back to 0.0.
    let point = codec.decode("Point", &[0x08, 0x01]).unwrap();
    assert_eq!(point.get(1), Some(&Value::F32(0.0)));
}

#[test]
fn parse_error_names_the_source() {
    let err = SchemaLoader::new()
        .add_str("broken.tws", "message P {\n  1: f32 x\n}\n")
        .unwrap_err();
    assert!(
        matches!(&err, LoadError::Parse { origin, source } if origin == "broken.tws" && source.line == 2),
        "{err:?}"
    );
    assert!(err.to_string().starts_with("broken.tws: line 2:"), "{err}");
}

#[test]
fn unresolved_reference_fails_to_compile() {
    let mut loader = SchemaLoader::new();
    loader.add_str("circle.tws", CIRCLE).unwrap();
    let err = loader.build().unwrap_err();
    assert!(matches!(err, LoadError::Compile(_)), "{err:?}");
}

#[test]
fn missing_file() {
    let path = std::env::temp_dir().join("tagwire-loader-does-not-exist.tws");
    let err = SchemaLoader::new().add_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
}
