use settings_schema::decoder::{DecodeOptions, Decoder};
use settings_schema::domain::FieldType;
use settings_schema::schema::{SchemaDocument, SchemaError};
use std::fs;
use tempfile::TempDir;

fn quiet() -> Decoder {
    Decoder::new(DecodeOptions {
        warn_on_unknown: false,
        ..Default::default()
    })
}

#[test]
fn test_load_schema_files() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let schema_json = r#"
{
    "types": {
        "irc/enabled": {
            "doc": "Connect to chat.",
            "type": { "id": "bool" }
        }
    }
}
"#;
    fs::write(root.join("schema.json"), schema_json)?;

    let schema_yaml = r#"
types:
  song/volume:
    doc: Player volume.
    type:
      id: percentage
      optional: true
"#;
    fs::write(root.join("schema.yml"), schema_yaml)?;

    let schema_toml = r#"
[types."song/max-duration"]
doc = "Longest song that may be requested."

[types."song/max-duration".type]
id = "duration"
optional = true
"#;
    fs::write(root.join("schema.toml"), schema_toml)?;

    let json = SchemaDocument::from_path(&root.join("schema.json"))?;
    assert_eq!(json.get("irc/enabled").unwrap().doc, "Connect to chat.");

    let yaml = SchemaDocument::from_path(&root.join("schema.yml"))?;
    let fields = yaml.decode(&quiet())?;
    assert_eq!(fields[0].field_type, FieldType::Percentage { optional: true });

    let toml = SchemaDocument::from_path(&root.join("schema.toml"))?;
    let fields = toml.decode(&quiet())?;
    assert_eq!(fields[0].key, "song/max-duration");
    assert_eq!(fields[0].field_type, FieldType::Duration { optional: true });

    Ok(())
}

#[test]
fn test_load_schema_dir_merges_files() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::write(
        root.join("01-base.yaml"),
        r#"
types:
  irc/channel:
    doc: Old doc.
    type:
      id: string
  irc/enabled:
    type:
      id: bool
"#,
    )?;
    fs::write(
        root.join("02-override.json"),
        r##"{ "types": { "irc/channel": { "doc": "Channel to join.", "type": { "id": "string", "placeholder": "#channel" } } } }"##,
    )?;
    fs::write(root.join("README.md"), "not a schema")?;
    fs::create_dir_all(root.join("nested"))?;

    let document = SchemaDocument::load(root)?;
    assert_eq!(document.len(), 2);

    let fields = document.decode(&quiet())?;
    let channel = fields.iter().find(|f| f.key == "irc/channel").unwrap();
    assert_eq!(channel.doc, "Channel to join.");
    match &channel.field_type {
        FieldType::String { placeholder, .. } => {
            assert_eq!(placeholder.as_deref(), Some("#channel"));
        }
        other => panic!("Expected string field, got {:?}", other),
    }
    assert_eq!(channel.group(), Some("irc"));

    Ok(())
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("schema.ini");
    fs::write(&path, "types = {}").unwrap();

    let err = SchemaDocument::from_path(&path).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = SchemaDocument::from_path(&temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
}

#[test]
fn test_invalid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("schema.yaml");
    fs::write(&path, "types:\n  a:\n    type:\n      optional: true\n").unwrap();

    let err = SchemaDocument::from_path(&path).unwrap_err();
    assert!(matches!(err, SchemaError::Yaml(_)));
}

#[test]
fn test_empty_dir() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let document = SchemaDocument::from_dir(temp_dir.path())?;
    assert!(document.is_empty());
    assert!(document.decode(&quiet())?.is_empty());
    Ok(())
}
