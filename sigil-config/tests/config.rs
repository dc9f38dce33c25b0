use std::fs;
use sigil_config::{ConfigError, EnumConstantConfig, SigilConfig};
use sigil_core::{AttributeValue, DefinitionError};

const CONFIG: &str = r#"{
    "imports": ["com.example.anno.*"],
    "annotationImports": ["com.example.bean.SupportEnum"],
    "enums": [
        {
            "name": "com.example.bean.SupportEnum",
            "constants": ["ENUM_VALUE_1", { "name": "ENUM_VALUE_2", "value": "two" }, "ENUM_VALUE_3"]
        }
    ],
    "schemas": [
        {
            "name": "com.example.anno.MyAnnotationValueEnum",
            "attributes": [
                { "name": "supportEnum", "kind": "enum:com.example.bean.SupportEnum" },
                { "name": "supportEnumDef", "kind": "enum:com.example.bean.SupportEnum", "default": "ENUM_VALUE_2" }
            ]
        },
        {
            "name": "com.example.anno.MyAnnotationValueArray",
            "attributes": [
                { "name": "value", "kind": "long[]" },
                { "name": "stringArrayDef", "kind": "String[]", "default": ["XYZ"] },
                { "name": "label", "kind": "String", "default": null }
            ]
        },
        {
            "name": "com.example.anno.MyAnnotationNested",
            "attributes": [
                { "name": "inner", "kind": "@com.example.anno.MyAnnotationValueEnum" }
            ]
        }
    ]
}"#;

#[test]
fn parses_documents_with_both_constant_forms() {
    let config = SigilConfig::from_json_str(CONFIG).unwrap();
    assert_eq!(config.imports, ["com.example.anno.*"]);
    assert_eq!(config.enums[0].constants[0], EnumConstantConfig::Name("ENUM_VALUE_1".into()));
    assert_eq!(
        config.enums[0].constants[1],
        EnumConstantConfig::Valued { name: "ENUM_VALUE_2".into(), value: "two".into() }
    );
    assert_eq!(SigilConfig::from_json_str("{}").unwrap(), SigilConfig::default());
}

#[test]
fn built_environment_compiles_statements() {
    let environment = SigilConfig::from_json_str(CONFIG).unwrap().build().unwrap();
    let compiler = environment.compiler();

    let compiled = compiler
        .compile("@MyAnnotationValueEnum(supportEnum = ENUM_VALUE_3) select * from Bean")
        .unwrap();
    let directive = &compiled.directives[0];
    assert_eq!(directive.name(), "com.example.anno.MyAnnotationValueEnum");
    assert_eq!(directive.get("supportEnum").unwrap().as_enum().unwrap().name.as_ref(), "ENUM_VALUE_3");
    let default = directive.get("supportEnumDef").unwrap().as_enum().unwrap();
    assert_eq!(default.name.as_ref(), "ENUM_VALUE_2");
    assert_eq!(default.value.as_ref(), "two");

    let compiled = compiler.compile("@MyAnnotationValueArray({1, 2}) select 1").unwrap();
    let directive = &compiled.directives[0];
    assert_eq!(
        directive.get("stringArrayDef"),
        Some(&AttributeValue::Array(vec![AttributeValue::from("XYZ")]))
    );
    assert_eq!(directive.get("label"), Some(&AttributeValue::Null));
}

#[test]
fn configured_compilers_validate_hints() {
    let environment = SigilConfig::from_json_str(CONFIG).unwrap().build().unwrap();
    let compiler = environment.compiler();
    assert!(compiler.compile("@Hint('ITERATE_ONLY') @Name('q') select 1").is_ok());

    let empty = SigilConfig::from_json_str("{}").unwrap().build().unwrap().compiler();
    for (text, message) in [
        ("@Hint('XXX') select * from Bean", "Hint annotation value 'XXX' is not one of the known values"),
        ("@Hint('ITERATE_ONLY=5') select * from Bean", "Hint 'ITERATE_ONLY' does not accept a parameter value"),
    ] {
        let err = empty.compile(text).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Failed to process statement annotations: {} [{}]", message, text)
        );
    }
}

#[test]
fn definition_errors_surface_from_build() {
    let duplicate = r#"{ "enums": [ { "name": "a.Level", "constants": ["LOW", "low"] } ] }"#;
    let err = SigilConfig::from_json_str(duplicate).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::Definition(DefinitionError::DuplicateEnumConstant { .. })));

    let unknown_kind = r#"{ "schemas": [ { "name": "a.Tuning", "attributes": [ { "name": "x", "kind": "decimal" } ] } ] }"#;
    let err = SigilConfig::from_json_str(unknown_kind).unwrap().build().unwrap_err();
    assert_eq!(err.to_string(), "Unknown attribute kind 'decimal'");

    let dangling = r#"{ "schemas": [ { "name": "a.Tuning", "attributes": [ { "name": "x", "kind": "enum:a.Missing" } ] } ] }"#;
    let err = SigilConfig::from_json_str(dangling).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::Definition(DefinitionError::UnknownReference { .. })));

    let bad_import = r#"{ "imports": ["com..example"] }"#;
    let err = SigilConfig::from_json_str(bad_import).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::Definition(DefinitionError::InvalidImport(_))));
}

#[test]
fn invalid_defaults_are_rejected() {
    let nested_default = r#"{ "schemas": [
        { "name": "a.Inner" },
        { "name": "a.Outer", "attributes": [ { "name": "inner", "kind": "@a.Inner", "default": "x" } ] }
    ] }"#;
    let err = SigilConfig::from_json_str(nested_default).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDefault { .. }));

    let null_int = r#"{ "schemas": [ { "name": "a.Tuning", "attributes": [ { "name": "x", "kind": "int", "default": null } ] } ] }"#;
    let err = SigilConfig::from_json_str(null_int).unwrap().build().unwrap_err();
    assert!(matches!(err, ConfigError::Definition(DefinitionError::DefaultMismatch { .. })));
}

#[test]
fn reads_configuration_files() {
    let path = std::env::temp_dir().join(format!("sigil-config-{}.json", std::process::id()));
    fs::write(&path, CONFIG).unwrap();
    let config = SigilConfig::from_path(&path);
    fs::remove_file(&path).unwrap();
    assert_eq!(config.unwrap().schemas.len(), 3);

    let err = SigilConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(matches!(SigilConfig::from_json_str("{ nope").unwrap_err(), ConfigError::Json(_)));
}
