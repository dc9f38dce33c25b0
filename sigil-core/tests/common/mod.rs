#![allow(dead_code)]

use std::sync::Arc;
use sigil_core::{
    AnnotationCompiler, AttributeDefinition, AttributeKind, AttributeValue, DirectiveSchema, EnumConstant,
    EnumDefinition, ImportTable, RegistryBuilder, SchemaRegistry,
};

pub const ANNO: &str = "com.example.anno";
pub const SUPPORT_ENUM: &str = "com.example.bean.SupportEnum";

pub fn qualified(simple: &str) -> String {
    format!("{}.{}", ANNO, simple)
}

pub fn support_constant(name: &str) -> AttributeValue {
    AttributeValue::Enum(EnumConstant {
        enum_name: Arc::from(SUPPORT_ENUM),
        name: Arc::from(name),
        value: Arc::from(name),
    })
}

fn schema(simple: &str, attributes: Vec<AttributeDefinition>) -> DirectiveSchema {
    DirectiveSchema::new(qualified(simple), attributes)
}

/// Registry with the annotation fixtures used across the integration tests
pub fn registry() -> Arc<SchemaRegistry> {
    use AttributeDefinition as A;
    use AttributeKind as K;

    let mut builder = RegistryBuilder::new();
    builder
        .register_enum(EnumDefinition::from_names(
            SUPPORT_ENUM,
            ["ENUM_VALUE_1", "ENUM_VALUE_2", "ENUM_VALUE_3"],
        ))
        .unwrap();

    let schemas = vec![
        schema("MyAnnotationSimple", Vec::new()),
        schema("MyAnnotationValue", vec![A::required("value", K::STRING)]),
        schema("MyAnnotationValueDefaulted", vec![A::optional("value", K::STRING, "XYZ")]),
        schema(
            "MyAnnotationValuePair",
            vec![
                A::required("stringVal", K::STRING),
                A::required("booleanVal", K::BOOLEAN),
                A::required("intVal", K::INT),
                A::required("longVal", K::LONG),
                A::required("charVal", K::CHAR),
                A::required("byteVal", K::BYTE),
                A::required("shortVal", K::SHORT),
                A::required("doubleVal", K::DOUBLE),
                A::optional("stringValDef", K::STRING, "def"),
                A::optional("intValDef", K::INT, 100),
                A::optional("longValDef", K::LONG, 200i64),
                A::optional("booleanValDef", K::BOOLEAN, true),
                A::optional("charValDef", K::CHAR, AttributeValue::Char('D')),
                A::optional("doubleValDef", K::DOUBLE, 1.1),
            ],
        ),
        schema(
            "MyAnnotationValueArray",
            vec![
                A::required("value", K::array_of(K::LONG)),
                A::required("doubleArray", K::array_of(K::DOUBLE)),
                A::required("intArray", K::array_of(K::INT)),
                A::required("stringArray", K::array_of(K::STRING)),
                A::optional("stringArrayDef", K::array_of(K::STRING), vec!["XYZ"]),
            ],
        ),
        schema(
            "MyAnnotationValueEnum",
            vec![
                A::required("supportEnum", K::enumeration(SUPPORT_ENUM)),
                A::optional("supportEnumDef", K::enumeration(SUPPORT_ENUM), support_constant("ENUM_VALUE_2")),
            ],
        ),
        schema("MyAnnotationNestableSimple", Vec::new()),
        schema(
            "MyAnnotationNestableValues",
            vec![
                A::optional("val", K::INT, -1),
                A::optional("arr", K::array_of(K::INT), vec![1, 2]),
            ],
        ),
        schema("MyAnnotationNestableNestable", vec![A::required("value", K::STRING)]),
        schema(
            "MyAnnotationNested",
            vec![
                A::required("nestableSimple", K::directive(qualified("MyAnnotationNestableSimple"))),
                A::required("nestableValues", K::directive(qualified("MyAnnotationNestableValues"))),
                A::required("nestableNestable", K::directive(qualified("MyAnnotationNestableNestable"))),
            ],
        ),
        schema(
            "MyAnnotationDecimal",
            vec![
                A::required("value", K::DOUBLE),
                A::optional("floatVal", K::FLOAT, AttributeValue::Float(0.5)),
                A::optional("floatArray", K::array_of(K::FLOAT), AttributeValue::Array(Vec::new())),
            ],
        ),
        schema(
            "MyAnnotationNullable",
            vec![A::required("values", K::nullable_array_of(K::STRING))],
        ),
        DirectiveSchema::new(
            "com.example.other.MyAnnotationValueEnumTwo",
            vec![A::required("supportEnum", K::enumeration(SUPPORT_ENUM))],
        ),
    ];
    for schema in schemas {
        builder.register_schema(schema).unwrap();
    }

    Arc::new(builder.build().unwrap())
}

/// Compiler importing every fixture annotation with a wildcard
pub fn compiler() -> AnnotationCompiler {
    let mut imports = ImportTable::new();
    imports.add_import("com.example.anno.*").unwrap();
    AnnotationCompiler::new(registry(), Arc::new(imports))
}

pub fn error_of(compiler: &AnnotationCompiler, text: &str) -> String {
    match compiler.compile(text) {
        Ok(_) => panic!("expected '{}' to fail", text),
        Err(err) => err.to_string(),
    }
}
