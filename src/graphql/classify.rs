//! graphql::classify
//!
//! Field classification: every template field is exactly one of scalar,
//! nested object, or list of objects.

use super::errors::BuildError;
use super::types::{FieldDescriptor, TypeDescriptor};

/// Rendering shape of a template field.
///
/// Object and list shapes carry the fields of the type they recurse into. For
/// a list that is always the element type, never an element value.
#[derive(Debug, Clone)]
pub enum Shape {
    Scalar,
    Object(Vec<FieldDescriptor>),
    List(Vec<FieldDescriptor>),
}

/// Classify one field by its declared type.
///
/// A list of scalars is a scalar selection; nested lists classify by their
/// innermost element.
///
/// # Errors
///
/// Returns [`BuildError::UnsupportedField`] when the field's type (or list
/// element type) has no selection equivalent.
pub fn classify(field: &FieldDescriptor) -> Result<Shape, BuildError> {
    match field.type_descriptor() {
        TypeDescriptor::Scalar => Ok(Shape::Scalar),
        TypeDescriptor::Object(fields) => Ok(Shape::Object(fields)),
        TypeDescriptor::List(element) => classify_element(field, *element),
        TypeDescriptor::Unsupported(kind) => Err(unsupported(field, kind)),
    }
}

fn classify_element(field: &FieldDescriptor, element: TypeDescriptor) -> Result<Shape, BuildError> {
    match element {
        TypeDescriptor::Scalar => Ok(Shape::Scalar),
        TypeDescriptor::Object(fields) => Ok(Shape::List(fields)),
        TypeDescriptor::List(inner) => classify_element(field, *inner),
        TypeDescriptor::Unsupported(kind) => Err(unsupported(field, kind)),
    }
}

fn unsupported(field: &FieldDescriptor, kind: &'static str) -> BuildError {
    BuildError::UnsupportedField {
        field: field.name().to_string(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::graphql::GraphQLType;

    struct Port;

    impl GraphQLType for Port {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::object([
                FieldDescriptor::new::<u16>("number"),
                FieldDescriptor::new::<String>("protocol"),
            ])
        }
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<&str> {
        fields.iter().map(FieldDescriptor::name).collect()
    }

    #[test]
    fn primitives_are_scalars() {
        for field in [
            FieldDescriptor::new::<String>("name"),
            FieldDescriptor::new::<i64>("size"),
            FieldDescriptor::new::<bool>("locked"),
            FieldDescriptor::new::<Option<f64>>("usage"),
        ] {
            assert!(matches!(classify(&field).unwrap(), Shape::Scalar));
        }
    }

    #[test]
    fn struct_is_object() {
        let field = FieldDescriptor::new::<Port>("port");
        match classify(&field).unwrap() {
            Shape::Object(fields) => assert_eq!(names(&fields), ["number", "protocol"]),
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn list_of_struct_uses_element_fields() {
        let field = FieldDescriptor::new::<Vec<Port>>("ports");
        match classify(&field).unwrap() {
            Shape::List(fields) => assert_eq!(names(&fields), ["number", "protocol"]),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn nested_lists_classify_by_innermost_element() {
        let field = FieldDescriptor::new::<Vec<Vec<Port>>>("portGroups");
        assert!(matches!(classify(&field).unwrap(), Shape::List(_)));
    }

    #[test]
    fn list_of_scalars_is_scalar() {
        let field = FieldDescriptor::new::<Vec<String>>("tags");
        assert!(matches!(classify(&field).unwrap(), Shape::Scalar));
    }

    #[test]
    fn map_field_fails_with_field_name() {
        let field = FieldDescriptor::new::<HashMap<String, String>>("labels");
        let err = classify(&field).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedField {
                field: "labels".to_string(),
                kind: "map",
            }
        );
    }

    #[test]
    fn list_of_maps_fails() {
        let field = FieldDescriptor::new::<Vec<HashMap<String, u8>>>("env");
        assert!(classify(&field).is_err());
    }
}
