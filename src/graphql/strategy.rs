//! graphql::strategy
//!
//! Selection-set synthesis, one rule per [`Shape`].
//!
//! # Layout
//!
//! Each field is rendered on its own line, indented four spaces per level:
//!
//! ```text
//! namespace(name: $name) {
//!     name
//!     containers {
//!         name
//!         image
//!     }
//! }
//! ```
//!
//! Scalars contribute only their name. Objects and lists contribute a braced
//! block whose children sit one level deeper and whose closing brace aligns
//! with the field's own line.

use super::classify::{classify, Shape};
use super::errors::BuildError;
use super::types::FieldDescriptor;

/// One level of indentation.
const INDENT: &str = "    ";

/// Deepest nesting level a selection may reach.
pub const MAX_DEPTH: usize = 32;

/// Render the body that follows a field's name for the given shape.
///
/// Returns an empty string for scalars.
///
/// # Errors
///
/// See [`render_fields`].
pub fn render(field: &FieldDescriptor, shape: &Shape, indent: usize) -> Result<String, BuildError> {
    match shape {
        Shape::Scalar => Ok(String::new()),
        Shape::Object(fields) => block(field, fields, indent),
        // The classifier already resolved the element type's fields.
        Shape::List(fields) => block(field, fields, indent),
    }
}

/// Render `fields` as newline-separated selection lines at `indent`.
///
/// Declaration order is preserved and nothing is deduplicated.
///
/// # Errors
///
/// - [`BuildError::UnsupportedField`] for fields with no selection equivalent
/// - [`BuildError::EmptySelection`] for object types without fields
/// - [`BuildError::DepthExceeded`] past [`MAX_DEPTH`] levels
pub fn render_fields(fields: &[FieldDescriptor], indent: usize) -> Result<String, BuildError> {
    let pad = INDENT.repeat(indent);
    let mut lines = Vec::with_capacity(fields.len());

    for field in fields {
        let shape = classify(field)?;
        let body = render(field, &shape, indent)?;
        if body.is_empty() {
            lines.push(format!("{pad}{}", field.name()));
        } else {
            lines.push(format!("{pad}{} {body}", field.name()));
        }
    }

    Ok(lines.join("\n"))
}

fn block(field: &FieldDescriptor, fields: &[FieldDescriptor], indent: usize) -> Result<String, BuildError> {
    if fields.is_empty() {
        return Err(BuildError::EmptySelection {
            field: field.name().to_string(),
        });
    }
    if indent >= MAX_DEPTH {
        return Err(BuildError::DepthExceeded {
            field: field.name().to_string(),
            max: MAX_DEPTH,
        });
    }

    let inner = render_fields(fields, indent + 1)?;
    Ok(format!("{{\n{inner}\n{}}}", INDENT.repeat(indent)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{GraphQLType, TypeDescriptor};

    struct Image;

    impl GraphQLType for Image {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::object([
                FieldDescriptor::new::<String>("repository"),
                FieldDescriptor::new::<String>("tag"),
            ])
        }
    }

    struct Container;

    impl GraphQLType for Container {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::object([
                FieldDescriptor::new::<String>("name"),
                FieldDescriptor::new::<Image>("image"),
            ])
        }
    }

    struct Empty;

    impl GraphQLType for Empty {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::Object(Vec::new())
        }
    }

    /// A type that selects itself, forever.
    struct Node;

    impl GraphQLType for Node {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::object([FieldDescriptor::new::<Node>("parent")])
        }
    }

    #[test]
    fn scalar_body_is_empty() {
        let field = FieldDescriptor::new::<String>("name");
        assert_eq!(render(&field, &Shape::Scalar, 3).unwrap(), "");
    }

    #[test]
    fn object_block_closes_at_field_indent() {
        let field = FieldDescriptor::new::<Image>("image");
        let shape = classify(&field).unwrap();
        assert_eq!(
            render(&field, &shape, 1).unwrap(),
            "{\n        repository\n        tag\n    }"
        );
    }

    #[test]
    fn list_block_matches_object_block_of_element() {
        let list = FieldDescriptor::new::<Vec<Image>>("images");
        let object = FieldDescriptor::new::<Image>("images");
        let list_body = render(&list, &classify(&list).unwrap(), 2).unwrap();
        let object_body = render(&object, &classify(&object).unwrap(), 2).unwrap();
        assert_eq!(list_body, object_body);
    }

    #[test]
    fn nested_objects_indent_per_level() {
        let fields = [FieldDescriptor::new::<Vec<Container>>("containers")];
        let expected = [
            "containers {",
            "    name",
            "    image {",
            "        repository",
            "        tag",
            "    }",
            "}",
        ]
        .join("\n");
        assert_eq!(render_fields(&fields, 0).unwrap(), expected);
    }

    #[test]
    fn fields_keep_declaration_order_and_duplicates() {
        let fields = [
            FieldDescriptor::new::<String>("b"),
            FieldDescriptor::new::<String>("a"),
            FieldDescriptor::new::<String>("b"),
        ];
        assert_eq!(render_fields(&fields, 0).unwrap(), "b\na\nb");
    }

    #[test]
    fn empty_object_is_rejected() {
        let fields = [FieldDescriptor::new::<Empty>("nothing")];
        assert_eq!(
            render_fields(&fields, 1).unwrap_err(),
            BuildError::EmptySelection {
                field: "nothing".to_string()
            }
        );
    }

    #[test]
    fn recursive_type_hits_depth_limit() {
        let fields = [FieldDescriptor::new::<Node>("node")];
        assert!(matches!(
            render_fields(&fields, 0).unwrap_err(),
            BuildError::DepthExceeded { max: MAX_DEPTH, .. }
        ));
    }
}
