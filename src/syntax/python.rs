use tracing::trace;
use tree_sitter::{Node, Tree};

use super::{ClassDef, Location, Marker, MemberDef, Module};

/// Builds the typed module view from a tree-sitter Python tree.
///
/// Class definitions are collected from module level down through functions
/// and compound statements. The body of a collected class is only searched
/// for its direct members, so classes nested in classes are not collected.
pub fn build_module(tree: &Tree, source: &[u8]) -> Module {
    let root = tree.root_node();
    let mut classes = Vec::new();
    collect_classes(root, source, &mut classes);

    trace!(classes = classes.len(), "built module view");
    Module {
        classes,
        syntax_error: first_error(root).map(|node| location_of(&node)),
    }
}

fn collect_classes(node: Node, source: &[u8], classes: &mut Vec<ClassDef>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "class_definition" => classes.push(build_class(child, source, Vec::new())),
            "decorated_definition" => match definition_of(child) {
                Some(def) if def.kind() == "class_definition" => {
                    classes.push(build_class(def, source, extract_markers(child, source)));
                }
                _ => collect_classes(child, source, classes),
            },
            _ => collect_classes(child, source, classes),
        }
    }
}

fn build_class(node: Node, source: &[u8], markers: Vec<Marker>) -> ClassDef {
    let members = node
        .child_by_field_name("body")
        .map(|body| collect_members(body, source))
        .unwrap_or_default();

    ClassDef {
        name: name_of(node, source),
        location: location_of(&node),
        markers,
        members,
    }
}

fn collect_members(body: Node, source: &[u8]) -> Vec<MemberDef> {
    let mut cursor = body.walk();
    let members = body
        .named_children(&mut cursor)
        .filter_map(|child| match child.kind() {
            "function_definition" | "class_definition" => {
                Some(build_member(child, source, Vec::new()))
            }
            "decorated_definition" => definition_of(child)
                .filter(|def| matches!(def.kind(), "function_definition" | "class_definition"))
                .map(|def| build_member(def, source, extract_markers(child, source))),
            _ => None,
        })
        .collect();
    members
}

fn build_member(node: Node, source: &[u8], markers: Vec<Marker>) -> MemberDef {
    MemberDef {
        name: name_of(node, source),
        location: location_of(&node),
        markers,
    }
}

fn name_of(node: Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .and_then(|name| node_text(&name, source))
}

/// Depth-first search for the first `ERROR` or missing node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn definition_of(decorated: Node) -> Option<Node> {
    decorated.child_by_field_name("definition")
}

fn extract_markers(decorated: Node, source: &[u8]) -> Vec<Marker> {
    let mut cursor = decorated.walk();
    let markers = decorated
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .filter_map(|decorator| {
            let expression = decorator_expression(decorator)?;
            marker_from_expression(expression, source)
        })
        .collect();
    markers
}

fn decorator_expression(decorator: Node) -> Option<Node> {
    let mut cursor = decorator.walk();
    let result = decorator
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    result
}

/// `ns.method(...)` and `ns.method` become markers; any other decorator
/// shape is not a marker.
fn marker_from_expression(expression: Node, source: &[u8]) -> Option<Marker> {
    match expression.kind() {
        "call" => {
            let function = expression.child_by_field_name("function")?;
            if function.kind() != "attribute" {
                return None;
            }
            let (namespace, method) = attribute_parts(function, source)?;
            Some(Marker::call(namespace, method))
        }
        "attribute" => {
            let (namespace, method) = attribute_parts(expression, source)?;
            Some(Marker::reference(namespace, method))
        }
        "parenthesized_expression" => {
            let inner = expression.named_child(0)?;
            marker_from_expression(inner, source)
        }
        _ => None,
    }
}

fn attribute_parts(attribute: Node, source: &[u8]) -> Option<(String, String)> {
    let object = attribute.child_by_field_name("object")?;
    if object.kind() != "identifier" {
        return None;
    }
    let name = attribute.child_by_field_name("attribute")?;
    Some((node_text(&object, source)?, node_text(&name, source)?))
}

fn node_text(node: &Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source).ok().map(str::to_string)
}

fn location_of(node: &Node) -> Location {
    let start = node.start_position();
    Location::new(start.row + 1, start.column + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_python;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn build(source: &str) -> Module {
        let tree = parse_python(source.as_bytes(), Path::new("inline.py")).unwrap();
        build_module(&tree, source.as_bytes())
    }

    #[test]
    fn test_class_markers_in_source_order() {
        let module = build(
            r#"
@allure.feature('Auth')
@allure.story('Login')
class TestLogin:
    pass
"#,
        );

        assert_eq!(module.classes.len(), 1);
        let class = &module.classes[0];
        assert_eq!(class.name.as_deref(), Some("TestLogin"));
        assert_eq!(
            class.markers,
            vec![
                Marker::call("allure", "feature"),
                Marker::call("allure", "story")
            ]
        );
    }

    #[test]
    fn test_class_location_is_class_keyword() {
        let module = build("@allure.story('')\nclass Test1:\n    pass\n");
        assert_eq!(module.classes[0].location, Location::new(2, 1));
    }

    #[test]
    fn test_marker_shapes() {
        let module = build(
            r#"
@allure.title
@allure.tag()
@pytest.mark.smoke
@fixture
@fixture()
@allure.step.inner('x')
class Test1:
    pass
"#,
        );

        assert_eq!(
            module.classes[0].markers,
            vec![
                Marker::reference("allure", "title"),
                Marker::call("allure", "tag"),
            ]
        );
    }

    #[test]
    fn test_pytest_mark_is_attribute_on_attribute() {
        let module = build("@pytest.mark\nclass Test1:\n    pass\n");
        assert_eq!(
            module.classes[0].markers,
            vec![Marker::reference("pytest", "mark")]
        );
    }

    #[test]
    fn test_direct_members_only() {
        let module = build(
            r#"
class TestCart:
    @allure.title('add')
    def test_add(self):
        def test_inner():
            pass

    async def test_async(self):
        pass

    value = 1

    class TestNested:
        def test_nested(self):
            pass
"#,
        );

        assert_eq!(module.classes.len(), 1);
        let members = &module.classes[0].members;
        let names: Vec<_> = members.iter().filter_map(|m| m.name.as_deref()).collect();
        assert_eq!(names, vec!["test_add", "test_async", "TestNested"]);
        assert_eq!(members[0].markers, vec![Marker::call("allure", "title")]);
        assert_eq!(members[1].location, Location::new(8, 5));
        assert_eq!(members[2].location, Location::new(13, 5));
    }

    #[test]
    fn test_classes_inside_functions_and_blocks() {
        let module = build(
            r#"
def make():
    class TestInFunction:
        pass

if True:
    @allure.feature('')
    class TestInIf:
        pass
"#,
        );

        let names: Vec<_> = module
            .classes
            .iter()
            .filter_map(|c| c.name.as_deref())
            .collect();
        assert_eq!(names, vec!["TestInFunction", "TestInIf"]);
        assert_eq!(module.classes[1].markers.len(), 1);
    }

    #[test]
    fn test_free_functions_are_not_classes() {
        let module = build("@allure.title('')\ndef test_free():\n    pass\n");
        assert!(module.classes.is_empty());
        assert_eq!(module.syntax_error, None);
    }

    #[test]
    fn test_nested_class_members_keep_their_decorators() {
        let module = build(
            r#"
class TestOuter:
    @allure.title('x')
    class test_nested:
        @allure.tag('inner')
        def test_inner(self):
            pass

    class Plain:
        pass
"#,
        );

        assert_eq!(module.classes.len(), 1);
        let members = &module.classes[0].members;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name.as_deref(), Some("test_nested"));
        assert_eq!(members[0].markers, vec![Marker::call("allure", "title")]);
        assert_eq!(members[0].location, Location::new(4, 5));
        assert_eq!(members[1].name.as_deref(), Some("Plain"));
        assert!(members[1].markers.is_empty());
    }

    #[test]
    fn test_first_syntax_error_location() {
        let module = build("class TestOk:
    pass

x = )
");
        assert_eq!(module.classes.len(), 1);
        assert_eq!(module.syntax_error.map(|l| l.line), Some(4));
    }
}
