//! Allure decorator checks over test classes and test methods.
mod class;
mod method;

pub use class::ClassTagChecker;
pub use method::MethodTagChecker;

use serde::Serialize;

use crate::config::Config;
use crate::syntax::{ClassDef, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    ClassMissingAllure,
    MethodMissingAllure,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ClassMissingAllure => "AL001",
            ErrorKind::MethodMissingAllure => "AL002",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::ClassMissingAllure => "ClassMissingAllureError",
            ErrorKind::MethodMissingAllure => "MethodMissingAllureError",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            ErrorKind::ClassMissingAllure => {
                "Class '{name}' should have tags the right position: {tree}. Required '{deco}' decorators"
            }
            ErrorKind::MethodMissingAllure => {
                "Method '{name}' should have tags the right position: {tree}. Required '{deco}' decorators"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub location: Location,
    /// Name of the offending class or method.
    pub name: String,
    /// The configured tag tree, unparsed.
    pub tree: String,
    /// Missing tags joined by `,`, in tag-tree order.
    pub deco: String,
}

impl Diagnostic {
    pub fn new(
        kind: ErrorKind,
        location: Location,
        name: impl Into<String>,
        tree: impl Into<String>,
        missing: &[String],
    ) -> Self {
        Self {
            kind,
            location,
            name: name.into(),
            tree: tree.into(),
            deco: missing.join(","),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn args(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("tree", self.tree.as_str()),
            ("deco", self.deco.as_str()),
        ]
    }

    pub fn message(&self) -> String {
        render(self.kind.template(), &self.args())
    }
}

/// Substitutes `{key}` placeholders in one pass. Substituted values are not
/// scanned again, and unknown placeholders are kept as written.
fn render(template: &str, args: &[(&str, &str)]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            args.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                message.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                message.push('{');
                rest = after;
            }
        }
    }
    message.push_str(rest);
    message
}

/// Receives diagnostics as checks produce them.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A check run once per visited class definition.
///
/// Visitors keep no state between classes, so the order in which classes
/// are visited does not affect what is reported.
pub trait Visitor {
    fn name(&self) -> &'static str;

    fn visit_class(&self, class: &ClassDef, reporter: &mut dyn Reporter);
}

/// The checks every run registers.
pub fn default_visitors(config: &Config) -> Vec<Box<dyn Visitor + '_>> {
    vec![
        Box::new(ClassTagChecker::new(config)),
        Box::new(MethodTagChecker::new(config)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_message() {
        let diagnostic = Diagnostic::new(
            ErrorKind::ClassMissingAllure,
            Location::new(2, 1),
            "Test1",
            "feature>story>label>tag",
            &["feature".to_string(), "label".to_string(), "tag".to_string()],
        );

        assert_eq!(diagnostic.code(), "AL001");
        assert_eq!(diagnostic.deco, "feature,label,tag");
        assert_eq!(
            diagnostic.message(),
            "Class 'Test1' should have tags the right position: feature>story>label>tag. Required 'feature,label,tag' decorators"
        );
    }

    #[test]
    fn test_method_message() {
        let diagnostic = Diagnostic::new(
            ErrorKind::MethodMissingAllure,
            Location::new(4, 5),
            "test_1",
            "title>tag",
            &["tag".to_string()],
        );

        assert_eq!(diagnostic.code(), "AL002");
        assert_eq!(
            diagnostic.message(),
            "Method 'test_1' should have tags the right position: title>tag. Required 'tag' decorators"
        );
    }

    #[test]
    fn test_placeholders_in_values_are_not_substituted() {
        let diagnostic = Diagnostic::new(
            ErrorKind::MethodMissingAllure,
            Location::new(4, 5),
            "test_1",
            "title>{deco}",
            &["{deco}".to_string()],
        );

        assert_eq!(
            diagnostic.message(),
            "Method 'test_1' should have tags the right position: title>{deco}. Required '{deco}' decorators"
        );
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        assert_eq!(
            render("{name} {other} {", &[("name", "Test1")]),
            "Test1 {other} {"
        );
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(ErrorKind::ClassMissingAllure.name(), "ClassMissingAllureError");
        assert_eq!(ErrorKind::MethodMissingAllure.name(), "MethodMissingAllureError");
    }

    #[test]
    fn test_default_visitors() {
        let config = Config::default();
        let names: Vec<_> = default_visitors(&config).iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["class-tag-tree", "method-tag-tree"]);
    }
}
