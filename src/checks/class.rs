use tracing::{debug, trace};

use super::{Diagnostic, ErrorKind, Reporter, Visitor};
use crate::config::Config;
use crate::matcher::NamePattern;
use crate::resolver::resolve;
use crate::syntax::ClassDef;

/// Checks the allure decorators on test classes against `class_tag_tree`.
pub struct ClassTagChecker<'a> {
    config: &'a Config,
    test_class_name: NamePattern,
}

impl<'a> ClassTagChecker<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            test_class_name: NamePattern::new(config.test_class_name.as_str()),
        }
    }

    fn is_test_class(&self, name: &str) -> bool {
        self.test_class_name.is_match(name)
    }
}

impl Visitor for ClassTagChecker<'_> {
    fn name(&self) -> &'static str {
        "class-tag-tree"
    }

    fn visit_class(&self, class: &ClassDef, reporter: &mut dyn Reporter) {
        let Some(name) = class.name.as_deref() else {
            return;
        };
        if !self.is_test_class(name) {
            trace!(class = name, "not a test class");
            return;
        }

        let tree = self.config.class_tag_tree.as_deref();
        if let Some(missing) = resolve(class, tree, self.config.strict_tree) {
            debug!(class = name, missing = ?missing, "class is missing allure tags");
            reporter.report(Diagnostic::new(
                ErrorKind::ClassMissingAllure,
                class.location,
                name,
                tree.unwrap_or_default(),
                &missing,
            ));
        }
    }
}
