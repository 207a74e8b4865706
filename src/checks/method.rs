use tracing::{debug, trace};

use super::{Diagnostic, ErrorKind, Reporter, Visitor};
use crate::config::Config;
use crate::matcher::NamePattern;
use crate::resolver::resolve;
use crate::syntax::ClassDef;

/// Checks the allure decorators on the test methods of every class against
/// `method_tag_tree`. Every named direct member of the class body is a
/// candidate, nested classes included, and the enclosing class does not
/// have to be a test class.
pub struct MethodTagChecker<'a> {
    config: &'a Config,
    test_method_name: NamePattern,
}

impl<'a> MethodTagChecker<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            test_method_name: NamePattern::new(config.test_method_name.as_str()),
        }
    }
}

impl Visitor for MethodTagChecker<'_> {
    fn name(&self) -> &'static str {
        "method-tag-tree"
    }

    fn visit_class(&self, class: &ClassDef, reporter: &mut dyn Reporter) {
        let tree = self.config.method_tag_tree.as_deref();

        for method in &class.members {
            let Some(name) = method.name.as_deref() else {
                continue;
            };
            if !self.test_method_name.is_match(name) {
                trace!(method = name, "not a test method");
                continue;
            }

            if let Some(missing) = resolve(method, tree, self.config.strict_tree) {
                debug!(method = name, missing = ?missing, "method is missing allure tags");
                reporter.report(Diagnostic::new(
                    ErrorKind::MethodMissingAllure,
                    method.location,
                    name,
                    tree.unwrap_or_default(),
                    &missing,
                ));
            }
        }
    }
}
