//! Namespace and template scope of a declaration.

/// Where in the namespace/template hierarchy a declaration lives.
///
/// A `Scope` is never modified in place. Entering a nested class or switching
/// to an explicit namespace produces a new value, so every recursive render
/// call receives either its parent's scope or a freshly derived one.
///
/// # Example
///
/// ```
/// use refpages_core::Scope;
///
/// let scope = Scope::root()
///     .with_namespace("lmno")
///     .enter("tuple", Some("<typename... Ts>"));
///
/// assert_eq!(scope.qualify("get"), "lmno::tuple::get");
/// assert_eq!(
///     scope.directive().as_deref(),
///     Some(".. namespace:: template <typename... Ts> lmno::tuple")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    templates: Vec<String>,
    namespace: String,
}

impl Scope {
    /// The top-level scope: no namespace, no templates.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a scope from its parts.
    pub fn new<I, S>(templates: I, namespace: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
            namespace: namespace.into(),
        }
    }

    /// Switch to an explicit namespace.
    ///
    /// Explicit namespaces never inherit template parameters from the
    /// enclosing scope.
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            templates: Vec::new(),
            namespace: namespace.into(),
        }
    }

    /// Append a template-parameter list to the active ones.
    ///
    /// `None` returns an identical scope.
    pub fn with_template_extended(&self, template: Option<&str>) -> Self {
        let mut templates = self.templates.clone();
        templates.extend(template.map(str::to_string));
        Self {
            templates,
            namespace: self.namespace.clone(),
        }
    }

    /// Append a name to the namespace path.
    pub fn nested(&self, name: &str) -> Self {
        Self {
            templates: self.templates.clone(),
            namespace: self.qualify(name),
        }
    }

    /// The scope of the body of a class-like entity named `name`.
    pub fn enter(&self, name: &str, template: Option<&str>) -> Self {
        self.with_template_extended(template).nested(name)
    }

    /// Qualify `name` with this scope's namespace.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.namespace, name)
        }
    }

    /// The `.. namespace::` directive declaring this scope.
    ///
    /// Returns `None` for a scope without a namespace.
    pub fn directive(&self) -> Option<String> {
        if self.namespace.is_empty() {
            return None;
        }
        let mut directive = String::from(".. namespace::");
        for template in &self.templates {
            directive.push_str(" template ");
            directive.push_str(template);
        }
        directive.push(' ');
        directive.push_str(&self.namespace);
        Some(directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_directive() {
        assert_eq!(Scope::root(), Scope::new(Vec::<String>::new(), ""));
        assert_eq!(Scope::root().directive(), None);
    }

    #[test]
    fn test_with_namespace_drops_templates() {
        let scope = Scope::new(["<class T>"], "outer::Box");
        let reset = scope.with_namespace("inner");

        assert_eq!(reset, Scope::new(Vec::<String>::new(), "inner"));
        // The original is untouched
        assert_eq!(scope, Scope::new(["<class T>"], "outer::Box"));
    }

    #[test]
    fn test_with_template_extended() {
        let scope = Scope::root().with_namespace("ns");
        assert_eq!(scope.with_template_extended(None), scope);

        let extended = scope.with_template_extended(Some("<int N>"));
        assert_eq!(extended, Scope::new(["<int N>"], "ns"));
    }

    #[test]
    fn test_enter_composes() {
        let direct = Scope::new(["<class A>", "<class B>"], "root::A::B");
        let nested = Scope::root()
            .with_namespace("root")
            .enter("A", Some("<class A>"))
            .enter("B", Some("<class B>"));

        assert_eq!(nested, direct);
        assert_eq!(nested.directive(), direct.directive());
    }

    #[test]
    fn test_enter_from_root_scope() {
        let scope = Scope::root().enter("Widget", None);
        assert_eq!(scope, Scope::new(Vec::<String>::new(), "Widget"));
    }

    #[test]
    fn test_directive_lists_templates_in_order() {
        let scope = Scope::new(["<class T>", "<int N>"], "lmno::array");
        assert_eq!(
            scope.directive().as_deref(),
            Some(".. namespace:: template <class T> template <int N> lmno::array")
        );
    }

    #[test]
    fn test_qualify() {
        assert_eq!(Scope::root().qualify("f"), "f");
        assert_eq!(Scope::root().with_namespace("a::b").qualify("f"), "a::b::f");
    }
}
