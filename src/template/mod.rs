//! Template rendering for generated documents
//!
//! Templates use field substitution (`{{ field }}`), conditionals over
//! lists (`{% if keys %}`), iteration (`{% for key in keys %}`) and
//! pipelines through registered functions (`{{ field | base64_encode }}`,
//! `{{ field | indent(6) }}`).
//!
//! Rendering is strict: an undefined field or an unregistered function is
//! an error rather than an empty substitution. Only the functions handed to
//! [`render`] exist; there are no built-in filters and no auto-escaping.

pub mod context;
pub mod functions;

pub use context::DocumentContext;

use crate::UserDataError;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// A named transformation callable from a template pipeline
#[derive(Clone, Copy)]
pub enum TemplateFunction {
    /// `{{ value | name }}`
    Text(fn(&str) -> String),
    /// `{{ value | name(width) }}`, called as `f(width, value)`
    WidthText(fn(usize, &str) -> String),
}

/// Registry of functions a template may reference by name
#[derive(Clone, Default)]
pub struct TemplateFunctions {
    functions: BTreeMap<&'static str, TemplateFunction>,
}

impl TemplateFunctions {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `base64_encode` and `indent`
    pub fn standard() -> Self {
        Self::new()
            .with("base64_encode", TemplateFunction::Text(functions::base64_encode))
            .with("indent", TemplateFunction::WidthText(functions::indent))
    }

    /// Register a function, replacing any previous one with the same name
    pub fn with(mut self, name: &'static str, function: TemplateFunction) -> Self {
        self.insert(name, function);
        self
    }

    pub fn insert(&mut self, name: &'static str, function: TemplateFunction) {
        self.functions.insert(name, function);
    }

    pub fn get(&self, name: &str) -> Option<TemplateFunction> {
        self.functions.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn install(&self, env: &mut Environment<'_>) {
        for (&name, &function) in &self.functions {
            trace!("Registering template function: {}", name);
            match function {
                TemplateFunction::Text(f) => env.add_filter(name, move |value: String| f(&value)),
                TemplateFunction::WidthText(f) => {
                    env.add_filter(name, move |value: String, width: usize| f(width, &value))
                }
            }
        }
    }
}

impl fmt::Debug for TemplateFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Render `body` as the template `name` against `input`
pub fn render<S: Serialize>(
    name: &str,
    body: &str,
    functions: &TemplateFunctions,
    input: &S,
) -> Result<String, UserDataError> {
    debug!("Rendering template: {}", name);

    let mut env = Environment::empty();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    functions.install(&mut env);

    env.add_template(name, body)
        .map_err(|e| UserDataError::template_parse(name, e))?;

    let tmpl = env
        .get_template(name)
        .map_err(|e| UserDataError::template(name, e))?;

    tmpl.render(input)
        .map_err(|e| UserDataError::template(name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Node {
        hostname: String,
        keys: Vec<String>,
        config: String,
    }

    fn node(keys: &[&str]) -> Node {
        Node {
            hostname: "cp-0".to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
            config: "a: 1\nb: 2".to_string(),
        }
    }

    #[test]
    fn test_field_substitution() {
        let rendered = render(
            "simple",
            "hostname: {{ hostname }}",
            &TemplateFunctions::new(),
            &node(&[]),
        )
        .unwrap();
        assert_eq!(rendered, "hostname: cp-0");
    }

    #[test]
    fn test_conditional_and_iteration() {
        let body = "{% if keys %}keys:{% for key in keys %}\n- \"{{ key }}\"{% endfor %}{% endif %}\nend\n";

        let rendered = render("loop", body, &TemplateFunctions::new(), &node(&["k1", "k2"])).unwrap();
        assert_eq!(rendered, "keys:\n- \"k1\"\n- \"k2\"\nend\n");

        let rendered = render("loop", body, &TemplateFunctions::new(), &node(&[])).unwrap();
        assert_eq!(rendered, "\nend\n");
    }

    #[test]
    fn test_pipeline_functions() {
        let body = "{{ hostname | base64_encode }}\n{{ config | indent(4) }}";
        let rendered = render("pipe", body, &TemplateFunctions::standard(), &node(&[])).unwrap();
        assert_eq!(rendered, "Y3AtMA==\n    a: 1\n    b: 2");
    }

    #[test]
    fn test_substitution_is_not_reexpanded() {
        let mut input = node(&[]);
        input.hostname = "{{ config }}".to_string();

        let rendered = render("raw", "{{ hostname }}", &TemplateFunctions::new(), &input).unwrap();
        assert_eq!(rendered, "{{ config }}");
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let rendered = render("nl", "x\n\n", &TemplateFunctions::new(), &node(&[])).unwrap();
        assert_eq!(rendered, "x\n\n");
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = render(
            "missing-field",
            "value: {{ not_a_field }}",
            &TemplateFunctions::standard(),
            &node(&[]),
        )
        .unwrap_err();

        assert!(err.is_template_error());
        assert!(err.to_string().contains("missing-field"));
    }

    #[test]
    fn test_unregistered_function_is_error() {
        let err = render(
            "missing-fn",
            "{{ hostname | base64_encode }}",
            &TemplateFunctions::new(),
            &node(&[]),
        )
        .unwrap_err();

        assert!(err.is_template_error());
        assert!(err.to_string().contains("missing-fn"));
    }

    #[test]
    fn test_builtin_filters_are_not_available() {
        let result = render(
            "builtin",
            "{{ hostname | upper }}",
            &TemplateFunctions::standard(),
            &node(&[]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_syntax_is_parse_error() {
        let err = render(
            "broken",
            "value: {{ hostname",
            &TemplateFunctions::new(),
            &node(&[]),
        )
        .unwrap_err();

        assert!(matches!(err, UserDataError::TemplateParse { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_standard_registry() {
        let functions = TemplateFunctions::standard();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions.names().collect::<Vec<_>>(), ["base64_encode", "indent"]);
        assert!(functions.get("indent").is_some());
        assert!(functions.get("Base64Encode").is_none());
        assert!(TemplateFunctions::new().is_empty());
    }
}
