//! JMESPath evaluation against an already parsed secret document.

use jmespath::{Expression, Variable};
use secrets_extract_spec::{Error, Result};
use serde_json::Value;

/// What a query selected, reduced to the cases extraction distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The path selected nothing, or an explicit `null`.
    Missing,
    Text(String),
    /// Any non-string result, by JSON kind.
    Other(&'static str),
}

/// A compiled query path.
pub struct Query {
    path: String,
    expression: Expression<'static>,
}

impl Query {
    pub fn compile(path: &str) -> Result<Self> {
        let expression = jmespath::compile(path).map_err(|err| Error::InvalidQuery {
            path: path.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            path: path.to_string(),
            expression,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn evaluate(&self, document: &Value) -> Result<QueryOutcome> {
        let found = self
            .expression
            .search(document)
            .map_err(|err| Error::InvalidQuery {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;

        Ok(match &*found {
            Variable::Null => QueryOutcome::Missing,
            Variable::String(text) => QueryOutcome::Text(text.clone()),
            other => QueryOutcome::Other(variable_kind(other)),
        })
    }
}

fn variable_kind(variable: &Variable) -> &'static str {
    match variable {
        Variable::Null => "null",
        Variable::String(_) => "string",
        Variable::Bool(_) => "boolean",
        Variable::Number(_) => "number",
        Variable::Array(_) => "array",
        Variable::Object(_) => "object",
        Variable::Expref(_) => "expression",
    }
}

/// JSON kind name used in diagnostics in place of the value itself.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(path: &str, document: &Value) -> QueryOutcome {
        Query::compile(path).unwrap().evaluate(document).unwrap()
    }

    #[test]
    fn selects_nested_strings() {
        let document = json!({"db": {"user": "admin", "ports": [5432, 5433]}});
        assert_eq!(eval("db.user", &document), QueryOutcome::Text("admin".into()));
        assert_eq!(eval("db.ports", &document), QueryOutcome::Other("array"));
        assert_eq!(eval("db.ports[0]", &document), QueryOutcome::Other("number"));
        assert_eq!(eval("db", &document), QueryOutcome::Other("object"));
        assert_eq!(eval("db.host", &document), QueryOutcome::Missing);
    }

    #[test]
    fn explicit_null_counts_as_missing() {
        let document = json!({"token": null});
        assert_eq!(eval("token", &document), QueryOutcome::Missing);
    }

    #[test]
    fn quoted_identifiers_reach_dashed_keys() {
        let document = json!({"api-key": "k"});
        assert_eq!(eval("\"api-key\"", &document), QueryOutcome::Text("k".into()));
    }

    #[test]
    fn malformed_path_fails_to_compile() {
        let err = Query::compile("a.[").err().expect("compile error");
        assert!(matches!(err, Error::InvalidQuery { ref path, .. } if path == "a.["));
    }

    #[test]
    fn kinds_cover_every_json_variant() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(true)), "boolean");
        assert_eq!(json_kind(&json!(1.5)), "number");
        assert_eq!(json_kind(&json!("s")), "string");
        assert_eq!(json_kind(&json!([])), "array");
        assert_eq!(json_kind(&json!({})), "object");
    }
}
