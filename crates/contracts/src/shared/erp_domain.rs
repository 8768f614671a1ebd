//! ERP search domains: a list of `[field, operator, value]` terms combined with implicit AND,
//! with `"|"` prefix markers for OR groups.

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Comparison operator of a domain term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    GtEq,
    LtEq,
    ILike,
    In,
    ChildOf,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::LtEq => "<=",
            Operator::ILike => "ilike",
            Operator::In => "in",
            Operator::ChildOf => "child_of",
        }
    }
}

/// Single predicate `[field, operator, value]`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl Term {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.field)?;
        seq.serialize_element(self.operator.as_str())?;
        seq.serialize_element(&self.value)?;
        seq.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Element {
    Or,
    Term(Term),
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Or => serializer.serialize_str("|"),
            Element::Term(term) => term.serialize(serializer),
        }
    }
}

/// Search domain in prefix notation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Domain(Vec<Element>);

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term, AND-ed with everything already present
    pub fn push(&mut self, term: Term) -> &mut Self {
        self.0.push(Element::Term(term));
        self
    }

    pub fn with(mut self, term: Term) -> Self {
        self.push(term);
        self
    }

    /// Append a group that matches when any of `terms` matches
    pub fn push_any(&mut self, terms: Vec<Term>) -> &mut Self {
        let count = terms.len();
        if count == 0 {
            return self;
        }
        for _ in 1..count {
            self.0.push(Element::Or);
        }
        self.0.extend(terms.into_iter().map(Element::Term));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terms in order, skipping OR markers
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.0.iter().filter_map(|e| match e {
            Element::Term(t) => Some(t),
            Element::Or => None,
        })
    }

    /// Look up the first term on `field`
    pub fn find(&self, field: &str) -> Option<&Term> {
        self.terms().find(|t| t.field == field)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Array(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terms_serialize_as_triples() {
        let domain = Domain::new()
            .with(Term::new("quantity", Operator::Gt, 0))
            .with(Term::new("lot_id.name", Operator::ILike, "A-12"));
        assert_eq!(
            domain.to_value(),
            json!([["quantity", ">", 0], ["lot_id.name", "ilike", "A-12"]])
        );
    }

    #[test]
    fn test_any_group_uses_prefix_markers() {
        let mut domain = Domain::new();
        domain.push(Term::new("quantity", Operator::Gt, 0));
        domain.push_any(vec![
            Term::new("a", Operator::ILike, "x"),
            Term::new("b", Operator::ILike, "x"),
            Term::new("c", Operator::ILike, "x"),
        ]);
        assert_eq!(
            domain.to_value(),
            json!([
                ["quantity", ">", 0],
                "|", "|",
                ["a", "ilike", "x"], ["b", "ilike", "x"], ["c", "ilike", "x"]
            ])
        );
    }

    #[test]
    fn test_empty_any_group_is_noop() {
        let mut domain = Domain::new();
        domain.push_any(Vec::new());
        assert!(domain.is_empty());
        assert_eq!(domain.to_value(), json!([]));
    }
}
