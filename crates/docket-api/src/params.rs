use crate::errors::ApiError;
use bson::oid::ObjectId;
use std::collections::BTreeMap;

/// Marketplace search terms. Every term is optional; absent terms impose no
/// constraint. Terms other than `search` each constrain their own field
/// (`rateType` by exact equality, the rest as substrings); `search` is a
/// disjunctive match over fullName/headline/practiceAreas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LawyerSearchParams {
    pub practice_area: Option<String>,
    pub language: Option<String>,
    pub jurisdiction: Option<String>,
    pub rate_type: Option<String>,
    pub search: Option<String>,
}

#[must_use]
pub fn parse_lawyer_search_params(query: &BTreeMap<String, String>) -> LawyerSearchParams {
    LawyerSearchParams {
        practice_area: nonempty_term(query, "practiceArea"),
        language: nonempty_term(query, "language"),
        jurisdiction: nonempty_term(query, "jurisdiction"),
        rate_type: nonempty_term(query, "rateType"),
        search: nonempty_term(query, "search"),
    }
}

fn nonempty_term(query: &BTreeMap<String, String>, name: &str) -> Option<String> {
    query
        .get(name)
        .map(|raw| raw.trim())
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

/// Escape a search term so the store treats it as a literal substring rather
/// than a regex pattern.
#[must_use]
pub fn escape_regex_literal(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if c.is_ascii_alphanumeric() || c == ' ' || c == '_' {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// Parse a hex record id arriving as a query or body parameter.
pub fn parse_object_id_param(name: &str, raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ApiError::invalid_param(name, raw))
}
