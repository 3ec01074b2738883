//! PostgREST query-string construction.

use crate::repository::SortOrder;

/// Ordered list of query parameters for a PostgREST table request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestQuery {
    params: Vec<(String, String)>,
}

impl RestQuery {
    /// `select=*`.
    #[must_use]
    pub fn select_all() -> Self {
        Self {
            params: vec![("select".into(), "*".into())],
        }
    }

    /// No parameters; used for mutations that only filter.
    #[must_use]
    pub fn empty() -> Self {
        Self { params: Vec::new() }
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    #[must_use]
    pub fn in_list<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: std::fmt::Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((column.into(), format!("in.({joined})")));
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: &str, order: SortOrder) -> Self {
        self.params
            .push(("order".into(), format!("{column}.{}", order.as_str())));
        self
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(q: &RestQuery) -> Vec<(&str, &str)> {
        q.params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn builds_equality_and_order() {
        let q = RestQuery::select_all()
            .eq("category_id", "abc")
            .eq("is_active", true)
            .order_by("created_at", SortOrder::Descending);
        assert_eq!(
            pairs(&q),
            vec![
                ("select", "*"),
                ("category_id", "eq.abc"),
                ("is_active", "eq.true"),
                ("order", "created_at.desc"),
            ]
        );
    }

    #[test]
    fn builds_membership_filter() {
        let q = RestQuery::select_all().in_list("category_id", ["a", "b", "c"]);
        assert_eq!(pairs(&q)[1], ("category_id", "in.(a,b,c)"));
    }

    #[test]
    fn empty_query_has_no_select() {
        assert!(RestQuery::empty().eq("id", 1).params().len() == 1);
    }
}
