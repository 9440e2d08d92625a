//! Search request construction.
//!
//! [`QueryBuilder`] composes free-text search, nested filters, a sort
//! specification and exactly one pagination mode into a [`SearchRequest`]
//! that renders to the backend JSON body.

use serde_json::{json, Value as JsonValue};

use crate::cursor::{Cursor, SortValue};
use crate::error::{QueryError, Result};
use crate::sort::SortSpec;

/// Page size used when a request carries no pagination at all.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Boost applied to the primary field of a free-text search.
const PRIMARY_FIELD_BOOST: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum Pagination {
    Offset { page_number: u32, size: u32 },
    Cursor { after: Cursor, size: u32 },
}

impl Pagination {
    pub fn offset(page_number: u32, size: u32) -> Self {
        Self::Offset { page_number, size }
    }

    pub fn cursor(after: Cursor, size: u32) -> Self {
        Self::Cursor { after, size }
    }
}

/// Free-text condition.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSearch {
    pub text: String,
    pub primary_field: Option<String>,
}

/// Condition on a field of a nested object collection.
///
/// With more than one path the document matches when any of the paths matches.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedFilter {
    pub paths: Vec<String>,
    pub field: String,
    pub value: JsonValue,
}

impl NestedFilter {
    pub fn new(path: impl Into<String>, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            paths: vec![path.into()],
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn any_of<I, S>(paths: I, field: impl Into<String>, value: impl Into<JsonValue>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            field: field.into(),
            value: value.into(),
        }
    }

    fn to_json(&self) -> JsonValue {
        let mut clauses: Vec<JsonValue> = self
            .paths
            .iter()
            .map(|path| {
                json!({
                    "nested": {
                        "path": path,
                        "query": {
                            "term": { format!("{}.{}", path, self.field): self.value.clone() }
                        }
                    }
                })
            })
            .collect();

        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            json!({
                "bool": {
                    "should": clauses,
                    "minimum_should_match": 1,
                }
            })
        }
    }
}

/// A fully validated request, ready for a [`crate::SearchBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub text: Option<TextSearch>,
    pub filters: Vec<NestedFilter>,
    pub sort: SortSpec,
    pub size: u32,
    /// Skip count, only in offset mode.
    pub from: Option<u64>,
    /// Sort values to resume after, only in cursor mode.
    pub search_after: Option<Vec<SortValue>>,
}

impl SearchRequest {
    /// Render the backend request body.
    pub fn to_json(&self) -> JsonValue {
        let mut body = json!({
            "query": self.query_argument(),
            "sort": self.sort.to_json(),
            "size": self.size,
            "track_total_hits": true,
        });

        if let Some(from) = self.from {
            body["from"] = json!(from);
        }
        if let Some(after) = &self.search_after {
            body["search_after"] = json!(after);
        }

        body
    }

    fn query_argument(&self) -> JsonValue {
        let text = self.text.as_ref().map(Self::text_query);
        if self.filters.is_empty() {
            return text.unwrap_or_else(|| json!({ "match_all": {} }));
        }

        let filters: Vec<JsonValue> = self.filters.iter().map(NestedFilter::to_json).collect();
        let mut bool_query = json!({ "filter": filters });
        if let Some(text) = text {
            bool_query["must"] = json!([text]);
        }
        json!({ "bool": bool_query })
    }

    fn text_query(search: &TextSearch) -> JsonValue {
        let fields = match &search.primary_field {
            Some(primary) => json!([format!("{primary}^{PRIMARY_FIELD_BOOST}"), "*"]),
            None => json!(["*"]),
        };
        json!({
            "multi_match": {
                "query": search.text,
                "fields": fields,
                "fuzziness": "AUTO",
                "operator": "and",
                "lenient": true,
            }
        })
    }
}

/// Builder for [`SearchRequest`].
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    sort: SortSpec,
    text: Option<TextSearch>,
    filters: Vec<NestedFilter>,
    offset: Option<(u32, u32)>,
    cursor: Option<(Cursor, u32)>,
    max_result_window: Option<u64>,
}

impl QueryBuilder {
    pub fn new(sort: SortSpec) -> Self {
        Self {
            sort,
            text: None,
            filters: Vec::new(),
            offset: None,
            cursor: None,
            max_result_window: None,
        }
    }

    /// Add a free-text condition. Blank text is ignored.
    pub fn search(mut self, text: &str, primary_field: Option<&str>) -> Self {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        self.text = if normalized.is_empty() {
            None
        } else {
            Some(TextSearch {
                text: normalized,
                primary_field: primary_field.map(str::to_string),
            })
        };
        self
    }

    /// Require a nested object field to equal `value`.
    pub fn nested_filter(mut self, filter: NestedFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn offset(mut self, page_number: u32, size: u32) -> Self {
        self.offset = Some((page_number, size));
        self
    }

    pub fn search_after(mut self, cursor: Cursor, size: u32) -> Self {
        self.cursor = Some((cursor, size));
        self
    }

    pub fn pagination(self, pagination: Pagination) -> Self {
        match pagination {
            Pagination::Offset { page_number, size } => self.offset(page_number, size),
            Pagination::Cursor { after, size } => self.search_after(after, size),
        }
    }

    /// Reject offset pages reaching past `window` documents.
    pub fn max_result_window(mut self, window: u64) -> Self {
        self.max_result_window = Some(window);
        self
    }

    pub fn build(self) -> Result<SearchRequest> {
        let pagination = match (self.offset, self.cursor) {
            (Some(_), Some(_)) => return Err(QueryError::ConflictingPagination),
            (Some((page_number, size)), None) => Pagination::Offset { page_number, size },
            (None, Some((after, size))) => Pagination::Cursor { after, size },
            (None, None) => Pagination::Offset {
                page_number: 1,
                size: DEFAULT_PAGE_SIZE,
            },
        };

        let (size, from, search_after) = match pagination {
            Pagination::Offset { page_number, size } => {
                validate_size(size)?;
                if page_number == 0 {
                    return Err(QueryError::InvalidPagination(
                        "page number must be at least 1".to_string(),
                    ));
                }
                let from = u64::from(page_number - 1) * u64::from(size);
                if let Some(window) = self.max_result_window {
                    if from + u64::from(size) > window {
                        return Err(QueryError::PageOutOfRange { from, size, window });
                    }
                }
                (size, Some(from), None)
            }
            Pagination::Cursor { after, size } => {
                validate_size(size)?;
                if after.len() != self.sort.len() {
                    return Err(QueryError::CursorSortMismatch {
                        cursor_len: after.len(),
                        sort_len: self.sort.len(),
                    });
                }
                (size, None, Some(after.into_values()))
            }
        };

        Ok(SearchRequest {
            text: self.text,
            filters: self.filters,
            sort: self.sort,
            size,
            from,
            search_after,
        })
    }
}

fn validate_size(size: u32) -> Result<()> {
    if size == 0 {
        Err(QueryError::InvalidPagination(
            "page size must be at least 1".to_string(),
        ))
    } else {
        Ok(())
    }
}
