//! In-memory [`SearchBackend`] that understands the subset of queries the
//! services issue: sort, `from`, `search_after`, nested term filters and a
//! substring match on the primary search field.

use async_trait::async_trait;
use marquee_query::{
    BackendError, NestedFilter, SearchBackend, SearchHits, SearchRequest, SortDirection,
    SortValue,
};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeBackend {
    indices: HashMap<String, Vec<Value>>,
    calls: AtomicUsize,
    down: AtomicBool,
    requests: Mutex<Vec<SearchRequest>>,
}

impl FakeBackend {
    pub fn with_index(mut self, index: &str, documents: Vec<Value>) -> Self {
        self.indices.insert(index.to_string(), documents);
        self
    }

    /// Number of `search` and `get` calls that reached the backend.
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Make every subsequent call fail as if the cluster were unreachable.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, AtomicOrdering::SeqCst);
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.requests.lock().ok()?.last().cloned()
    }

    fn enter(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.down.load(AtomicOrdering::SeqCst) {
            return Err(BackendError::Unreachable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search(&self, index: &str, request: &SearchRequest) -> Result<SearchHits, BackendError> {
        self.enter()?;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let Some(documents) = self.indices.get(index) else {
            return Ok(SearchHits::empty());
        };

        let mut keyed: Vec<(Vec<SortValue>, &Value)> = documents
            .iter()
            .filter(|doc| matches(doc, request))
            .map(|doc| (sort_key(doc, request), doc))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare(a, b, request));

        let total = keyed.len() as u64;
        let remaining: Vec<_> = match &request.search_after {
            Some(after) => keyed
                .into_iter()
                .filter(|(key, _)| compare(key, after, request) == Ordering::Greater)
                .collect(),
            None => keyed
                .into_iter()
                .skip(request.from.unwrap_or(0) as usize)
                .collect(),
        };
        let page: Vec<_> = remaining.into_iter().take(request.size as usize).collect();

        Ok(SearchHits {
            last_sort: page.last().map(|(key, _)| key.clone()).unwrap_or_default(),
            items: page.into_iter().map(|(_, doc)| doc.clone()).collect(),
            total,
        })
    }

    async fn get(&self, index: &str, id: &str) -> Result<Option<Value>, BackendError> {
        self.enter()?;
        Ok(self
            .indices
            .get(index)
            .and_then(|docs| docs.iter().find(|d| d["id"] == id))
            .cloned())
    }
}

fn matches(doc: &Value, request: &SearchRequest) -> bool {
    let text_matches = request.text.as_ref().map_or(true, |search| {
        let needle = search.text.to_lowercase();
        let field = search.primary_field.as_deref().unwrap_or("title");
        doc[field]
            .as_str()
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    });
    text_matches && request.filters.iter().all(|filter| nested_matches(doc, filter))
}

fn nested_matches(doc: &Value, filter: &NestedFilter) -> bool {
    filter.paths.iter().any(|path| {
        doc[path.as_str()]
            .as_array()
            .is_some_and(|items| items.iter().any(|item| item[filter.field.as_str()] == filter.value))
    })
}

fn sort_key(doc: &Value, request: &SearchRequest) -> Vec<SortValue> {
    request
        .sort
        .fields()
        .iter()
        .map(|f| {
            // Keyword sub-fields sort on the parent value.
            let field = f.field.strip_suffix(".raw").unwrap_or(&f.field);
            SortValue::from_json(doc[field].clone()).unwrap_or(SortValue::Null)
        })
        .collect()
}

fn compare(a: &[SortValue], b: &[SortValue], request: &SearchRequest) -> Ordering {
    for ((x, y), field) in a.iter().zip(b).zip(request.sort.fields()) {
        let ord = compare_value(x, y);
        let ord = match field.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn compare_value(a: &SortValue, b: &SortValue) -> Ordering {
    fn number(v: &SortValue) -> Option<f64> {
        match v {
            SortValue::Int(i) => Some(*i as f64),
            SortValue::UInt(u) => Some(*u as f64),
            SortValue::Float(f) => Some(*f),
            _ => None,
        }
    }
    match (a, b) {
        (SortValue::Text(x), SortValue::Text(y)) => x.cmp(y),
        (SortValue::Null, SortValue::Null) => Ordering::Equal,
        _ => number(a)
            .unwrap_or(f64::MIN)
            .total_cmp(&number(b).unwrap_or(f64::MIN)),
    }
}
