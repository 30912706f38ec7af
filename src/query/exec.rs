use std::collections::HashSet;
use std::fmt::Write as _;
use std::time::Instant;

use crate::matcher::Matcher;
use crate::sort::sort_refs;
use crate::value::Value;

use super::types::{DEFAULT_PAGE_SIZE, Distinct, FindManyResult, FindQuery, PageInfo};

/// Filter, sort, deduplicate and paginate `items`.
#[must_use]
pub fn find_many(query: &FindQuery, items: &[Value]) -> FindManyResult {
    find_many_with(&Matcher::new(&query.filter), query, items, DEFAULT_PAGE_SIZE)
}

/// First record matching `where`, in `orderBy` order.
#[must_use]
pub fn find_unique(query: &FindQuery, items: &[Value]) -> Option<Value> {
    find_unique_with(&Matcher::new(&query.filter), query, items)
}

/// Like [`find_unique`], but honours `distinct` and `skip`.
#[must_use]
pub fn find_first(query: &FindQuery, items: &[Value]) -> Option<Value> {
    find_first_with(&Matcher::new(&query.filter), query, items)
}

/// Number of distinct records matching `where`; ignores pagination.
#[must_use]
pub fn count(query: &FindQuery, items: &[Value]) -> usize {
    count_with(&Matcher::new(&query.filter), query, items)
}

pub(crate) fn find_many_with(
    matcher: &Matcher,
    query: &FindQuery,
    items: &[Value],
    default_page_size: usize,
) -> FindManyResult {
    let started = Instant::now();
    let hits = select(matcher, query, items);
    let (window, pagination) = paginate(hits.len(), query, default_page_size);
    let data: Vec<Value> = hits[window].iter().map(|v| (*v).clone()).collect();
    crate::utils::devlog::bench(
        "query",
        "find_many",
        &[
            ("duration_us", u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)),
            ("scanned", items.len() as u64),
            ("total_items", pagination.total_items as u64),
            ("result_count", data.len() as u64),
            ("page", pagination.page as u64),
            ("size", pagination.size as u64),
        ],
    );
    FindManyResult { data, pagination }
}

pub(crate) fn find_unique_with(matcher: &Matcher, query: &FindQuery, items: &[Value]) -> Option<Value> {
    let mut hits: Vec<&Value> = items.iter().filter(|r| matcher.matches(r)).collect();
    if let Some(spec) = &query.order_by {
        sort_refs(&mut hits, spec);
    }
    hits.first().map(|v| (*v).clone())
}

pub(crate) fn find_first_with(matcher: &Matcher, query: &FindQuery, items: &[Value]) -> Option<Value> {
    let hits = select(matcher, query, items);
    hits.get(query.skip.unwrap_or(0)).map(|v| (*v).clone())
}

pub(crate) fn count_with(matcher: &Matcher, query: &FindQuery, items: &[Value]) -> usize {
    let mut hits: Vec<&Value> = items.iter().filter(|r| matcher.matches(r)).collect();
    if let Some(d) = &query.distinct {
        dedupe(&mut hits, d);
    }
    hits.len()
}

/// Matched, sorted and deduplicated records, borrowed from `items`.
fn select<'a>(matcher: &Matcher, query: &FindQuery, items: &'a [Value]) -> Vec<&'a Value> {
    let mut hits: Vec<&Value> = items.iter().filter(|r| matcher.matches(r)).collect();
    if let Some(spec) = &query.order_by {
        sort_refs(&mut hits, spec);
    }
    if let Some(d) = &query.distinct {
        dedupe(&mut hits, d);
    }
    hits
}

/// Keep the first occurrence of each distinct key.
fn dedupe(hits: &mut Vec<&Value>, distinct: &Distinct) {
    let fields: Vec<&str> = match distinct {
        Distinct::All(false) => return,
        Distinct::All(true) => Vec::new(),
        Distinct::Field(f) => vec![f.as_str()],
        Distinct::Fields(fs) => fs.iter().map(String::as_str).collect(),
    };
    let mut seen: HashSet<String> = HashSet::with_capacity(hits.len());
    hits.retain(|record| {
        let record: &Value = *record;
        let mut key = String::new();
        if fields.is_empty() {
            write_key(record, &mut key);
        } else {
            for f in &fields {
                write_key(record.get_path(f), &mut key);
                key.push('\u{1f}');
            }
        }
        seen.insert(key)
    });
}

/// Canonical text of a value: structurally equal values write the same key.
/// Records are `BTreeMap`s, so key order is already fixed.
fn write_key(value: &Value, out: &mut String) {
    match value {
        Value::Undefined => out.push('u'),
        Value::Null => out.push('n'),
        Value::Bool(b) => out.push(if *b { 't' } else { 'f' }),
        // -0.0 == 0.0
        Value::Number(n) if *n == 0.0 => out.push_str("#0"),
        Value::Number(n) => {
            let _ = write!(out, "#{n:?}");
        }
        Value::String(s) => {
            let _ = write!(out, "{s:?}");
        }
        Value::Date(d) => {
            let _ = write!(out, "@{d:?}");
        }
        Value::Array(items) => {
            out.push('[');
            for item in items {
                write_key(item, out);
                out.push(',');
            }
            out.push(']');
        }
        Value::Record(map) => {
            out.push('{');
            for (k, v) in map {
                let _ = write!(out, "{k:?}:");
                write_key(v, out);
                out.push(',');
            }
            out.push('}');
        }
    }
}

/// Slice bounds into the matched records plus the page metadata.
fn paginate(total: usize, query: &FindQuery, default_page_size: usize) -> (std::ops::Range<usize>, PageInfo) {
    let (start, size, page) = if query.skip.is_some() || query.take.is_some() {
        let skip = query.skip.unwrap_or(0);
        let size = query.take.unwrap_or_else(|| total.saturating_sub(skip));
        let page = if size == 0 { 1 } else { skip / size + 1 };
        (skip, size, page)
    } else {
        let req = query.pagination.unwrap_or_default();
        let size = req.size.unwrap_or(default_page_size);
        let page = req.page.unwrap_or(1).max(1);
        ((page - 1).saturating_mul(size), size, page)
    };
    let start = start.min(total);
    let end = start.saturating_add(size).min(total);
    let total_pages = if size == 0 { 0 } else { total.div_ceil(size) };
    let info = PageInfo {
        page,
        size,
        total_items: total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    };
    (start..end, info)
}
