use std::collections::{BTreeMap, BTreeSet};

use super::{
    error::ResolveError,
    value::{expect_array, expect_array_len, expect_int, expect_time, TraceValue},
    Resolve,
};

/// Shape of the information the tracer records for one call of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `[before, after]`, elements linked by consecutive times.
    Peek,
    /// `[before, after, mapping]`, elements linked by an explicit mapping.
    Distinct,
    /// `[before]`, nothing comes out of a terminal call.
    Terminal,
}

impl CallKind {
    pub fn info_len(&self) -> usize {
        match self {
            CallKind::Peek => 2,
            CallKind::Distinct => 3,
            CallKind::Terminal => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTrace {
    pub name: String,
    pub kind: CallKind,
}

impl CallTrace {
    pub fn new(name: impl Into<String>, kind: CallKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceElement {
    pub time: usize,
    pub value: TraceValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub name: String,
    pub before: Vec<TraceElement>,
    pub after: Vec<TraceElement>,
    /// `(before time, after time)` pairs.
    pub links: Vec<(usize, usize)>,
}

impl ResolvedCall {
    pub fn next_values(&self, time: usize) -> Vec<&TraceElement> {
        self.links
            .iter()
            .filter(|(before, _)| *before == time)
            .filter_map(|(_, after)| find(&self.after, *after))
            .collect()
    }

    pub fn previous_values(&self, time: usize) -> Vec<&TraceElement> {
        self.links
            .iter()
            .filter(|(_, after)| *after == time)
            .filter_map(|(before, _)| find(&self.before, *before))
            .collect()
    }
}

fn find(elements: &[TraceElement], time: usize) -> Option<&TraceElement> {
    elements
        .binary_search_by_key(&time, |element| element.time)
        .ok()
        .map(|idx| &elements[idx])
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrace {
    pub calls: Vec<ResolvedCall>,
    pub result: TraceValue,
    /// Evaluation time in nanoseconds, when the tracer measured it.
    pub elapsed: Option<i64>,
}

/*
 * @desc Resolve the raw value of a traced chain
 *
 * @layout
 * Trace   := [ Info, Result, Elapsed ]
 * Info    := [ Call* ]
 * Map     := [ [Time*], [Value*] ]
 * Mapping := [ [Time*], [[Time*]*] ]
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceResolver {
    calls: Vec<CallTrace>,
}

impl TraceResolver {
    pub fn new(calls: Vec<CallTrace>) -> Self {
        Self { calls }
    }

    pub fn calls(&self) -> &[CallTrace] {
        &self.calls
    }
}

impl Resolve for TraceResolver {
    type Output = ResolvedTrace;

    fn resolve(&self, raw: &TraceValue) -> Result<Self::Output, ResolveError> {
        let parts = expect_array_len(raw, 3, "trace")?;
        let info = expect_array_len(&parts[0], self.calls.len(), "trace info")?;

        let mut calls = Vec::with_capacity(self.calls.len());
        for (idx, (call, raw_call)) in self.calls.iter().zip(info).enumerate() {
            let resolved = call
                .resolve(raw_call)
                .map_err(|err| {
                    log::debug!("call #{idx} ({}) could not be resolved: {err}", call.name);
                    err
                })?;
            log::trace!(
                "resolved {} : {} before, {} after, {} links",
                call.name,
                resolved.before.len(),
                resolved.after.len(),
                resolved.links.len()
            );
            calls.push(resolved);
        }

        let elapsed = match &parts[2] {
            TraceValue::Null => None,
            value => Some(expect_int(value, "elapsed time")?),
        };

        Ok(ResolvedTrace {
            calls,
            result: parts[1].clone(),
            elapsed,
        })
    }
}

impl Resolve for CallTrace {
    type Output = ResolvedCall;

    fn resolve(&self, raw: &TraceValue) -> Result<Self::Output, ResolveError> {
        let parts = expect_array_len(raw, self.kind.info_len(), "call info")?;
        let before = resolve_map(&parts[0], "before")?;
        let (after, links) = match self.kind {
            CallKind::Terminal => (BTreeMap::new(), Vec::new()),
            CallKind::Peek => {
                let after = resolve_map(&parts[1], "after")?;
                let links = before
                    .keys()
                    .filter(|time| after.contains_key(&(**time + 1)))
                    .map(|time| (*time, *time + 1))
                    .collect();
                (after, links)
            }
            CallKind::Distinct => {
                let after = resolve_map(&parts[1], "after")?;
                let links = resolve_mapping(&parts[2], &before, &after)?;
                (after, links)
            }
        };

        Ok(ResolvedCall {
            name: self.name.clone(),
            before: into_elements(before),
            after: into_elements(after),
            links,
        })
    }
}

fn into_elements(map: BTreeMap<usize, TraceValue>) -> Vec<TraceElement> {
    map.into_iter()
        .map(|(time, value)| TraceElement { time, value })
        .collect()
}

fn resolve_times(raw: &[TraceValue], what: &str) -> Result<Vec<usize>, ResolveError> {
    raw.iter().map(|value| expect_time(value, what)).collect()
}

fn resolve_map(raw: &TraceValue, what: &str) -> Result<BTreeMap<usize, TraceValue>, ResolveError> {
    let parts = expect_array_len(raw, 2, what)?;
    let keys = expect_array(&parts[0], &format!("{what} keys"))?;
    let values = expect_array_len(&parts[1], keys.len(), &format!("{what} values"))?;
    let times = resolve_times(keys, &format!("{what} keys"))?;

    let mut map = BTreeMap::new();
    for (time, value) in times.into_iter().zip(values) {
        if map.insert(time, value.clone()).is_some() {
            return Err(ResolveError::unexpected_value(format!(
                "{what} keys: time {time} is recorded twice"
            ))
            .raised(what));
        }
    }
    Ok(map)
}

fn resolve_mapping(
    raw: &TraceValue,
    before: &BTreeMap<usize, TraceValue>,
    after: &BTreeMap<usize, TraceValue>,
) -> Result<Vec<(usize, usize)>, ResolveError> {
    let parts = expect_array_len(raw, 2, "mapping")?;
    let keys = expect_array(&parts[0], "mapping keys")?;
    let values = expect_array_len(&parts[1], keys.len(), "mapping values")?;
    let after_times = resolve_times(keys, "mapping keys")?;

    let mut seen = BTreeSet::new();
    let mut links = Vec::new();
    for (after_time, sources) in after_times.into_iter().zip(values) {
        if !after.contains_key(&after_time) {
            return Err(ResolveError::unexpected_value(format!(
                "mapping keys: time {after_time} is not an after time"
            ))
            .raised("mapping"));
        }
        if !seen.insert(after_time) {
            return Err(ResolveError::unexpected_value(format!(
                "mapping keys: time {after_time} is recorded twice"
            ))
            .raised("mapping"));
        }
        let sources = expect_array(sources, "mapping values")?;
        for before_time in resolve_times(sources, "mapping values")? {
            if !before.contains_key(&before_time) {
                return Err(ResolveError::unexpected_value(format!(
                    "mapping values: time {before_time} is not a before time"
                ))
                .raised("mapping"));
            }
            links.push((before_time, after_time));
        }
    }
    links.sort_unstable();
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::error::ResolveErrorKind;

    fn array(values: Vec<TraceValue>) -> TraceValue {
        TraceValue::Array(values)
    }

    fn times(values: &[i64]) -> TraceValue {
        array(values.iter().copied().map(TraceValue::Int).collect())
    }

    fn map(keys: &[i64], values: &[i64]) -> TraceValue {
        array(vec![times(keys), times(values)])
    }

    fn trace(info: Vec<TraceValue>) -> TraceValue {
        array(vec![array(info), TraceValue::Int(42), TraceValue::Int(1000)])
    }

    #[test]
    fn valid_peek() {
        // filter(x -> x != 2) over [1, 2, 3]
        let call = CallTrace::new("filter", CallKind::Peek);
        let res = call.resolve(&array(vec![map(&[1, 3, 5], &[1, 2, 3]), map(&[2, 6], &[1, 3])]));
        assert!(res.is_ok());
        let value = res.unwrap();
        assert_eq!(value.before.len(), 3);
        assert_eq!(value.after.len(), 2);
        assert_eq!(value.links, vec![(1, 2), (5, 6)]);
        assert_eq!(value.next_values(5)[0].value, TraceValue::Int(3));
        assert!(value.next_values(3).is_empty());
        assert_eq!(value.previous_values(2)[0].time, 1);
    }

    #[test]
    fn valid_distinct() {
        let call = CallTrace::new("distinct", CallKind::Distinct);
        let mapping = array(vec![times(&[4, 5]), array(vec![times(&[1, 3]), times(&[2])])]);
        let res = call.resolve(&array(vec![
            map(&[1, 2, 3], &[7, 8, 7]),
            map(&[4, 5], &[7, 8]),
            mapping,
        ]));
        assert!(res.is_ok());
        let value = res.unwrap();
        assert_eq!(value.links, vec![(1, 4), (2, 5), (3, 4)]);
        assert_eq!(value.previous_values(4).len(), 2);
    }

    #[test]
    fn valid_trace() {
        let resolver = TraceResolver::new(vec![
            CallTrace::new("map", CallKind::Peek),
            CallTrace::new("count", CallKind::Terminal),
        ]);
        let res = resolver.resolve(&trace(vec![
            array(vec![map(&[1, 3], &[10, 20]), map(&[2, 4], &[11, 21])]),
            array(vec![map(&[2, 4], &[11, 21])]),
        ]));
        assert!(res.is_ok());
        let value = res.unwrap();
        assert_eq!(value.calls.len(), 2);
        assert_eq!(value.calls[0].links, vec![(1, 2), (3, 4)]);
        assert!(value.calls[1].after.is_empty());
        assert_eq!(value.result, TraceValue::Int(42));
        assert_eq!(value.elapsed, Some(1000));
    }

    #[test]
    fn missing_elapsed_time() {
        let resolver = TraceResolver::new(vec![]);
        let raw = array(vec![array(vec![]), TraceValue::Null, TraceValue::Null]);
        let value = resolver.resolve(&raw).unwrap();
        assert_eq!(value.elapsed, None);
        assert!(value.calls.is_empty());
    }

    #[test]
    fn robustness_trace_length() {
        let resolver = TraceResolver::new(vec![]);
        let err = resolver
            .resolve(&array(vec![array(vec![]), TraceValue::Null]))
            .unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedArrayLength);
        assert_eq!(err.message(), "expected array length 3, but found 2");
    }

    #[test]
    fn robustness_call_count() {
        let resolver = TraceResolver::new(vec![CallTrace::new("count", CallKind::Terminal)]);
        let err = resolver.resolve(&trace(vec![])).unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedArrayLength);
        assert_eq!(err.message(), "expected array length 1, but found 0");
    }

    #[test]
    fn robustness_keys_values() {
        let resolver = TraceResolver::new(vec![CallTrace::new("map", CallKind::Peek)]);
        let err = resolver
            .resolve(&trace(vec![array(vec![
                map(&[1, 3, 5], &[1, 2]),
                map(&[2], &[1]),
            ])]))
            .unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedArrayLength);
        assert_eq!(err.message(), "expected array length 3, but found 2");
    }

    #[test]
    fn robustness_call_info() {
        let call = CallTrace::new("distinct", CallKind::Distinct);
        let err = call
            .resolve(&array(vec![map(&[], &[]), map(&[], &[])]))
            .unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedArrayLength);
    }

    #[test]
    fn robustness_duplicated_time() {
        let call = CallTrace::new("count", CallKind::Terminal);
        let err = call.resolve(&array(vec![map(&[1, 1], &[1, 2])])).unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedValue);
        assert_eq!(err.message(), "before keys: time 1 is recorded twice");
    }

    #[test]
    fn robustness_negative_time() {
        let call = CallTrace::new("map", CallKind::Peek);
        let err = call
            .resolve(&array(vec![map(&[1, -4], &[1, 2]), map(&[2], &[1])]))
            .unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedValue);
        assert_eq!(err.message(), "before keys: time must be non-negative, found -4");
    }

    #[test]
    fn robustness_value_type() {
        let call = CallTrace::new("count", CallKind::Terminal);
        let raw = array(vec![array(vec![
            array(vec![TraceValue::Str("1".to_string())]),
            times(&[1]),
        ])]);
        let err = call.resolve(&raw).unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedValueType);
    }

    #[test]
    fn robustness_unknown_mapping() {
        let call = CallTrace::new("distinct", CallKind::Distinct);
        let mapping = array(vec![times(&[4]), array(vec![times(&[9])])]);
        let err = call
            .resolve(&array(vec![map(&[1], &[7]), map(&[4], &[7]), mapping]))
            .unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedValue);
        assert_eq!(err.message(), "mapping values: time 9 is not a before time");
    }

    #[test]
    fn robustness_mapping_unknown_after_time() {
        let call = CallTrace::new("distinct", CallKind::Distinct);
        let mapping = array(vec![times(&[8]), array(vec![times(&[1])])]);
        let err = call
            .resolve(&array(vec![map(&[1], &[7]), map(&[4], &[7]), mapping]))
            .unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedValue);
        assert_eq!(err.message(), "mapping keys: time 8 is not an after time");
    }

    #[test]
    fn robustness_mapping_repeated_key() {
        let call = CallTrace::new("distinct", CallKind::Distinct);
        let mapping = array(vec![
            times(&[4, 4]),
            array(vec![times(&[1]), times(&[2])]),
        ]);
        let err = call
            .resolve(&array(vec![
                map(&[1, 2], &[7, 7]),
                map(&[4], &[7]),
                mapping,
            ]))
            .unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::UnexpectedValue);
        assert_eq!(err.message(), "mapping keys: time 4 is recorded twice");
    }
}
