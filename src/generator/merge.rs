use std::collections::BTreeMap;

/// Merges resource-level and action-level specifications.
///
/// Entries of `overrides` replace entries of `base` with the same key. Either side may
/// be absent or empty, in which case the other side is returned as is. Neither input is
/// modified.
///
/// ```rust
/// use appgen::generator::merge;
/// use std::collections::BTreeMap;
///
/// let base = BTreeMap::from([("OK".to_string(), 1)]);
/// let overrides = BTreeMap::from([("OK".to_string(), 2)]);
/// let merged = merge(Some(&base), Some(&overrides)).unwrap();
/// assert_eq!(merged["OK"], 2);
/// ```
pub fn merge<V: Clone>(
    base: Option<&BTreeMap<String, V>>,
    overrides: Option<&BTreeMap<String, V>>,
) -> Option<BTreeMap<String, V>> {
    match (base, overrides) {
        (None, None) => None,
        (Some(base), None) => Some(base.clone()),
        (None, Some(overrides)) => Some(overrides.clone()),
        (Some(base), Some(overrides)) if base.is_empty() => Some(overrides.clone()),
        (Some(base), Some(overrides)) if overrides.is_empty() => Some(base.clone()),
        (Some(base), Some(overrides)) => {
            let mut merged = base.clone();
            merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            Some(merged)
        }
    }
}
