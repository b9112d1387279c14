//! Ordered request parameters.

use std::collections::BTreeMap;

/// A collection of values submitted along with a request.
///
/// Unlike a map, duplicate keys are allowed and entries are encoded in the
/// order they were added. The API relies on both for array-like parameters
/// such as `expand[]=a&expand[]=b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestValues {
    values: Vec<(String, String)>,
}

impl RequestValues {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    /// Set the first pair with the given key to `value`, or append a new pair
    /// if the key is not present.
    ///
    /// Later pairs with the same key are left untouched. O(n).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value.into(),
            None => self.values.push((key, value.into())),
        }
    }

    /// All values for `key`, in insertion order. O(n).
    pub fn get(&self, key: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Encode as `application/x-www-form-urlencoded` (`bar=baz&foo=quux`),
    /// preserving insertion order.
    pub fn encode(&self) -> String {
        // Serializing a sequence of string pairs cannot fail.
        serde_urlencoded::to_string(&self.values).unwrap_or_default()
    }

    /// Returns true if no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of pairs, duplicates included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Group values by key.
    ///
    /// Useful for order-insensitive comparisons. The grouping loses the
    /// interleaving of different keys, so it must not be used to build a
    /// request body.
    pub fn to_values(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, v) in &self.values {
            grouped.entry(k.clone()).or_default().push(v.clone());
        }
        grouped
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = RequestValues::new();
        values.extend(iter);
        values
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RequestValues {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(encoded: &str) -> Vec<(String, String)> {
        serde_urlencoded::from_str(encoded).unwrap()
    }

    #[test]
    fn test_encode_preserves_order_and_duplicates() {
        let mut values = RequestValues::new();
        values.add("arr[][foo]", "foo0");
        values.add("arr[][bar]", "bar0");
        values.add("arr[][foo]", "foo1");
        values.add("arr[][bar]", "bar1");

        let decoded = decode(&values.encode());
        assert_eq!(
            decoded,
            vec![
                ("arr[][foo]".to_string(), "foo0".to_string()),
                ("arr[][bar]".to_string(), "bar0".to_string()),
                ("arr[][foo]".to_string(), "foo1".to_string()),
                ("arr[][bar]".to_string(), "bar1".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let mut values = RequestValues::new();
        values.add("name", "Nguyễn Văn A");
        values.add("q", "a&b=c");

        let encoded = values.encode();
        assert!(!encoded.contains(' '));
        assert!(encoded.contains("q=a%26b%3Dc"));
        assert_eq!(
            decode(&encoded),
            vec![
                ("name".to_string(), "Nguyễn Văn A".to_string()),
                ("q".to_string(), "a&b=c".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_empty() {
        let values = RequestValues::new();
        assert!(values.is_empty());
        assert_eq!(values.encode(), "");
    }

    #[test]
    fn test_is_empty_after_add() {
        let mut values = RequestValues::new();
        values.add("a", "");
        assert!(!values.is_empty());
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_set_replaces_first_only() {
        let mut values = RequestValues::new();
        values.add("k", "1");
        values.add("other", "x");
        values.add("k", "2");
        values.set("k", "3");

        assert_eq!(values.get("k"), vec!["3", "2"]);
        assert_eq!(values.encode(), "k=3&other=x&k=2");
    }

    #[test]
    fn test_set_appends_missing_key() {
        let mut values = RequestValues::new();
        values.add("a", "1");
        values.set("b", "2");
        assert_eq!(values.encode(), "a=1&b=2");
    }

    #[test]
    fn test_get_missing_key() {
        let values: RequestValues = [("a", "1")].into_iter().collect();
        assert!(values.get("b").is_empty());
    }

    #[test]
    fn test_to_values_groups_by_key() {
        let values: RequestValues = [("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
        let grouped = values.to_values();
        assert_eq!(grouped["b"], vec!["1", "3"]);
        assert_eq!(grouped["a"], vec!["2"]);
    }
}
