//! Addressable container: a nested mapping addressed by delimited paths.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::config::TrictConfig;
use crate::domain::{
    depth, flatten, iter_keys, leaves, lookup, recursive_delete, recursive_set, traverse,
    traverse_keys, KeyPath, Leaves, Map, Node, Separator, Traverse,
};
use crate::errors::{TrictError, TrictResult};

/// Output key to ordered candidate paths, for [`Trict::map_with_dict`].
pub type Mapper = BTreeMap<String, Vec<KeyPath>>;

/// Nested mapping with path-addressed access.
///
/// The container owns its root: construction moves the caller's mapping in
/// without copying it. Clone beforehand to keep an independent copy.
///
/// ```
/// use trict::{Map, Node, Trict};
///
/// let mut tr: Trict<&str> = Trict::new(Map::new()).unwrap();
/// tr.set("user.information.attribute", "infonugget").unwrap();
/// assert_eq!(tr.get_leaf(["user", "information", "attribute"]).unwrap(), Some(&"infonugget"));
/// assert!(tr.contains("user.information"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Trict<V> {
    data: Map<V>,
    config: TrictConfig,
}

impl<V> Trict<V> {
    /// Construct with the default configuration: separator `"."`, strict get.
    pub fn new(data: Map<V>) -> TrictResult<Self> {
        Self::with_config(data, TrictConfig::default())
    }

    /// Construct, rejecting any key anywhere in `data` that contains the separator.
    #[instrument(level = "debug", skip(data))]
    pub fn with_config(data: Map<V>, config: TrictConfig) -> TrictResult<Self> {
        config.separator.validate()?;
        if let Separator::Str(sep) = &config.separator {
            if let Some(key) = iter_keys(&data).find(|key| key.contains(sep.as_str())) {
                debug!("separator {:?} found in key {:?}", sep, key);
                return Err(TrictError::SeparatorInKey {
                    separator: sep.clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(Self { data, config })
    }

    /// Build from a flat mapping of joined paths, splitting each on `separator`.
    pub fn from_flat_dict<I, K, N>(flat: I, separator: Separator) -> TrictResult<Self>
    where
        I: IntoIterator<Item = (K, N)>,
        K: AsRef<str>,
        N: Into<Node<V>>,
    {
        Self::from_flat_dict_with_config(flat, TrictConfig::default().with_separator(separator))
    }

    pub fn from_flat_dict_with_config<I, K, N>(flat: I, config: TrictConfig) -> TrictResult<Self>
    where
        I: IntoIterator<Item = (K, N)>,
        K: AsRef<str>,
        N: Into<Node<V>>,
    {
        let mut data = Map::new();
        for (joined, value) in flat {
            let path = config.separator.split(joined.as_ref())?;
            recursive_set(&mut data, &path, value.into())?;
        }
        Self::with_config(data, config)
    }

    pub fn data(&self) -> &Map<V> {
        &self.data
    }

    pub fn into_inner(self) -> Map<V> {
        self.data
    }

    pub fn config(&self) -> &TrictConfig {
        &self.config
    }

    pub fn separator(&self) -> &Separator {
        &self.config.separator
    }

    pub fn strict_get(&self) -> bool {
        self.config.strict_get
    }

    /// Number of direct children of the root.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Normalize a path into its key sequence using this container's separator.
    pub fn to_keys(&self, path: impl Into<KeyPath>) -> TrictResult<Vec<String>> {
        path.into().resolve(&self.config.separator)
    }

    /// Resolve `path`. Absent paths fail when `strict_get`, otherwise yield `None`.
    ///
    /// Descending through a leaf fails in either mode.
    pub fn get(&self, path: impl Into<KeyPath>) -> TrictResult<Option<&Node<V>>> {
        let keys = self.to_keys(path)?;
        match lookup(&self.data, &keys) {
            Ok(node) => Ok(Some(node)),
            Err(e) if e.is_not_found() && !self.config.strict_get => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`Trict::get`], but the node must be a leaf.
    pub fn get_leaf(&self, path: impl Into<KeyPath>) -> TrictResult<Option<&V>> {
        let keys = self.to_keys(path)?;
        match lookup(&self.data, &keys) {
            Ok(Node::Leaf(value)) => Ok(Some(value)),
            Ok(Node::Map(_)) => Err(TrictError::NotALeaf { path: keys }),
            Err(e) if e.is_not_found() && !self.config.strict_get => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(level = "trace", skip(self, path, value))]
    pub fn set(&mut self, path: impl Into<KeyPath>, value: impl Into<Node<V>>) -> TrictResult<()> {
        let keys = self.to_keys(path)?;
        recursive_set(&mut self.data, &keys, value.into())
    }

    /// Remove and return the node at `path`. Absent paths always fail.
    #[instrument(level = "trace", skip(self, path))]
    pub fn delete(&mut self, path: impl Into<KeyPath>) -> TrictResult<Node<V>> {
        let keys = self.to_keys(path)?;
        recursive_delete(&mut self.data, &keys)
    }

    /// True iff `path` names any node, mapping or leaf.
    pub fn contains(&self, path: impl Into<KeyPath>) -> bool {
        let Ok(keys) = self.to_keys(path) else {
            return false;
        };
        traverse_keys(&self.data).any(|candidate| candidate == keys)
    }

    pub fn traverse(&self) -> Traverse<'_, V> {
        traverse(&self.data)
    }

    pub fn traverse_keys(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        traverse_keys(&self.data)
    }

    pub fn leaves(&self) -> Leaves<'_, V> {
        leaves(&self.data)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> + '_ {
        iter_keys(&self.data)
    }

    pub fn depth(&self) -> usize {
        depth(&self.data)
    }

    /// Flatten with the configured separator (`"."` when disabled) and max depth.
    pub fn flatten(&self) -> TrictResult<BTreeMap<String, V>>
    where
        V: Clone,
    {
        self.flatten_with_depth(self.config.max_depth)
    }

    pub fn flatten_with_depth(&self, max_depth: usize) -> TrictResult<BTreeMap<String, V>>
    where
        V: Clone,
    {
        flatten(&self.data, self.config.separator.join_str(), max_depth)
    }

    /// Replace every leaf with `f(leaf)`.
    ///
    /// Leaf paths are collected before the first write, so values returned by
    /// `f` (mappings included) are never visited again.
    #[instrument(level = "trace", skip(self, f))]
    pub fn map_leaves<F, N>(&mut self, mut f: F) -> TrictResult<()>
    where
        F: FnMut(&V) -> N,
        N: Into<Node<V>>,
    {
        let paths: Vec<Vec<String>> = leaves(&self.data).map(|(path, _)| path).collect();
        for path in paths {
            let replacement = match lookup(&self.data, &path)? {
                Node::Leaf(value) => f(value).into(),
                Node::Map(_) => continue,
            };
            recursive_set(&mut self.data, &path, replacement)?;
        }
        Ok(())
    }

    /// Return the node of the first candidate path that resolves.
    ///
    /// Candidates are always resolved strictly, independent of `strict_get`;
    /// only not-found failures move on to the next candidate. When nothing
    /// resolves the result is `NoCandidateFound` if `strict`, else `None`.
    pub fn get_by_list<I, P>(&self, candidates: I, strict: bool) -> TrictResult<Option<&Node<V>>>
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPath>,
    {
        let mut tried = Vec::new();
        for candidate in candidates {
            let keys = self.to_keys(candidate)?;
            match lookup(&self.data, &keys) {
                Ok(node) => return Ok(Some(node)),
                Err(e) if e.is_not_found() => tried.push(keys),
                Err(e) => return Err(e),
            }
        }
        if strict {
            Err(TrictError::NoCandidateFound { candidates: tried })
        } else {
            Ok(None)
        }
    }

    /// Read-only reshape: each output key maps to `get_by_list(candidates, strict)`.
    pub fn map_with_dict(
        &self,
        mapper: &Mapper,
        strict: bool,
    ) -> TrictResult<BTreeMap<String, Option<&Node<V>>>> {
        let mut mapped = BTreeMap::new();
        for (key, candidates) in mapper {
            let node = self.get_by_list(candidates.iter().cloned(), strict)?;
            mapped.insert(key.clone(), node);
        }
        Ok(mapped)
    }

    /// Destructive reshape: replace this container's contents with the
    /// [`Trict::map_with_dict`] result.
    ///
    /// Output keys whose candidates all miss are left out. Output keys
    /// containing the separator are rejected before anything changes.
    #[instrument(level = "debug", skip(self, mapper))]
    pub fn reshape_with_dict(&mut self, mapper: &Mapper, strict: bool) -> TrictResult<()>
    where
        V: Clone,
    {
        if let Separator::Str(sep) = &self.config.separator {
            if let Some(key) = mapper.keys().find(|key| key.contains(sep.as_str())) {
                return Err(TrictError::SeparatorInKey {
                    separator: sep.clone(),
                    key: key.clone(),
                });
            }
        }

        let reshaped: Map<V> = self
            .map_with_dict(mapper, strict)?
            .into_iter()
            .filter_map(|(key, node)| node.map(|node| (key, node.clone())))
            .collect();
        debug!(
            "reshaped into {} of {} mapped keys",
            reshaped.len(),
            mapper.len()
        );
        self.data = reshaped;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    fn sample() -> Trict<&'static str> {
        Trict::from_flat_dict(
            [
                ("user.information.attribute", "infonugget"),
                ("user.information.another_attribute", "secondnugget"),
                ("user.moreinformation", "extranugget"),
            ],
            Separator::default(),
        )
        .unwrap()
    }

    #[test]
    fn given_path_when_normalizing_then_key_list() {
        let tr = sample();
        assert_eq!(tr.to_keys("i.j.k").unwrap(), vec!["i", "j", "k"]);
        assert_eq!(tr.to_keys(vec!["i.j", "k"]).unwrap(), vec!["i.j", "k"]);
    }

    #[test]
    fn given_trict_when_inspecting_then_accessors_reflect_config() {
        let tr = sample();
        assert_eq!(tr.len(), 1);
        assert!(!tr.is_empty());
        assert!(tr.strict_get());
        assert_eq!(tr.separator(), &Separator::default());
        assert_eq!(tr.depth(), 3);
        assert_eq!(tr.keys().count(), 5);
        assert_eq!(tr.clone().into_inner(), *tr.data());
    }

    #[test]
    fn given_mapping_node_when_getting_leaf_then_not_a_leaf() {
        let tr = sample();
        assert!(matches!(
            tr.get_leaf("user.information"),
            Err(TrictError::NotALeaf { .. })
        ));
    }

    #[test]
    fn given_missing_leaf_when_getting_leaf_then_strictness_decides() {
        let strict = sample();
        assert!(matches!(
            strict.get_leaf("user.nothing"),
            Err(TrictError::PathNotFound { .. })
        ));

        let lenient = Trict::with_config(
            sample().into_inner(),
            TrictConfig::default().with_strict_get(false),
        )
        .unwrap();
        assert_eq!(lenient.get_leaf("user.nothing").unwrap(), None);
    }

    #[test]
    fn given_leaf_on_path_when_getting_then_structural_error_even_if_lenient() {
        let tr = Trict::with_config(
            sample().into_inner(),
            TrictConfig::default().with_strict_get(false),
        )
        .unwrap();
        assert!(matches!(
            tr.get("user.moreinformation.deeper"),
            Err(TrictError::NotAMapping { .. })
        ));
    }

    #[test]
    fn given_lenient_trict_when_getting_by_list_then_skips_missing_candidates() {
        let tr = Trict::with_config(
            sample().into_inner(),
            TrictConfig::default().with_strict_get(false),
        )
        .unwrap();
        let found = tr
            .get_by_list(["nope.here", "user.moreinformation"], false)
            .unwrap();
        assert_eq!(found, Some(&Node::Leaf("extranugget")));
    }

    #[test]
    fn given_leaf_on_candidate_path_when_getting_by_list_then_propagates() {
        let tr = sample();
        let result = tr.get_by_list(["user.moreinformation.x", "user.moreinformation"], false);
        assert!(matches!(result, Err(TrictError::NotAMapping { .. })));
    }
}
