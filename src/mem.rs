//! In-memory tree and clock providers.
//!
//! [`MemTree`] is an arena-backed configuration tree with a programmatic
//! builder API and a TOML loader, implementing [`TreeSource`] for tests and
//! for consumers without a platform tree. [`MemClocks`] is the matching
//! map-backed [`ClockProvider`].
//!
//! # TOML schema
//!
//! Tables become nodes, scalars become properties. `true` marks a
//! presence-only flag (`false` omits it). A table carrying a `ref` key is a
//! reference entry pointing at another node by absolute path, whether
//! written inline or as a section; `ref` is therefore reserved and cannot
//! name a property or child node:
//!
//! ```toml
//! [sound]
//! "simple-audio-card,format" = "i2s"
//! "simple-audio-card,bitclock-master" = { ref = "/wm8962" }
//!
//! [sound.cpu]
//! sound-dai = { ref = "/sai2", args = [0] }
//! ```
//!
//! References may point forward; paths are resolved after the whole
//! document has been walked.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::clock::{Clock, ClockError, ClockProvider};
use crate::error::ResolveError;
use crate::format::DaiFormat;
use crate::tree::{FormatAnnotations, RefEntry, TreeSource};

/// Reference-list property naming a subnode's DAI.
const SOUND_DAI: &str = "sound-dai";
/// Argument-count declaration consulted for `sound-dai` references.
const SOUND_DAI_CELLS: &str = "#sound-dai-cells";
/// Display-name property on a DAI controller node.
const DAI_NAME: &str = "dai-name";

/// Key marking a TOML table as a reference entry. Reserved: a node cannot
/// carry a property or child of this name.
const REF_KEY: &str = "ref";
/// Key holding the auxiliary arguments of a TOML reference entry.
const ARGS_KEY: &str = "args";

/// Handle to one node of a [`MemTree`].
///
/// A plain arena index: cheap to copy, compared by value for node identity.
/// Handles are only meaningful for the tree that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A property value held by a [`MemTree`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// Presence-only flag.
    Empty,
    /// 32-bit integer cell.
    U32(u32),
    /// String value.
    Str(String),
    /// Reference list: target nodes plus auxiliary arguments.
    RefList(Vec<RefEntry<NodeId>>),
}

impl PropValue {
    /// Short label for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "flag",
            Self::U32(_) => "u32",
            Self::Str(_) => "string",
            Self::RefList(_) => "reference list",
        }
    }
}

#[derive(Debug)]
struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    properties: BTreeMap<String, PropValue>,
}

/// In-memory configuration tree.
#[derive(Debug)]
pub struct MemTree {
    nodes: Vec<NodeData>,
}

impl MemTree {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                name: String::new(),
                parent: None,
                children: Vec::new(),
                properties: BTreeMap::new(),
            }],
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child node under `parent` and return its handle.
    pub fn add_node(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            properties: BTreeMap::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Set a property to an explicit value, replacing any previous one.
    pub fn set(&mut self, node: NodeId, property: &str, value: PropValue) {
        self.nodes[node.index()]
            .properties
            .insert(property.to_string(), value);
    }

    /// Set a presence-only flag property.
    pub fn set_flag(&mut self, node: NodeId, property: &str) {
        self.set(node, property, PropValue::Empty);
    }

    /// Set a numeric property.
    pub fn set_u32(&mut self, node: NodeId, property: &str, value: u32) {
        self.set(node, property, PropValue::U32(value));
    }

    /// Set a string property.
    pub fn set_string(&mut self, node: NodeId, property: &str, value: &str) {
        self.set(node, property, PropValue::Str(value.to_string()));
    }

    /// Set a single-entry reference-list property.
    pub fn set_ref(&mut self, node: NodeId, property: &str, target: NodeId, args: &[u32]) {
        self.set(
            node,
            property,
            PropValue::RefList(vec![RefEntry {
                node: target,
                args: args.to_vec(),
            }]),
        );
    }

    /// Name of `node` (empty for the root).
    pub fn name(&self, node: NodeId) -> &str {
        &self.data(node).name
    }

    /// Absolute path of `node`, for example `/sound/cpu`.
    pub fn path(&self, node: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let data = self.data(id);
            if data.parent.is_some() {
                parts.push(data.name.as_str());
            }
            current = data.parent;
        }
        if parts.is_empty() {
            return "/".to_string();
        }
        parts.reverse();
        let mut path = String::new();
        for part in parts {
            path.push('/');
            path.push_str(part);
        }
        path
    }

    /// Look a node up by absolute path, for example `/sound/cpu`.
    pub fn node_by_path(&self, path: &str) -> Option<NodeId> {
        let mut current = self.root();
        for part in path.split('/').filter(|part| !part.is_empty()) {
            current = *self
                .data(current)
                .children
                .iter()
                .find(|child| self.data(**child).name == part)?;
        }
        Some(current)
    }

    fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.index()]
    }

    fn prop(&self, node: NodeId, property: &str) -> Option<&PropValue> {
        self.data(node).properties.get(property)
    }
}

impl Default for MemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSource for MemTree {
    type Node = NodeId;

    fn format_annotations(&self, node: &NodeId, prefix: &str) -> FormatAnnotations<NodeId> {
        let mut ann = FormatAnnotations::default();

        if let Some(PropValue::Str(name)) = self.prop(*node, &format!("{prefix}format")) {
            match name.parse::<DaiFormat>() {
                Ok(protocol) => ann.format |= protocol,
                Err(err) => debug!(%err, "ignoring unrecognized format annotation"),
            }
        }
        if self
            .prop(*node, &format!("{prefix}continuous-clock"))
            .is_some()
        {
            ann.format |= DaiFormat::CONTINUOUS_CLOCK;
        }
        if self
            .prop(*node, &format!("{prefix}bitclock-inversion"))
            .is_some()
        {
            ann.format |= DaiFormat::BITCLOCK_INVERTED;
        }
        if self
            .prop(*node, &format!("{prefix}frame-inversion"))
            .is_some()
        {
            ann.format |= DaiFormat::FRAME_INVERTED;
        }

        if let Some(value) = self.prop(*node, &format!("{prefix}bitclock-master")) {
            ann.format |= DaiFormat::CODEC_BITCLOCK_PROVIDER;
            if let PropValue::RefList(entries) = value {
                ann.bitclock_master = entries.first().map(|entry| entry.node);
            }
        }
        if let Some(value) = self.prop(*node, &format!("{prefix}frame-master")) {
            ann.format |= DaiFormat::CODEC_FRAME_PROVIDER;
            if let PropValue::RefList(entries) = value {
                ann.frame_master = entries.first().map(|entry| entry.node);
            }
        }

        ann
    }

    fn read_u32(&self, node: &NodeId, property: &str) -> Result<Option<u32>, ResolveError> {
        match self.prop(*node, property) {
            None => Ok(None),
            Some(PropValue::U32(value)) => Ok(Some(*value)),
            Some(other) => Err(ResolveError::malformed(
                property,
                format!("expected u32, found {}", other.kind()),
            )),
        }
    }

    fn read_string(&self, node: &NodeId, property: &str) -> Result<Option<String>, ResolveError> {
        match self.prop(*node, property) {
            None => Ok(None),
            Some(PropValue::Str(value)) => Ok(Some(value.clone())),
            Some(other) => Err(ResolveError::malformed(
                property,
                format!("expected string, found {}", other.kind()),
            )),
        }
    }

    fn ref_list_entry(
        &self,
        node: &NodeId,
        list_name: &str,
        cells_name: &str,
        index: usize,
    ) -> Result<RefEntry<NodeId>, ResolveError> {
        let entries = match self.prop(*node, list_name) {
            Some(PropValue::RefList(entries)) => entries,
            Some(other) => {
                return Err(ResolveError::malformed(
                    list_name,
                    format!("expected reference list, found {}", other.kind()),
                ))
            }
            None => return Err(ResolveError::not_found(list_name)),
        };

        let entry = entries
            .get(index)
            .ok_or_else(|| ResolveError::not_found(list_name))?;

        // The target's argument-count declaration, when present, must match
        // the entry.
        match self.prop(entry.node, cells_name) {
            None => {}
            Some(PropValue::U32(cells)) => {
                if *cells as usize != entry.args.len() {
                    return Err(ResolveError::malformed(
                        list_name,
                        format!(
                            "entry {index} carries {} argument cells, target declares {cells}",
                            entry.args.len()
                        ),
                    ));
                }
            }
            Some(other) => {
                return Err(ResolveError::malformed(
                    cells_name,
                    format!("expected u32, found {}", other.kind()),
                ))
            }
        }

        Ok(entry.clone())
    }

    fn dai_name(&self, node: &NodeId) -> Result<String, ResolveError> {
        let entry = self.ref_list_entry(node, SOUND_DAI, SOUND_DAI_CELLS, 0)?;
        match self.prop(entry.node, DAI_NAME) {
            Some(PropValue::Str(name)) => Ok(name.clone()),
            Some(other) => Err(ResolveError::malformed(
                DAI_NAME,
                format!("expected string, found {}", other.kind()),
            )),
            None => Err(ResolveError::not_found(DAI_NAME)),
        }
    }
}

/// Errors from loading a [`MemTree`] out of TOML.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document is not valid TOML.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A reference entry names a node path that does not exist.
    #[error("unresolved node reference '{path}'")]
    UnresolvedRef {
        /// The path that failed to resolve.
        path: String,
    },

    /// A property value has no tree representation.
    #[error("unsupported value for property '{key}': {reason}")]
    BadProperty {
        /// Path of the offending property.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Reference targets recorded during the first loading pass, resolved to
/// node handles once the whole document has been walked.
type PendingRef = (NodeId, String, Vec<(String, Vec<u32>)>);

impl MemTree {
    /// Load a tree from a TOML document. See the module docs for the schema.
    pub fn from_toml(text: &str) -> Result<Self, LoadError> {
        let value: toml::Value = text.parse()?;
        let Some(table) = value.as_table() else {
            return Err(LoadError::BadProperty {
                key: "/".to_string(),
                reason: "document root must be a table".to_string(),
            });
        };

        let mut tree = MemTree::new();
        let mut pending = Vec::new();
        tree.load_table(tree.root(), "", table, &mut pending)?;

        for (node, property, targets) in pending {
            let mut entries = Vec::with_capacity(targets.len());
            for (path, args) in targets {
                let target = tree
                    .node_by_path(&path)
                    .ok_or(LoadError::UnresolvedRef { path })?;
                entries.push(RefEntry { node: target, args });
            }
            tree.set(node, &property, PropValue::RefList(entries));
        }

        debug!(nodes = tree.nodes.len(), "loaded tree from TOML");
        Ok(tree)
    }

    /// Load a tree from a TOML file on disk.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    fn load_table(
        &mut self,
        node: NodeId,
        path: &str,
        table: &toml::value::Table,
        pending: &mut Vec<PendingRef>,
    ) -> Result<(), LoadError> {
        for (key, value) in table {
            let key_path = format!("{path}/{key}");
            match value {
                toml::Value::Table(inner) => {
                    if inner.contains_key(REF_KEY) {
                        let target = parse_ref_table(&key_path, inner)?;
                        pending.push((node, key.clone(), vec![target]));
                    } else {
                        let child = self.add_node(node, key);
                        self.load_table(child, &key_path, inner, pending)?;
                    }
                }
                toml::Value::Array(items) => {
                    let mut targets = Vec::with_capacity(items.len());
                    for item in items {
                        let Some(inner) = item.as_table() else {
                            return Err(LoadError::BadProperty {
                                key: key_path,
                                reason: "arrays may only hold reference entries".to_string(),
                            });
                        };
                        targets.push(parse_ref_table(&key_path, inner)?);
                    }
                    pending.push((node, key.clone(), targets));
                }
                toml::Value::Integer(raw) => {
                    let cell = u32::try_from(*raw).map_err(|_| LoadError::BadProperty {
                        key: key_path.clone(),
                        reason: format!("{raw} does not fit a u32 cell"),
                    })?;
                    self.set_u32(node, key, cell);
                }
                toml::Value::String(text) => self.set_string(node, key, text),
                toml::Value::Boolean(true) => self.set_flag(node, key),
                toml::Value::Boolean(false) => {}
                other => {
                    return Err(LoadError::BadProperty {
                        key: key_path,
                        reason: format!("unsupported TOML value type {}", other.type_str()),
                    })
                }
            }
        }
        Ok(())
    }
}

fn parse_ref_table(
    key_path: &str,
    table: &toml::value::Table,
) -> Result<(String, Vec<u32>), LoadError> {
    for key in table.keys() {
        if key != REF_KEY && key != ARGS_KEY {
            return Err(LoadError::BadProperty {
                key: key_path.to_string(),
                reason: format!("unexpected key '{key}' in reference entry"),
            });
        }
    }

    let Some(toml::Value::String(path)) = table.get(REF_KEY) else {
        return Err(LoadError::BadProperty {
            key: key_path.to_string(),
            reason: "reference entry needs a string 'ref' path".to_string(),
        });
    };

    let mut args = Vec::new();
    if let Some(value) = table.get(ARGS_KEY) {
        let Some(items) = value.as_array() else {
            return Err(LoadError::BadProperty {
                key: key_path.to_string(),
                reason: "'args' must be an array of integers".to_string(),
            });
        };
        for item in items {
            let arg = item
                .as_integer()
                .and_then(|raw| u32::try_from(raw).ok())
                .ok_or_else(|| LoadError::BadProperty {
                    key: key_path.to_string(),
                    reason: "'args' must be an array of u32 cells".to_string(),
                })?;
            args.push(arg);
        }
    }

    Ok((path.clone(), args))
}

/// Map-backed clock provider for tests and bring-up.
#[derive(Debug, Clone, Default)]
pub struct MemClocks {
    rates: HashMap<(NodeId, u32), u32>,
}

impl MemClocks {
    /// An empty provider: every acquisition fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the clock wired to `node` at index 0.
    pub fn with_clock(self, node: NodeId, rate: u32) -> Self {
        self.with_indexed_clock(node, 0, rate)
    }

    /// Register a clock at an explicit index.
    pub fn with_indexed_clock(mut self, node: NodeId, index: u32, rate: u32) -> Self {
        self.rates.insert((node, index), rate);
        self
    }
}

/// Clock handle returned by [`MemClocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemClock {
    rate: u32,
}

impl Clock for MemClock {
    fn rate(&self) -> u32 {
        self.rate
    }
}

impl ClockProvider<NodeId> for MemClocks {
    type Clock = MemClock;

    fn clock(&self, node: &NodeId, index: u32) -> Result<MemClock, ClockError> {
        self.rates
            .get(&(*node, index))
            .map(|rate| MemClock { rate: *rate })
            .ok_or(ClockError::NotFound { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_paths() {
        let mut tree = MemTree::new();
        let root = tree.root();
        let sound = tree.add_node(root, "sound");
        let cpu = tree.add_node(sound, "cpu");

        assert_eq!(tree.path(root), "/");
        assert_eq!(tree.path(cpu), "/sound/cpu");
        assert_eq!(tree.node_by_path("/sound/cpu"), Some(cpu));
        assert_eq!(tree.node_by_path("/sound"), Some(sound));
        assert_eq!(tree.node_by_path("/"), Some(root));
        assert_eq!(tree.node_by_path("/nope"), None);
        assert_eq!(tree.name(cpu), "cpu");
    }

    #[test]
    fn test_scalar_reads() {
        let mut tree = MemTree::new();
        let node = tree.add_node(tree.root(), "cpu");
        tree.set_u32(node, "system-clock-frequency", 12_288_000);
        tree.set_string(node, "label", "primary");

        assert_eq!(
            tree.read_u32(&node, "system-clock-frequency").unwrap(),
            Some(12_288_000)
        );
        assert_eq!(tree.read_u32(&node, "absent").unwrap(), None);
        assert_eq!(
            tree.read_string(&node, "label").unwrap().as_deref(),
            Some("primary")
        );

        let err = tree.read_u32(&node, "label").unwrap_err();
        assert!(err.is_malformed());
        let err = tree.read_string(&node, "system-clock-frequency").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_ref_list_entry_and_cells() {
        let mut tree = MemTree::new();
        let root = tree.root();
        let target = tree.add_node(root, "sai2");
        tree.set_u32(target, "#sound-dai-cells", 1);
        let node = tree.add_node(root, "cpu");
        tree.set_ref(node, "sound-dai", target, &[4]);

        let entry = tree
            .ref_list_entry(&node, "sound-dai", "#sound-dai-cells", 0)
            .unwrap();
        assert_eq!(entry.node, target);
        assert_eq!(entry.args, vec![4]);

        // Index past the end of the list.
        let err = tree
            .ref_list_entry(&node, "sound-dai", "#sound-dai-cells", 1)
            .unwrap_err();
        assert!(err.is_not_found());

        // Argument count not matching the target's declaration.
        tree.set_ref(node, "sound-dai", target, &[]);
        let err = tree
            .ref_list_entry(&node, "sound-dai", "#sound-dai-cells", 0)
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_ref_list_entry_rejects_non_u32_cells() {
        let mut tree = MemTree::new();
        let root = tree.root();
        let target = tree.add_node(root, "sai2");
        // The declaration exists but with the wrong type, which must not
        // pass as an absent one.
        tree.set_string(target, "#sound-dai-cells", "zero");
        let node = tree.add_node(root, "cpu");
        tree.set_ref(node, "sound-dai", target, &[4, 2]);

        let err = tree
            .ref_list_entry(&node, "sound-dai", "#sound-dai-cells", 0)
            .unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("#sound-dai-cells"));
    }

    #[test]
    fn test_ref_list_entry_missing_or_malformed() {
        let mut tree = MemTree::new();
        let node = tree.add_node(tree.root(), "cpu");

        let err = tree
            .ref_list_entry(&node, "sound-dai", "#sound-dai-cells", 0)
            .unwrap_err();
        assert!(err.is_not_found());

        tree.set_string(node, "sound-dai", "not-a-ref");
        let err = tree
            .ref_list_entry(&node, "sound-dai", "#sound-dai-cells", 0)
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_dai_name_lookup() {
        let mut tree = MemTree::new();
        let root = tree.root();
        let target = tree.add_node(root, "sai2");
        tree.set_u32(target, "#sound-dai-cells", 0);
        let node = tree.add_node(root, "cpu");
        tree.set_ref(node, "sound-dai", target, &[]);

        let err = tree.dai_name(&node).unwrap_err();
        assert!(err.is_not_found());

        tree.set_string(target, "dai-name", "sai2-dai");
        assert_eq!(tree.dai_name(&node).unwrap(), "sai2-dai");
    }

    #[test]
    fn test_format_annotations_scoped_by_prefix() {
        let mut tree = MemTree::new();
        let root = tree.root();
        let codec = tree.add_node(root, "wm8962");
        let sound = tree.add_node(root, "sound");
        tree.set_string(sound, "simple-audio-card,format", "dsp_b");
        tree.set_flag(sound, "simple-audio-card,bitclock-inversion");
        tree.set_ref(sound, "simple-audio-card,frame-master", codec, &[]);

        let ann = tree.format_annotations(&sound, "simple-audio-card,");
        assert_eq!(ann.format.protocol(), DaiFormat::DSP_B);
        assert!(ann.format.contains(DaiFormat::BITCLOCK_INVERTED));
        assert!(ann.format.contains(DaiFormat::CODEC_FRAME_PROVIDER));
        assert_eq!(ann.frame_master, Some(codec));
        assert!(ann.bitclock_master.is_none());

        // Same node, no prefix: nothing matches.
        let bare = tree.format_annotations(&sound, "");
        assert!(bare.format.is_empty());
    }

    #[test]
    fn test_format_annotation_presence_without_ref() {
        let mut tree = MemTree::new();
        let codec = tree.add_node(tree.root(), "wm8962");
        tree.set_flag(codec, "bitclock-master");

        let ann = tree.format_annotations(&codec, "");
        assert!(ann.format.contains(DaiFormat::CODEC_BITCLOCK_PROVIDER));
        assert!(ann.bitclock_master.is_none());
    }

    #[test]
    fn test_unknown_protocol_is_ignored() {
        let mut tree = MemTree::new();
        let sound = tree.add_node(tree.root(), "sound");
        tree.set_string(sound, "format", "spdif");

        let ann = tree.format_annotations(&sound, "");
        assert!(ann.format.is_empty());
    }

    #[test]
    fn test_from_toml_builds_nodes_and_refs() {
        // Forward reference: /sound appears before /sai2.
        let tree = MemTree::from_toml(
            r##"
            [sound]
            "simple-audio-card,name" = "demo-card"
            "simple-audio-card,routing" = true
            disabled = false

            [sound.cpu]
            sound-dai = { ref = "/sai2", args = [2] }

            [sai2]
            "#sound-dai-cells" = 1
            "##,
        )
        .unwrap();

        let sound = tree.node_by_path("/sound").unwrap();
        let cpu = tree.node_by_path("/sound/cpu").unwrap();
        let sai2 = tree.node_by_path("/sai2").unwrap();

        assert_eq!(
            tree.read_string(&sound, "simple-audio-card,name")
                .unwrap()
                .as_deref(),
            Some("demo-card")
        );
        assert!(matches!(
            tree.prop(sound, "simple-audio-card,routing"),
            Some(PropValue::Empty)
        ));
        assert!(tree.prop(sound, "disabled").is_none());

        let entry = tree
            .ref_list_entry(&cpu, "sound-dai", "#sound-dai-cells", 0)
            .unwrap();
        assert_eq!(entry.node, sai2);
        assert_eq!(entry.args, vec![2]);
    }

    #[test]
    fn test_from_toml_ref_array() {
        let tree = MemTree::from_toml(
            r#"
            [amp]
            outputs = [{ ref = "/spk/left" }, { ref = "/spk/right" }]

            [spk.left]
            [spk.right]
            "#,
        )
        .unwrap();

        let amp = tree.node_by_path("/amp").unwrap();
        let left = tree
            .ref_list_entry(&amp, "outputs", "#output-cells", 0)
            .unwrap();
        let right = tree
            .ref_list_entry(&amp, "outputs", "#output-cells", 1)
            .unwrap();
        assert_eq!(Some(left.node), tree.node_by_path("/spk/left"));
        assert_eq!(Some(right.node), tree.node_by_path("/spk/right"));
    }

    #[test]
    fn test_from_toml_unresolved_ref() {
        let err = MemTree::from_toml(
            r#"
            [cpu]
            sound-dai = { ref = "/missing" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnresolvedRef { path } if path == "/missing"));
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        let err = MemTree::from_toml("rate = 1.5").unwrap_err();
        assert!(matches!(err, LoadError::BadProperty { .. }));

        let err = MemTree::from_toml("cells = -1").unwrap_err();
        assert!(matches!(err, LoadError::BadProperty { .. }));

        let err = MemTree::from_toml(r#"x = { ref = "/a", extra = 1 }"#).unwrap_err();
        assert!(matches!(err, LoadError::BadProperty { .. }));

        let err = MemTree::from_toml("not toml [").unwrap_err();
        assert!(matches!(err, LoadError::Toml(_)));
    }

    #[test]
    fn test_mem_clocks() {
        let mut tree = MemTree::new();
        let node = tree.add_node(tree.root(), "cpu");
        let other = tree.add_node(tree.root(), "codec");
        let clocks = MemClocks::new()
            .with_clock(node, 24_576_000)
            .with_indexed_clock(node, 1, 32_768);

        assert_eq!(clocks.clock(&node, 0).unwrap().rate(), 24_576_000);
        assert_eq!(clocks.clock(&node, 1).unwrap().rate(), 32_768);
        let err = clocks.clock(&other, 0).unwrap_err();
        assert_eq!(err, ClockError::NotFound { index: 0 });
    }
}
