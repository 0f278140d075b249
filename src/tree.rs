//! The tree-query capability consumed by the resolvers.
//!
//! The configuration tree itself belongs to an external provider; resolution
//! only needs the narrow query surface captured by [`TreeSource`]. Node
//! handles are cheap clonable references compared by identity, and a
//! transient handle is released by dropping it. The crate ships one provider,
//! [`crate::mem::MemTree`], suitable for tests and for consumers without a
//! platform tree.

use std::fmt;

use crate::error::Result;
use crate::format::DaiFormat;

/// One parsed entry of a node-reference-list property.
///
/// A reference list encodes a pointer-like reference to another node plus
/// auxiliary integer arguments, for example a port index. The argument count
/// decides the single-link topology flag in [`crate::dai::DaiRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry<N> {
    /// The referenced node.
    pub node: N,
    /// Auxiliary arguments following the reference.
    pub args: Vec<u32>,
}

/// Result of a scoped format-annotation parse.
///
/// The two master references form an optional pair: both absent means the
/// node carries no link-level master annotation, which is what triggers the
/// legacy fallback in [`crate::format::parse_dai_format`]. A reference may
/// point at any node in the tree, not necessarily the codec of the link
/// being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatAnnotations<N> {
    /// Raw format value. Best-effort: unparseable annotations leave their
    /// bits clear rather than failing.
    pub format: DaiFormat,
    /// Node annotated as bit-clock master, if any.
    pub bitclock_master: Option<N>,
    /// Node annotated as frame master, if any.
    pub frame_master: Option<N>,
}

impl<N> Default for FormatAnnotations<N> {
    fn default() -> Self {
        Self {
            format: DaiFormat::empty(),
            bitclock_master: None,
            frame_master: None,
        }
    }
}

/// Query interface onto a hierarchical configuration tree.
///
/// Property lookups are scoped by caller-supplied names, so one provider
/// serves both prefixed card-level lookups and bare subnode lookups. All
/// methods take `&self`; providers are read-only during resolution.
pub trait TreeSource {
    /// Opaque node handle.
    ///
    /// Equality is node identity. Cloning a handle never copies the node
    /// itself, and handles stay valid for the lifetime of the provider.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Parse the format and master annotations on `node`, prefixing every
    /// property name with `prefix`.
    ///
    /// Best-effort: annotations that are absent or unparseable contribute
    /// nothing. A master annotation that is present but carries no node
    /// reference still sets its raw role bit while leaving the reference
    /// unset.
    fn format_annotations(&self, node: &Self::Node, prefix: &str) -> FormatAnnotations<Self::Node>;

    /// Read a numeric property from `node`.
    ///
    /// `Ok(None)` when the property is absent; an error only when it exists
    /// with the wrong shape.
    fn read_u32(&self, node: &Self::Node, property: &str) -> Result<Option<u32>>;

    /// Read a string property from `node`.
    ///
    /// `Ok(None)` when the property is absent; an error only when it exists
    /// with the wrong shape.
    fn read_string(&self, node: &Self::Node, property: &str) -> Result<Option<String>>;

    /// Parse entry `index` of the reference-list property `list_name` on
    /// `node`.
    ///
    /// `cells_name` names the property on the *target* node declaring how
    /// many argument cells each reference to it carries; providers use it to
    /// validate the entry. Fails when the list is absent, too short, or
    /// malformed.
    fn ref_list_entry(
        &self,
        node: &Self::Node,
        list_name: &str,
        cells_name: &str,
        index: usize,
    ) -> Result<RefEntry<Self::Node>>;

    /// Resolve the display name of the DAI referenced by `node`.
    ///
    /// `node` is the referencing side (a cpu/codec subnode); the provider
    /// follows its primary DAI reference and looks the name up on the target.
    fn dai_name(&self, node: &Self::Node) -> Result<String>;
}
