//! Resolution of referenced DAI nodes.
//!
//! Each side of a dai-link names its DAI through a node-reference-list
//! property. [`resolve_dai`] follows the first entry of that list and fills
//! in a [`DaiRef`]: the target node, optionally a display name, and the
//! single-link topology flag.

use tracing::trace;

use crate::error::Result;
use crate::tree::TreeSource;

/// A resolved reference to one side (CPU or codec) of a dai-link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaiRef<N> {
    /// The referenced node, once resolved.
    pub node: Option<N>,
    /// Display name of the referenced DAI, when one was requested.
    pub name: Option<String>,
    /// True iff the reference carried zero auxiliary arguments, meaning an
    /// unambiguous 1:1 connection.
    pub single_link: bool,
}

impl<N> Default for DaiRef<N> {
    fn default() -> Self {
        Self {
            node: None,
            name: None,
            single_link: false,
        }
    }
}

/// Resolve the first entry of `list_name` on `node` into `dai`.
///
/// A `None` node succeeds trivially without touching `dai`: a CPU-only or
/// codec-only link leaves the other side intentionally absent. Otherwise the
/// reference must parse, and when `want_name` is set the display name must
/// resolve too; any failure surfaces unchanged and `dai` keeps its prior
/// state. `cells_name` names the argument-count declaration on the target,
/// passed through to [`TreeSource::ref_list_entry`].
pub fn resolve_dai<T: TreeSource>(
    tree: &T,
    node: Option<&T::Node>,
    list_name: &str,
    cells_name: &str,
    want_name: bool,
    dai: &mut DaiRef<T::Node>,
) -> Result<()> {
    let Some(node) = node else {
        trace!(list_name, "link side absent, nothing to resolve");
        return Ok(());
    };

    let entry = tree.ref_list_entry(node, list_name, cells_name, 0)?;
    let name = if want_name {
        Some(tree.dai_name(node)?)
    } else {
        None
    };

    dai.node = Some(entry.node);
    if let Some(name) = name {
        dai.name = Some(name);
    }
    dai.single_link = entry.args.is_empty();

    Ok(())
}
