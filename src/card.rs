//! Card and dai-link records plus their naming rules.
//!
//! A [`Card`] owns an ordered set of [`DaiLink`] records, each tying a CPU
//! side to a codec side with a resolved format code. [`parse_card_name`]
//! derives the card's display name from the tree with a first-link fallback,
//! and [`set_link_name`] renders one template into both name fields of a
//! link.

use std::collections::HashMap;

use strfmt::strfmt;
use tracing::debug;

use crate::dai::DaiRef;
use crate::error::{ResolveError, Result};
use crate::format::DaiFormat;
use crate::tree::TreeSource;

/// One audio link between a CPU DAI and a codec DAI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaiLink<N> {
    /// Link display name.
    pub name: Option<String>,
    /// Stream name. Assigned together with `name` but independently owned,
    /// so mutating one never affects the other.
    pub stream_name: Option<String>,
    /// CPU side of the link.
    pub cpu: DaiRef<N>,
    /// Codec side of the link.
    pub codec: DaiRef<N>,
    /// Resolved format code for the link.
    pub format: DaiFormat,
}

impl<N> Default for DaiLink<N> {
    fn default() -> Self {
        Self {
            name: None,
            stream_name: None,
            cpu: DaiRef::default(),
            codec: DaiRef::default(),
            format: DaiFormat::empty(),
        }
    }
}

/// A sound card: a display name plus its dai-links in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<N> {
    /// Card display name.
    pub name: Option<String>,
    /// Links in declaration order.
    pub dai_links: Vec<DaiLink<N>>,
}

impl<N> Default for Card<N> {
    fn default() -> Self {
        Self {
            name: None,
            dai_links: Vec::new(),
        }
    }
}

/// Parse the card display name from the `{prefix}name` property on `node`.
///
/// An absent property is not an error; the card then falls back to the name
/// of its first link, which may itself be unset. Only a malformed property
/// propagates as an error. A name the card already carries survives an
/// absent property.
pub fn parse_card_name<T: TreeSource>(
    tree: &T,
    node: &T::Node,
    prefix: &str,
    card: &mut Card<T::Node>,
) -> Result<()> {
    let property = format!("{prefix}name");
    if let Some(name) = tree.read_string(node, &property)? {
        debug!(name, "parsed card name");
        card.name = Some(name);
    }

    if card.name.is_none() {
        if let Some(link) = card.dai_links.first() {
            card.name = link.name.clone();
        }
    }

    Ok(())
}

/// Render `template` once and assign the result to both the link name and
/// the stream name.
///
/// The two fields receive independently owned copies. A failed render, for
/// example a template key missing from `vars`, surfaces as
/// [`ResolveError::NameFormat`] and leaves both fields at their prior
/// values.
pub fn set_link_name<N>(
    link: &mut DaiLink<N>,
    template: &str,
    vars: &HashMap<String, String>,
) -> Result<()> {
    let name = strfmt(template, vars).map_err(|err| ResolveError::NameFormat {
        message: err.to_string(),
    })?;

    link.stream_name = Some(name.clone());
    link.name = Some(name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::{MemTree, NodeId};

    fn sound_node() -> (MemTree, NodeId) {
        let mut tree = MemTree::new();
        let sound = tree.add_node(tree.root(), "sound");
        (tree, sound)
    }

    fn named_link(name: &str) -> DaiLink<NodeId> {
        DaiLink {
            name: Some(name.to_string()),
            ..DaiLink::default()
        }
    }

    #[test]
    fn test_explicit_name_wins_over_links() {
        let (mut tree, sound) = sound_node();
        tree.set_string(sound, "simple-audio-card,name", "imx6-wm8962");
        let mut card = Card {
            name: None,
            dai_links: vec![named_link("sai2-wm8962")],
        };

        parse_card_name(&tree, &sound, "simple-audio-card,", &mut card).unwrap();
        assert_eq!(card.name.as_deref(), Some("imx6-wm8962"));
    }

    #[test]
    fn test_first_link_fallback() {
        let (tree, sound) = sound_node();
        let mut card = Card {
            name: None,
            dai_links: vec![named_link("sai2-wm8962"), named_link("spdif-out")],
        };

        parse_card_name(&tree, &sound, "simple-audio-card,", &mut card).unwrap();
        assert_eq!(card.name.as_deref(), Some("sai2-wm8962"));
    }

    #[test]
    fn test_absent_name_without_links_is_ok() {
        let (tree, sound) = sound_node();
        let mut card = Card::default();

        parse_card_name(&tree, &sound, "simple-audio-card,", &mut card).unwrap();
        assert!(card.name.is_none());
    }

    #[test]
    fn test_name_lookup_respects_prefix() {
        let (mut tree, sound) = sound_node();
        tree.set_string(sound, "name", "unprefixed");
        let mut card = Card::default();

        parse_card_name(&tree, &sound, "simple-audio-card,", &mut card).unwrap();
        assert!(card.name.is_none());

        parse_card_name(&tree, &sound, "", &mut card).unwrap();
        assert_eq!(card.name.as_deref(), Some("unprefixed"));
    }

    #[test]
    fn test_malformed_name_propagates() {
        let (mut tree, sound) = sound_node();
        tree.set_u32(sound, "simple-audio-card,name", 7);
        let mut card = Card::default();

        let err = parse_card_name(&tree, &sound, "simple-audio-card,", &mut card).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_link_name_fills_both_fields() {
        let mut link: DaiLink<NodeId> = DaiLink::default();
        let mut vars = HashMap::new();
        vars.insert("cpu".to_string(), "sai2".to_string());
        vars.insert("codec".to_string(), "wm8962".to_string());

        set_link_name(&mut link, "{cpu}-{codec}", &vars).unwrap();
        assert_eq!(link.name.as_deref(), Some("sai2-wm8962"));
        assert_eq!(link.stream_name.as_deref(), Some("sai2-wm8962"));
    }

    #[test]
    fn test_link_name_fields_are_independent() {
        let mut link: DaiLink<NodeId> = DaiLink::default();
        let vars = HashMap::new();

        set_link_name(&mut link, "snd-0", &vars).unwrap();
        link.stream_name = Some("playback".to_string());
        assert_eq!(link.name.as_deref(), Some("snd-0"));
    }

    #[test]
    fn test_render_failure_leaves_fields_untouched() {
        let mut link: DaiLink<NodeId> = DaiLink {
            name: Some("before".to_string()),
            ..DaiLink::default()
        };
        let vars = HashMap::new();

        let err = set_link_name(&mut link, "{missing}-0", &vars).unwrap_err();
        assert!(matches!(err, ResolveError::NameFormat { .. }));
        assert_eq!(link.name.as_deref(), Some("before"));
        assert!(link.stream_name.is_none());
    }
}
