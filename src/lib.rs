//! # Simple Card Resolution Library
//!
//! This crate resolves the topology, clocking, format, and naming of simple
//! audio cards from a hierarchical configuration tree. A card description
//! names its CPU and codec DAIs through node references; this library walks
//! those references and populates plain [`Card`]/[`DaiLink`] records that a
//! driver-binding layer can hand to the audio stack. The tree itself stays
//! behind the [`TreeSource`] capability, so the same resolution logic runs
//! against a platform-provided tree or against the bundled in-memory
//! provider.
//!
//! ## Crate Structure
//!
//! - **`card`**: The [`Card`] and [`DaiLink`] records plus the naming rules:
//!   explicit card name with first-link fallback, and one-shot link name
//!   templating.
//! - **`clock`**: The [`Clock`]/[`ClockProvider`] capabilities and the
//!   priority-ordered system-clock resolution into [`SimpleDai`].
//! - **`dai`**: Resolution of one side of a link into a [`DaiRef`]: target
//!   node, optional display name, single-link topology flag.
//! - **`error`**: The [`ResolveError`] enum shared by all fallible
//!   resolution steps.
//! - **`format`**: The bit-packed [`DaiFormat`] code and the format
//!   resolution with its legacy single-node fallback.
//! - **`mem`**: In-memory tree and clock providers, including a TOML loader,
//!   for tests and treeless consumers.
//! - **`tree`**: The [`TreeSource`] capability consumed by every resolver.
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::HashMap;
//!
//! use simple_card::mem::{MemClocks, MemTree};
//! use simple_card::{
//!     parse_card_name, parse_dai_format, resolve_clock, resolve_dai, set_link_name, Card,
//!     DaiLink, SimpleDai,
//! };
//!
//! let tree = MemTree::from_toml(r##"
//! [sai2]
//! "#sound-dai-cells" = 0
//! dai-name = "sai2-dai"
//!
//! [wm8962]
//! "#sound-dai-cells" = 0
//! dai-name = "wm8962-dai"
//!
//! [sound]
//! "simple-audio-card,format" = "i2s"
//! "simple-audio-card,bitclock-master" = { ref = "/wm8962" }
//! "simple-audio-card,frame-master" = { ref = "/wm8962" }
//!
//! [sound.cpu]
//! sound-dai = { ref = "/sai2" }
//!
//! [sound.codec]
//! sound-dai = { ref = "/wm8962" }
//! system-clock-frequency = 11289600
//! "##).unwrap();
//!
//! let sound = tree.node_by_path("/sound").unwrap();
//! let cpu_subnode = tree.node_by_path("/sound/cpu").unwrap();
//! let codec_subnode = tree.node_by_path("/sound/codec").unwrap();
//! let codec = tree.node_by_path("/wm8962").unwrap();
//!
//! let mut link = DaiLink::default();
//! resolve_dai(&tree, Some(&cpu_subnode), "sound-dai", "#sound-dai-cells", true, &mut link.cpu)
//!     .unwrap();
//! resolve_dai(&tree, Some(&codec_subnode), "sound-dai", "#sound-dai-cells", true, &mut link.codec)
//!     .unwrap();
//! link.format = parse_dai_format(&tree, &sound, &codec, "simple-audio-card,");
//! assert!(link.format.codec_provides_bitclock());
//!
//! let clocks = MemClocks::new();
//! let mut codec_dai = SimpleDai::default();
//! resolve_clock(&tree, &clocks, &codec_subnode, &codec, &mut codec_dai);
//! assert_eq!(codec_dai.sysclk, 11_289_600);
//!
//! let vars = HashMap::from([
//!     ("cpu".to_string(), "sai2-dai".to_string()),
//!     ("codec".to_string(), "wm8962-dai".to_string()),
//! ]);
//! set_link_name(&mut link, "{cpu}-{codec}", &vars).unwrap();
//!
//! let mut card = Card::default();
//! card.dai_links.push(link);
//! parse_card_name(&tree, &sound, "simple-audio-card,", &mut card).unwrap();
//! assert_eq!(card.name.as_deref(), Some("sai2-dai-wm8962-dai"));
//! ```

pub mod card;
pub mod clock;
pub mod dai;
pub mod error;
pub mod format;
pub mod mem;
pub mod tree;

// Re-export the resolution surface at the crate root.
pub use card::{parse_card_name, set_link_name, Card, DaiLink};
pub use clock::{resolve_clock, Clock, ClockError, ClockProvider, SimpleDai};
pub use dai::{resolve_dai, DaiRef};
pub use error::{ResolveError, Result};
pub use format::{parse_dai_format, DaiFormat, UnknownProtocol};
pub use tree::{FormatAnnotations, RefEntry, TreeSource};
