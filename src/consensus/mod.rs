//! Consensus resolution across the three annotation tools.
//!
//! For every start coordinate reported by any tool, the labels of
//! eggNOG-mapper, Operon-mapper and Batch CD-Search are classified into an
//! [`Agreement`](vote::Agreement) and a fixed trust table picks the tool whose
//! full record is kept:
//!
//! | Agreement | Kept record |
//! |-----------|-------------|
//! | all agree / all differ | eggNOG-mapper |
//! | eggNOG-mapper pairs with either other tool | eggNOG-mapper |
//! | Operon-mapper and CD-Search agree, eggNOG-mapper differs | Operon-mapper |
//! | only one tool labelled | that tool |
//! | eggNOG-mapper unlabelled, the other two labelled | Operon-mapper |
//! | one of the other two unlabelled | eggNOG-mapper |
//! | nobody labelled | Operon-mapper |
//!
//! The resolved list can then be [`augment`](augment::augment)ed with
//! pseudogene and ncRNA information from a reference annotation.

pub mod augment;
pub mod resolver;
pub mod vote;

pub use augment::{augment, AugmentOptions, AugmentStats};
pub use resolver::{
    build_entries, resolve, resolve_sets, ConsensusEntry, ConsensusError, Origin, ResolvedFeature,
    ToolSets, ToolSlots,
};
pub use vote::Agreement;
