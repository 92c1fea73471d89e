use std::collections::HashSet;
use tracing::info;

use crate::consensus::resolver::{Origin, ResolvedFeature};
use crate::core::feature::GffRecord;
use crate::core::types::FeatureType;

/// Which reference-driven passes to run after consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AugmentOptions {
    /// Retype resolved features that the reference annotates as pseudogenes
    pub reclassify_pseudogenes: bool,
    /// Append the reference's ncRNA features
    pub include_ncrna: bool,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            reclassify_pseudogenes: true,
            include_ncrna: true,
        }
    }
}

/// Counts reported by [`augment`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AugmentStats {
    /// Features whose type changed to pseudogene
    pub pseudogenes_reclassified: usize,
    pub ncrna_added: usize,
}

/// Apply reference annotation to the resolved features.
///
/// Pseudogene reclassification matches on start coordinate; a reference
/// pseudogene with no resolved counterpart is ignored. ncRNA features are
/// appended verbatim without checking for overlap. Existing features are never
/// dropped.
pub fn augment(
    mut features: Vec<ResolvedFeature>,
    reference: &[GffRecord],
    options: AugmentOptions,
) -> (Vec<ResolvedFeature>, AugmentStats) {
    let mut stats = AugmentStats::default();

    if options.reclassify_pseudogenes {
        let pseudogene_starts: HashSet<u64> = reference
            .iter()
            .filter(|f| f.feature_type == FeatureType::Pseudogene)
            .map(|f| f.start)
            .collect();

        for feature in &mut features {
            if pseudogene_starts.contains(&feature.row.start)
                && feature.row.feature_type != FeatureType::Pseudogene
            {
                feature.row.feature_type = FeatureType::Pseudogene;
                stats.pseudogenes_reclassified += 1;
            }
        }
    }

    if options.include_ncrna {
        let before = features.len();
        features.extend(
            reference
                .iter()
                .filter(|f| f.feature_type.is_ncrna())
                .map(|f| ResolvedFeature {
                    row: f.clone(),
                    origin: Origin::Reference,
                }),
        );
        stats.ncrna_added = features.len() - before;
    }

    info!(
        pseudogenes = stats.pseudogenes_reclassified,
        ncrna = stats.ncrna_added,
        "Applied reference annotation"
    );

    (features, stats)
}
