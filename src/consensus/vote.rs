//! Classification of the three tools' labels at one coordinate and the trust
//! table that turns a classification into the tool whose record is kept.

use serde::{Deserialize, Serialize};

use crate::core::types::Tool;

/// How the three labels at one start coordinate relate to each other.
///
/// `Pair12` means eggNOG-mapper and Operon-mapper agree while Batch CD-Search
/// differs, and likewise for the other pairs. All labels are present for the
/// first five variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    AllAgree,
    AllDiffer,
    Pair12,
    Pair13,
    Pair23,
    /// Exactly one tool assigned no label
    OneMissing { missing: Tool },
    /// Exactly one tool assigned a label
    TwoMissing { present: Tool },
    AllMissing,
}

/// Order in which tools supply the record when no tool assigned a label.
/// Operon-mapper enumerates every ORF, so it is expected to have one.
pub const PLACEHOLDER_ORDER: [Tool; 3] = [Tool::OperonMapper, Tool::EggnogMapper, Tool::CdSearch];

impl Agreement {
    /// Classify the labels of eggNOG-mapper, Operon-mapper and Batch CD-Search
    /// (in that order); `None` is an unassigned label.
    pub fn classify(labels: [Option<&str>; 3]) -> Self {
        let missing = labels.iter().filter(|label| label.is_none()).count();

        match missing {
            0 => {
                let [a, b, c] = labels;
                if a == b && b == c {
                    Agreement::AllAgree
                } else if a == b {
                    Agreement::Pair12
                } else if a == c {
                    Agreement::Pair13
                } else if b == c {
                    Agreement::Pair23
                } else {
                    Agreement::AllDiffer
                }
            }
            1 => Agreement::OneMissing {
                missing: first_tool_where(&labels, |label| label.is_none()),
            },
            2 => Agreement::TwoMissing {
                present: first_tool_where(&labels, |label| label.is_some()),
            },
            _ => Agreement::AllMissing,
        }
    }

    /// The tool whose full record represents this coordinate.
    ///
    /// eggNOG-mapper wins unless it is silent or outvoted by the other two
    /// agreeing; Operon-mapper is the fallback enumerator.
    pub const fn winner(self) -> Tool {
        match self {
            Agreement::AllAgree | Agreement::AllDiffer | Agreement::Pair12 | Agreement::Pair13 => {
                Tool::EggnogMapper
            }
            Agreement::Pair23 => Tool::OperonMapper,
            Agreement::OneMissing {
                missing: Tool::EggnogMapper,
            } => Tool::OperonMapper,
            Agreement::OneMissing { .. } => Tool::EggnogMapper,
            Agreement::TwoMissing { present } => present,
            Agreement::AllMissing => Tool::OperonMapper,
        }
    }

    /// Stable name used in run summaries
    pub const fn name(self) -> &'static str {
        match self {
            Agreement::AllAgree => "all_agree",
            Agreement::AllDiffer => "all_differ",
            Agreement::Pair12 => "pair_eggnog_operon",
            Agreement::Pair13 => "pair_eggnog_cd_search",
            Agreement::Pair23 => "pair_operon_cd_search",
            Agreement::OneMissing { .. } => "one_missing",
            Agreement::TwoMissing { .. } => "two_missing",
            Agreement::AllMissing => "all_missing",
        }
    }
}

impl std::fmt::Display for Agreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneMissing { missing } => write!(f, "one_missing({missing})"),
            Self::TwoMissing { present } => write!(f, "two_missing(only {present})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

fn first_tool_where<'a>(
    labels: &[Option<&'a str>; 3],
    pred: impl Fn(&Option<&'a str>) -> bool,
) -> Tool {
    Tool::ALL
        .into_iter()
        .find(|tool| pred(&labels[tool.index()]))
        .unwrap_or(Tool::EggnogMapper)
}
