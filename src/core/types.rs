use serde::{Deserialize, Serialize};

/// One of the three annotation tools whose predictions are reconciled.
///
/// The declaration order is the trust order: eggNOG-mapper is the most trusted
/// general-purpose source, Operon-mapper enumerates every ORF, and Batch
/// CD-Search contributes conserved-domain evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    EggnogMapper,
    OperonMapper,
    CdSearch,
}

impl Tool {
    /// All tools in trust order
    pub const ALL: [Tool; 3] = [Tool::EggnogMapper, Tool::OperonMapper, Tool::CdSearch];

    /// Position of this tool in [`Tool::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Tool::EggnogMapper => 0,
            Tool::OperonMapper => 1,
            Tool::CdSearch => 2,
        }
    }

    /// Prefix used for the normalized per-tool tables (`em_<organism>.gff`, ...)
    #[must_use]
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Tool::EggnogMapper => "em",
            Tool::OperonMapper => "om",
            Tool::CdSearch => "batch",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EggnogMapper => write!(f, "eggNOG-mapper"),
            Self::OperonMapper => write!(f, "Operon-mapper"),
            Self::CdSearch => write!(f, "Batch CD-Search"),
        }
    }
}

/// Strand of a feature as written in the GFF strand column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strand {
    Forward,
    Reverse,
    /// `.` in GFF; only tolerated in reference annotations
    Unknown,
}

impl Strand {
    /// Parse a GFF strand column. Returns `None` for anything but `+`, `-` or `.`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            "." => Some(Strand::Unknown),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unknown => '.',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Feature type column of a resolved or reference feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Cds,
    Pseudogene,
    /// tRNA, rRNA, ncRNA, tmRNA, ...
    Rna(String),
    Other(String),
}

impl FeatureType {
    /// Parse a GFF type column
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s {
            "CDS" => FeatureType::Cds,
            "pseudogene" => FeatureType::Pseudogene,
            _ if s.ends_with("RNA") => FeatureType::Rna(s.to_string()),
            _ => FeatureType::Other(s.to_string()),
        }
    }

    #[must_use]
    pub fn is_ncrna(&self) -> bool {
        matches!(self, FeatureType::Rna(kind) if kind == "ncRNA")
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cds => write!(f, "CDS"),
            Self::Pseudogene => write!(f, "pseudogene"),
            Self::Rna(kind) | Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}
