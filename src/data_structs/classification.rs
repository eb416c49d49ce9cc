use std::fmt::Display;

/// Clinical significance labels collapsed into the `Benign` bucket.
pub const BENIGN_CLASSES: [&str; 3] =
    ["Likely_benign", "Benign", "Benign/Likely_benign"];

/// Labels collapsed into the `VUS` bucket.
pub const VUS_CLASSES: [&str; 1] = ["Uncertain_significance"];

/// Labels collapsed into the `Pathogenic` bucket.
pub const PATHOGENIC_CLASSES: [&str; 7] = [
    "Pathogenic",
    "Likely_pathogenic",
    "Pathogenic/Likely_pathogenic",
    "risk_factor",
    "Pathogenic,_risk_factor",
    "Likely_pathogenic,_risk_factor",
    "Pathogenic/Likely_pathogenic,_risk_factor",
];

/// Coarse clinical significance class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassBucket {
    Benign,
    Vus,
    Pathogenic,
    Other,
}

impl ClassBucket {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClassBucket::Benign => "Benign",
            ClassBucket::Vus => "VUS",
            ClassBucket::Pathogenic => "Pathogenic",
            ClassBucket::Other => "Other",
        }
    }
}

impl Display for ClassBucket {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw `CLNSIG` value onto its bucket. Matching is exact and
/// case-sensitive; anything unlisted is [`ClassBucket::Other`].
pub fn simplify_class_name(label: &str) -> ClassBucket {
    if BENIGN_CLASSES.contains(&label) {
        ClassBucket::Benign
    }
    else if VUS_CLASSES.contains(&label) {
        ClassBucket::Vus
    }
    else if PATHOGENIC_CLASSES.contains(&label) {
        ClassBucket::Pathogenic
    }
    else {
        ClassBucket::Other
    }
}
