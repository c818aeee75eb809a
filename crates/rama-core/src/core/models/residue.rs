use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // Alanine (ALA)
    Glycine,    // Glycine (GLY)
    Isoleucine, // Isoleucine (ILE)
    Leucine,    // Leucine (LEU)
    Methionine, // Methionine (MET)
    Proline,    // Proline (PRO)
    Valine,     // Valine (VAL)

    // --- Aromatic ---
    Phenylalanine, // Phenylalanine (PHE)
    Tryptophan,    // Tryptophan (TRP)
    Tyrosine,      // Tyrosine (TYR)

    // --- Polar, Uncharged ---
    Asparagine, // Asparagine (ASN)
    Cysteine,   // Cysteine (CYS)
    Glutamine,  // Glutamine (GLN)
    Serine,     // Serine (SER)
    Threonine,  // Threonine (THR)

    // --- Positively Charged (Basic) ---
    Arginine,  // Arginine (ARG)
    Histidine, // Histidine (HIS)
    Lysine,    // Lysine (LYS)

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // Aspartic Acid (ASP)
    GlutamicAcid, // Glutamic Acid (GLU)
}

static THREE_LETTER_CODES: Map<&'static str, AminoAcid> = phf_map! {
    "ALA" => AminoAcid::Alanine,
    "GLY" => AminoAcid::Glycine,
    "ILE" => AminoAcid::Isoleucine,
    "LEU" => AminoAcid::Leucine,
    "MET" => AminoAcid::Methionine,
    "PRO" => AminoAcid::Proline,
    "VAL" => AminoAcid::Valine,
    "PHE" => AminoAcid::Phenylalanine,
    "TRP" => AminoAcid::Tryptophan,
    "TYR" => AminoAcid::Tyrosine,
    "ASN" => AminoAcid::Asparagine,
    "CYS" => AminoAcid::Cysteine,
    "GLN" => AminoAcid::Glutamine,
    "SER" => AminoAcid::Serine,
    "THR" => AminoAcid::Threonine,
    "ARG" => AminoAcid::Arginine,
    "HIS" => AminoAcid::Histidine,
    "LYS" => AminoAcid::Lysine,
    "ASP" => AminoAcid::AsparticAcid,
    "GLU" => AminoAcid::GlutamicAcid,
};

/// Physicochemical grouping of a residue, used to split angle statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResidueCategory {
    Polar,
    PolarPositive,
    PolarNegative,
    NonpolarAliphatic,
    NonpolarAromatic,
    Unknown,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown amino acid code: '{0}'")]
pub struct ParseAminoAcidError(pub String);

impl AminoAcid {
    pub fn three_letter_code(&self) -> &'static str {
        match self {
            AminoAcid::Alanine => "ALA",
            AminoAcid::Glycine => "GLY",
            AminoAcid::Isoleucine => "ILE",
            AminoAcid::Leucine => "LEU",
            AminoAcid::Methionine => "MET",
            AminoAcid::Proline => "PRO",
            AminoAcid::Valine => "VAL",
            AminoAcid::Phenylalanine => "PHE",
            AminoAcid::Tryptophan => "TRP",
            AminoAcid::Tyrosine => "TYR",
            AminoAcid::Asparagine => "ASN",
            AminoAcid::Cysteine => "CYS",
            AminoAcid::Glutamine => "GLN",
            AminoAcid::Serine => "SER",
            AminoAcid::Threonine => "THR",
            AminoAcid::Arginine => "ARG",
            AminoAcid::Histidine => "HIS",
            AminoAcid::Lysine => "LYS",
            AminoAcid::AsparticAcid => "ASP",
            AminoAcid::GlutamicAcid => "GLU",
        }
    }

    pub fn category(&self) -> ResidueCategory {
        match self {
            AminoAcid::Asparagine
            | AminoAcid::Cysteine
            | AminoAcid::Glutamine
            | AminoAcid::Serine
            | AminoAcid::Threonine => ResidueCategory::Polar,
            AminoAcid::Arginine | AminoAcid::Histidine | AminoAcid::Lysine => {
                ResidueCategory::PolarPositive
            }
            AminoAcid::AsparticAcid | AminoAcid::GlutamicAcid => ResidueCategory::PolarNegative,
            AminoAcid::Alanine
            | AminoAcid::Isoleucine
            | AminoAcid::Glycine
            | AminoAcid::Leucine
            | AminoAcid::Methionine
            | AminoAcid::Proline
            | AminoAcid::Valine => ResidueCategory::NonpolarAliphatic,
            AminoAcid::Phenylalanine | AminoAcid::Tyrosine | AminoAcid::Tryptophan => {
                ResidueCategory::NonpolarAromatic
            }
        }
    }
}

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    /// Parses an exact upper-case three-letter code (e.g., "LYS").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        THREE_LETTER_CODES
            .get(s)
            .copied()
            .ok_or_else(|| ParseAminoAcidError(s.to_string()))
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter_code())
    }
}

impl fmt::Display for ResidueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResidueCategory::Polar => "Polar",
                ResidueCategory::PolarPositive => "Polar positive charged",
                ResidueCategory::PolarNegative => "Polar negative charged",
                ResidueCategory::NonpolarAliphatic => "Non polar aliphatic",
                ResidueCategory::NonpolarAromatic => "Non polar aromatic",
                ResidueCategory::Unknown => "Unknown residue",
            }
        )
    }
}

/// Maps a residue name to its physicochemical category.
///
/// Any name outside the canonical 20 residues yields [`ResidueCategory::Unknown`].
pub fn classify(residue_name: &str) -> ResidueCategory {
    residue_name
        .parse::<AminoAcid>()
        .map(|aa| aa.category())
        .unwrap_or(ResidueCategory::Unknown)
}
