use crate::core::io::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::table::AtomTable;
use crate::core::utils::identifiers::is_canonical_residue;
use nalgebra::Point3;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Column layout '{version}' has an empty, zero-based or overlapping field range")]
    InvalidLayout { version: &'static str },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: ColumnRange, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: ColumnRange, value: String },
}

/// An inclusive, 1-based column range of a fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn single(column: usize) -> Self {
        Self::new(column, column)
    }

    /// Extracts the trimmed text of this range; columns past the end of the line read as empty.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let start = self.start.saturating_sub(1).min(line.len());
        let end = self.end.min(line.len());
        line.get(start..end).unwrap_or("").trim()
    }

    pub fn parse_int(&self, line: &str, line_num: usize) -> Result<isize, PdbError> {
        let text = self.slice(line);
        text.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: *self,
                value: text.into(),
            },
        })
    }

    pub fn parse_float(&self, line: &str, line_num: usize) -> Result<f64, PdbError> {
        let text = self.slice(line);
        text.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidFloat {
                columns: *self,
                value: text.into(),
            },
        })
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Column schema of an `ATOM` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomRecordLayout {
    pub version: &'static str,
    pub record_name: ColumnRange,
    pub atom_name: ColumnRange,
    pub residue_name: ColumnRange,
    pub chain_id: ColumnRange,
    pub residue_number: ColumnRange,
    pub x: ColumnRange,
    pub y: ColumnRange,
    pub z: ColumnRange,
}

impl AtomRecordLayout {
    /// Field ranges in column order, used to check a layout for overlaps.
    pub fn fields(&self) -> [(&'static str, ColumnRange); 8] {
        [
            ("record name", self.record_name),
            ("atom name", self.atom_name),
            ("residue name", self.residue_name),
            ("chain id", self.chain_id),
            ("residue number", self.residue_number),
            ("x", self.x),
            ("y", self.y),
            ("z", self.z),
        ]
    }

    pub fn is_well_formed(&self) -> bool {
        let fields = self.fields();
        fields.iter().all(|(_, r)| r.start >= 1 && r.start <= r.end)
            && fields.windows(2).all(|w| w[0].1.end < w[1].1.start)
    }
}

pub const PDB_ATOM_LAYOUT: AtomRecordLayout = AtomRecordLayout {
    version: "PDB v3.3",
    record_name: ColumnRange::new(1, 6),
    atom_name: ColumnRange::new(13, 16),
    residue_name: ColumnRange::new(18, 20),
    chain_id: ColumnRange::single(22),
    residue_number: ColumnRange::new(23, 26),
    x: ColumnRange::new(31, 38),
    y: ColumnRange::new(39, 46),
    z: ColumnRange::new(47, 54),
};

const ATOM_RECORD: &str = "ATOM";

// Legacy secondary-structure columns.
const CA_MARKER: ColumnRange = ColumnRange::new(14, 15);
const HELIX_LENGTH: ColumnRange = ColumnRange::new(72, 76);
const SHEET_START: ColumnRange = ColumnRange::new(24, 26);
const SHEET_END: ColumnRange = ColumnRange::new(35, 37);

/// Share of a structure annotated as helix or sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondaryStructureSummary {
    pub helix_percent: f64,
    pub sheet_percent: f64,
    pub total_residues: usize,
}

pub struct PdbFile;

impl PdbFile {
    /// Reads an atom table using an explicit column layout.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `layout` - The column schema of `ATOM` records.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::InvalidLayout`] before reading anything if `layout` is not
    /// well formed, and [`PdbError::Parse`] when a numeric field of an `ATOM` line cannot
    /// be parsed; the check runs before the residue filter, so the error is raised even
    /// for lines that would otherwise be discarded.
    pub fn read_with_layout(
        reader: &mut impl BufRead,
        layout: &AtomRecordLayout,
    ) -> Result<AtomTable, PdbError> {
        if !layout.is_well_formed() {
            return Err(PdbError::InvalidLayout {
                version: layout.version,
            });
        }
        let mut table = AtomTable::new();
        let mut discarded = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if layout.record_name.slice(&line) != ATOM_RECORD {
                continue;
            }

            let atom_name = layout.atom_name.slice(&line);
            let residue_name = layout.residue_name.slice(&line);
            let chain_id = layout.chain_id.slice(&line);
            let residue_number = layout.residue_number.parse_int(&line, line_num)?;
            let x = layout.x.parse_float(&line, line_num)?;
            let y = layout.y.parse_float(&line, line_num)?;
            let z = layout.z.parse_float(&line, line_num)?;

            if !is_canonical_residue(residue_name) {
                discarded += 1;
                continue;
            }

            table.push(AtomRecord::new(
                atom_name,
                residue_name,
                chain_id,
                residue_number,
                Point3::new(x, y, z),
            ));
        }

        debug!(
            "Parsed {} atoms in {} residues ({} non-canonical ATOM lines discarded, layout {}).",
            table.len(),
            table.residue_count(),
            discarded,
            layout.version
        );
        Ok(table)
    }

    /// Estimates helix and sheet coverage from `HELIX`/`SHEET` records.
    ///
    /// Residues are counted as `ATOM` lines carrying a `CA` marker. Helix
    /// lengths are read verbatim; a sheet strand contributes `end - start + 1`
    /// and is skipped when either number is unreadable.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::Parse`] when a `HELIX` length is malformed.
    pub fn scan_secondary_structure(
        reader: &mut impl BufRead,
    ) -> Result<SecondaryStructureSummary, PdbError> {
        let mut helix: isize = 0;
        let mut sheet: isize = 0;
        let mut total_residues = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match PDB_ATOM_LAYOUT.record_name.slice(&line) {
                ATOM_RECORD => {
                    if CA_MARKER.slice(&line) == "CA" {
                        total_residues += 1;
                    }
                }
                "HELIX" => helix += HELIX_LENGTH.parse_int(&line, line_num)?,
                "SHEET" => {
                    let start = SHEET_START.parse_int(&line, line_num);
                    let end = SHEET_END.parse_int(&line, line_num);
                    if let (Ok(start), Ok(end)) = (start, end) {
                        sheet += end - start + 1;
                    }
                }
                _ => {}
            }
        }

        let percent = |count: isize| {
            if total_residues == 0 {
                0.0
            } else {
                count as f64 / total_residues as f64 * 100.0
            }
        };

        Ok(SecondaryStructureSummary {
            helix_percent: percent(helix),
            sheet_percent: percent(sheet),
            total_residues,
        })
    }

    pub fn scan_secondary_structure_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<SecondaryStructureSummary, PdbError> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::scan_secondary_structure(&mut reader)
    }
}

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<AtomTable, Self::Error> {
        Self::read_with_layout(reader, &PDB_ATOM_LAYOUT)
    }
}
