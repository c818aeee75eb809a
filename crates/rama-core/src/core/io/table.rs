use crate::core::models::angles::{
    AngleRecord, DatasetAngleRecord, OutlierFlags, SideChainAngleRecord, SideChainTorsion,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const ANGLE_HEADER: [&str; 6] = ["chain", "residue num", "residue", "phi", "psi", "omega"];
const OUTLIER_HEADER: [&str; 3] = ["phi_is_outlier", "psi_is_outlier", "is_outlier"];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Row count mismatch: {records} records but {flags} outlier flags")]
    LengthMismatch { records: usize, flags: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Tab,
    Comma,
}

impl Delimiter {
    /// Guesses the delimiter from a `.csv` or `.tsv` file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" | "tab" => Some(Delimiter::Tab),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid delimiter '{0}'. Expected 'tab' or 'comma'.")]
pub struct ParseDelimiterError(String);

impl FromStr for Delimiter {
    type Err = ParseDelimiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tab" | "tsv" | "\t" => Ok(Delimiter::Tab),
            "comma" | "csv" | "," => Ok(Delimiter::Comma),
            _ => Err(ParseDelimiterError(s.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Comma => write!(f, "comma"),
        }
    }
}

#[derive(Serialize)]
struct AngleRow<'a> {
    chain: &'a str,
    residue_number: isize,
    residue: &'a str,
    phi: Option<f64>,
    psi: Option<f64>,
    omega: Option<f64>,
}

impl<'a> From<&'a AngleRecord> for AngleRow<'a> {
    fn from(r: &'a AngleRecord) -> Self {
        Self {
            chain: &r.chain_id,
            residue_number: r.residue_number,
            residue: &r.residue_name,
            phi: r.phi,
            psi: r.psi,
            omega: r.omega,
        }
    }
}

#[derive(Serialize)]
struct DatasetRow<'a> {
    chain: &'a str,
    residue_number: isize,
    residue: &'a str,
    phi: Option<f64>,
    psi: Option<f64>,
    omega: Option<f64>,
    pdb_id: &'a str,
}

impl<'a> From<&'a DatasetAngleRecord> for DatasetRow<'a> {
    fn from(r: &'a DatasetAngleRecord) -> Self {
        let a = &r.angles;
        Self {
            chain: &a.chain_id,
            residue_number: a.residue_number,
            residue: &a.residue_name,
            phi: a.phi,
            psi: a.psi,
            omega: a.omega,
            pdb_id: &r.pdb_id,
        }
    }
}

#[derive(Serialize)]
struct FlaggedRow<'a> {
    chain: &'a str,
    residue_number: isize,
    residue: &'a str,
    phi: Option<f64>,
    psi: Option<f64>,
    omega: Option<f64>,
    pdb_id: &'a str,
    phi_is_outlier: bool,
    psi_is_outlier: bool,
    is_outlier: bool,
}

#[derive(Serialize)]
struct SideChainRow<'a> {
    chain: &'a str,
    residue_number: isize,
    residue: &'a str,
    chi: f64,
}

#[derive(Deserialize)]
struct AngleTableRow {
    chain: String,
    #[serde(rename = "residue num")]
    residue_number: isize,
    residue: String,
    phi: Option<f64>,
    psi: Option<f64>,
    omega: Option<f64>,
    #[serde(default)]
    pdb_id: Option<String>,
}

#[derive(Deserialize)]
struct PhiPsiRow {
    phi: Option<f64>,
    psi: Option<f64>,
}

fn writer_for<W: Write>(writer: W, delimiter: Delimiter) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .from_writer(writer)
}

fn reader_for<R: Read>(reader: R, delimiter: Delimiter) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .from_reader(reader)
}

/// Writes backbone angles as a delimited table with a header row.
///
/// Absent angles are written as empty cells.
pub fn write_angle_table<W: Write>(
    records: &[AngleRecord],
    writer: W,
    delimiter: Delimiter,
) -> Result<(), TableError> {
    let mut wtr = writer_for(writer, delimiter);
    wtr.write_record(ANGLE_HEADER)?;
    for record in records {
        wtr.serialize(AngleRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one side-chain torsion column (`chi1` or `chi2`) as a delimited table.
pub fn write_side_chain_table<W: Write>(
    records: &[SideChainAngleRecord],
    torsion: SideChainTorsion,
    writer: W,
    delimiter: Delimiter,
) -> Result<(), TableError> {
    let mut wtr = writer_for(writer, delimiter);
    wtr.write_record(["chain", "residue num", "residue", torsion.column_name()])?;
    for r in records {
        wtr.serialize(SideChainRow {
            chain: &r.chain_id,
            residue_number: r.residue_number,
            residue: &r.residue_name,
            chi: r.chi,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes angles from many structures with a trailing `pdb_id` column.
pub fn write_dataset<W: Write>(
    records: &[DatasetAngleRecord],
    writer: W,
    delimiter: Delimiter,
) -> Result<(), TableError> {
    let mut wtr = writer_for(writer, delimiter);
    wtr.write_record(ANGLE_HEADER.iter().chain(["pdb_id"].iter()))?;
    for record in records {
        wtr.serialize(DatasetRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a dataset followed by the three outlier flag columns.
///
/// # Errors
///
/// Returns [`TableError::LengthMismatch`] if `flags` is not aligned with `records`.
pub fn write_dataset_with_outliers<W: Write>(
    records: &[DatasetAngleRecord],
    flags: &[OutlierFlags],
    writer: W,
    delimiter: Delimiter,
) -> Result<(), TableError> {
    if records.len() != flags.len() {
        return Err(TableError::LengthMismatch {
            records: records.len(),
            flags: flags.len(),
        });
    }
    let mut wtr = writer_for(writer, delimiter);
    wtr.write_record(
        ANGLE_HEADER
            .iter()
            .chain(["pdb_id"].iter())
            .chain(OUTLIER_HEADER.iter()),
    )?;
    for (record, f) in records.iter().zip(flags) {
        let row = DatasetRow::from(record);
        wtr.serialize(FlaggedRow {
            chain: row.chain,
            residue_number: row.residue_number,
            residue: row.residue,
            phi: row.phi,
            psi: row.psi,
            omega: row.omega,
            pdb_id: row.pdb_id,
            phi_is_outlier: f.phi_is_outlier,
            psi_is_outlier: f.psi_is_outlier,
            is_outlier: f.is_outlier,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads an angle table or dataset previously written by this module.
///
/// The `pdb_id` column is optional; rows without it get an empty identifier.
/// Unknown extra columns are ignored.
pub fn read_angle_table<R: Read>(
    reader: R,
    delimiter: Delimiter,
) -> Result<Vec<DatasetAngleRecord>, TableError> {
    let mut rdr = reader_for(reader, delimiter);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        let row: AngleTableRow = row?;
        records.push(DatasetAngleRecord {
            pdb_id: row.pdb_id.unwrap_or_default(),
            angles: AngleRecord {
                chain_id: row.chain,
                residue_number: row.residue_number,
                residue_name: row.residue,
                phi: row.phi,
                psi: row.psi,
                omega: row.omega,
            },
        });
    }
    Ok(records)
}

/// Reads the `phi` and `psi` columns of any delimited table with a header row.
///
/// Rows where either value is empty or not finite (`NaN`, `inf`) are skipped.
pub fn read_phi_psi<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<(f64, f64)>, TableError> {
    let mut rdr = reader_for(reader, delimiter);
    let mut pairs = Vec::new();
    for row in rdr.deserialize() {
        let row: PhiPsiRow = row?;
        if let (Some(phi), Some(psi)) = (row.phi, row.psi) {
            if phi.is_finite() && psi.is_finite() {
                pairs.push((phi, psi));
            }
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle(chain: &str, num: isize, name: &str, phi: Option<f64>) -> AngleRecord {
        AngleRecord {
            chain_id: chain.to_string(),
            residue_number: num,
            residue_name: name.to_string(),
            phi,
            psi: Some(144.35),
            omega: Some(-179.45),
        }
    }

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn write_angle_table_writes_header_and_tab_separated_rows() {
        let mut buf = Vec::new();
        write_angle_table(
            &[angle("A", 2, "THR", Some(-107.83))],
            &mut buf,
            Delimiter::Tab,
        )
        .unwrap();

        assert_eq!(
            to_string(buf),
            "chain\tresidue num\tresidue\tphi\tpsi\tomega\nA\t2\tTHR\t-107.83\t144.35\t-179.45\n"
        );
    }

    #[test]
    fn write_angle_table_leaves_absent_angles_empty() {
        let mut buf = Vec::new();
        write_angle_table(&[angle("B", 1, "MET", None)], &mut buf, Delimiter::Comma).unwrap();
        let text = to_string(buf);
        assert_eq!(text.lines().nth(1), Some("B,1,MET,,144.35,-179.45"));
    }

    #[test]
    fn write_angle_table_of_no_records_still_writes_header() {
        let mut buf = Vec::new();
        write_angle_table(&[], &mut buf, Delimiter::Comma).unwrap();
        assert_eq!(to_string(buf), "chain,residue num,residue,phi,psi,omega\n");
    }

    #[test]
    fn write_side_chain_table_names_the_torsion_column() {
        let records = vec![SideChainAngleRecord {
            chain_id: "A".into(),
            residue_number: 5,
            residue_name: "SER".into(),
            chi: -57.5,
        }];
        let mut buf = Vec::new();
        write_side_chain_table(&records, SideChainTorsion::Chi2, &mut buf, Delimiter::Comma)
            .unwrap();
        assert_eq!(to_string(buf), "chain,residue num,residue,chi2\nA,5,SER,-57.5\n");
    }

    #[test]
    fn dataset_round_trips_through_reader() {
        let records = vec![
            DatasetAngleRecord {
                pdb_id: "1crn.pdb".into(),
                angles: angle("A", 2, "THR", Some(-107.83)),
            },
            DatasetAngleRecord {
                pdb_id: "2abc.pdb".into(),
                angles: angle("B", 9, "GLY", None),
            },
        ];
        let mut buf = Vec::new();
        write_dataset(&records, &mut buf, Delimiter::Comma).unwrap();

        let text = to_string(buf.clone());
        assert!(text.starts_with("chain,residue num,residue,phi,psi,omega,pdb_id\n"));

        let read_back = read_angle_table(buf.as_slice(), Delimiter::Comma).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn read_angle_table_accepts_tables_without_pdb_id() {
        let input = "chain\tresidue num\tresidue\tphi\tpsi\tomega\nA\t3\tLYS\t-60.5\t-45.25\t179.9\n";
        let records = read_angle_table(input.as_bytes(), Delimiter::Tab).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pdb_id, "");
        assert_eq!(records[0].angles.phi, Some(-60.5));
        assert_eq!(records[0].angles.residue_name, "LYS");
    }

    #[test]
    fn read_angle_table_rejects_non_numeric_angles() {
        let input = "chain,residue num,residue,phi,psi,omega\nA,3,LYS,abc,1.0,2.0\n";
        assert!(matches!(
            read_angle_table(input.as_bytes(), Delimiter::Comma),
            Err(TableError::Csv(_))
        ));
    }

    #[test]
    fn read_phi_psi_ignores_other_columns_and_incomplete_rows() {
        let input = "pdb_id,psi,phi,extra\nx,10.0,-60.0,foo\ny,,-70.0,bar\nz,20.5,-80.5,baz\n";
        let pairs = read_phi_psi(input.as_bytes(), Delimiter::Comma).unwrap();
        assert_eq!(pairs, vec![(-60.0, 10.0), (-80.5, 20.5)]);
    }

    #[test]
    fn read_phi_psi_skips_non_finite_values() {
        let input = "phi,psi\nNaN,-45.0\n-60.0,-45.0\n-61.0,inf\n";
        let pairs = read_phi_psi(input.as_bytes(), Delimiter::Comma).unwrap();
        assert_eq!(pairs, vec![(-60.0, -45.0)]);
    }

    #[test]
    fn write_dataset_with_outliers_appends_flag_columns() {
        let records = vec![DatasetAngleRecord {
            pdb_id: "1crn.pdb".into(),
            angles: angle("A", 2, "THR", Some(-107.83)),
        }];
        let flags = vec![OutlierFlags {
            phi_is_outlier: true,
            psi_is_outlier: false,
            is_outlier: true,
        }];
        let mut buf = Vec::new();
        write_dataset_with_outliers(&records, &flags, &mut buf, Delimiter::Comma).unwrap();

        let text = to_string(buf);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("chain,residue num,residue,phi,psi,omega,pdb_id,phi_is_outlier,psi_is_outlier,is_outlier")
        );
        assert_eq!(
            lines.next(),
            Some("A,2,THR,-107.83,144.35,-179.45,1crn.pdb,true,false,true")
        );
    }

    #[test]
    fn write_dataset_with_outliers_rejects_misaligned_flags() {
        let result = write_dataset_with_outliers(&[], &[OutlierFlags::default()], Vec::new(), Delimiter::Tab);
        assert!(matches!(
            result,
            Err(TableError::LengthMismatch {
                records: 0,
                flags: 1
            })
        ));
    }

    #[test]
    fn delimiter_parses_names_and_symbols() {
        assert_eq!("tab".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!("COMMA".parse::<Delimiter>().unwrap(), Delimiter::Comma);
        assert_eq!(",".parse::<Delimiter>().unwrap(), Delimiter::Comma);
        assert!("pipe".parse::<Delimiter>().is_err());
        assert_eq!(Delimiter::default(), Delimiter::Tab);
    }

    #[test]
    fn delimiter_is_inferred_from_extension() {
        assert_eq!(Delimiter::from_extension(Path::new("out/angles.CSV")), Some(Delimiter::Comma));
        assert_eq!(Delimiter::from_extension(Path::new("angles.tsv")), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_extension(Path::new("angles.txt")), None);
        assert_eq!(Delimiter::from_extension(Path::new("angles")), None);
    }
}
