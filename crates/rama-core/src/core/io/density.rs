use crate::core::models::density::DensityTable;
use std::io::{self, Write};

const TABLE_DESCRIPTION: &str = "PDB-based phi-psi density";

/// Writes a density table in the commented plain-text grid format.
///
/// The header declares two wrapping dimensions over `[-180, 180)` followed
/// by one `phi psi frequency` line per occupied cell.
pub fn write_density_table<W: Write>(table: &DensityTable, writer: &mut W) -> io::Result<()> {
    let bins = table.bins_per_axis();
    writeln!(writer, "# Table name/description: \"{}\"", TABLE_DESCRIPTION)?;
    writeln!(writer, "# Number of dimensions: 2")?;
    writeln!(
        writer,
        "# For each dimension, 1 to 2: lower_bound  upper_bound  number_of_bins  wrapping"
    )?;
    writeln!(writer, "#   x1: -180.0 180.0 {} true", bins)?;
    writeln!(writer, "#   x2: -180.0 180.0 {} true", bins)?;
    writeln!(
        writer,
        "# List of table coordinates and values. (Value is last number on each line.)"
    )?;
    for (phi, psi, frequency) in table.cells() {
        writeln!(writer, "{:.1} {:.1} {:.15}", phi, psi, frequency)?;
    }
    writer.flush()
}
