use super::atom::AtomRecord;
use nalgebra::Point3;
use std::collections::HashMap;

/// One residue as first encountered in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueEntry {
    pub number: isize,                  // Residue sequence number from source file
    pub name: String,                   // Name carried by the first row of this residue
    atom_rows: HashMap<String, usize>, // Atom name -> first row index in the table
}

impl ResidueEntry {
    fn new(number: isize, name: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
            atom_rows: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    pub id: String,
    residues: Vec<ResidueEntry>,
    residue_index: HashMap<isize, usize>,
}

impl ChainEntry {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
            residue_index: HashMap::new(),
        }
    }

    /// Residues of this chain in encounter order.
    pub fn residues(&self) -> &[ResidueEntry] {
        &self.residues
    }

    fn residue(&self, residue_number: isize) -> Option<&ResidueEntry> {
        self.residue_index
            .get(&residue_number)
            .map(|&idx| &self.residues[idx])
    }
}

/// The ordered table of atom records extracted from one structure file.
///
/// Rows keep file order and are never re-sorted. Alongside the rows the table
/// maintains an index of chains, residues and atom names so that coordinate
/// lookups are constant time. When the same (chain, residue, atom) triple
/// appears more than once, the first row wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomTable {
    records: Vec<AtomRecord>,
    chains: Vec<ChainEntry>,
    chain_index: HashMap<String, usize>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and updates the lookup index.
    pub fn push(&mut self, record: AtomRecord) {
        let row = self.records.len();

        let chain_idx = match self.chain_index.get(record.chain_id.as_str()) {
            Some(&idx) => idx,
            None => {
                self.chains.push(ChainEntry::new(&record.chain_id));
                let idx = self.chains.len() - 1;
                self.chain_index.insert(record.chain_id.clone(), idx);
                idx
            }
        };
        let chain = &mut self.chains[chain_idx];

        let residue_idx = match chain.residue_index.get(&record.residue_number) {
            Some(&idx) => idx,
            None => {
                chain
                    .residues
                    .push(ResidueEntry::new(record.residue_number, &record.residue_name));
                let idx = chain.residues.len() - 1;
                chain.residue_index.insert(record.residue_number, idx);
                idx
            }
        };
        chain.residues[residue_idx]
            .atom_rows
            .entry(record.atom_name.clone())
            .or_insert(row);

        self.records.push(record);
    }

    /// All records in file order.
    pub fn records(&self) -> &[AtomRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Chains in the order they were first encountered.
    pub fn chains(&self) -> &[ChainEntry] {
        &self.chains
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residues.len()).sum()
    }

    /// Resolves the coordinates of a named atom in a given residue.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The identifier of the chain.
    /// * `residue_number` - The sequence number of the residue.
    /// * `atom_name` - The name of the atom (e.g., "CA").
    ///
    /// # Return
    ///
    /// Returns the position of the first matching record, or `None` when the
    /// chain, residue or atom is absent. Absence is expected at chain termini.
    pub fn lookup(
        &self,
        chain_id: &str,
        residue_number: isize,
        atom_name: &str,
    ) -> Option<Point3<f64>> {
        let chain = &self.chains[*self.chain_index.get(chain_id)?];
        let row = *chain.residue(residue_number)?.atom_rows.get(atom_name)?;
        Some(self.records[row].position)
    }

    /// Resolves several atoms of one residue at once.
    ///
    /// # Return
    ///
    /// Returns the positions in the order of `atom_names`, or `None` if any
    /// single name cannot be resolved.
    pub fn lookup_many(
        &self,
        chain_id: &str,
        residue_number: isize,
        atom_names: &[&str],
    ) -> Option<Vec<Point3<f64>>> {
        atom_names
            .iter()
            .map(|name| self.lookup(chain_id, residue_number, name))
            .collect()
    }

    pub fn has_atom(&self, chain_id: &str, residue_number: isize, atom_name: &str) -> bool {
        self.lookup(chain_id, residue_number, atom_name).is_some()
    }
}

impl FromIterator<AtomRecord> for AtomTable {
    fn from_iter<I: IntoIterator<Item = AtomRecord>>(iter: I) -> Self {
        let mut table = AtomTable::new();
        for record in iter {
            table.push(record);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(chain: &str, res: isize, res_name: &str, atom: &str, x: f64) -> AtomRecord {
        AtomRecord::new(atom, res_name, chain, res, Point3::new(x, 0.0, 0.0))
    }

    fn sample_table() -> AtomTable {
        vec![
            record("A", 1, "MET", "N", 1.0),
            record("A", 1, "MET", "CA", 2.0),
            record("A", 1, "MET", "C", 3.0),
            record("A", 2, "GLY", "N", 4.0),
            record("A", 2, "GLY", "CA", 5.0),
            record("A", 2, "GLY", "C", 6.0),
            record("B", 7, "SER", "N", 7.0),
            record("B", 7, "SER", "OG", 8.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn lookup_returns_position_of_matching_atom() {
        let table = sample_table();
        assert_eq!(table.lookup("A", 2, "CA"), Some(Point3::new(5.0, 0.0, 0.0)));
        assert_eq!(table.lookup("B", 7, "OG"), Some(Point3::new(8.0, 0.0, 0.0)));
    }

    #[test]
    fn lookup_returns_none_beyond_chain_termini() {
        let table = sample_table();
        assert_eq!(table.lookup("A", 0, "C"), None);
        assert_eq!(table.lookup("A", 3, "N"), None);
        assert_eq!(table.lookup("B", 6, "C"), None);
        assert_eq!(table.lookup("B", 8, "N"), None);
    }

    #[test]
    fn lookup_returns_none_for_unknown_chain_or_atom() {
        let table = sample_table();
        assert_eq!(table.lookup("Z", 1, "N"), None);
        assert_eq!(table.lookup("A", 1, "CB"), None);
    }

    #[test]
    fn lookup_prefers_first_duplicate_row() {
        let mut table = sample_table();
        table.push(record("A", 1, "MET", "CA", 99.0));
        assert_eq!(table.lookup("A", 1, "CA"), Some(Point3::new(2.0, 0.0, 0.0)));
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn lookup_many_resolves_all_or_nothing() {
        let table = sample_table();
        let coords = table.lookup_many("A", 1, &["N", "CA", "C"]).unwrap();
        assert_eq!(
            coords,
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0)
            ]
        );
        assert!(table.lookup_many("A", 1, &["N", "CA", "CB"]).is_none());
        assert_eq!(table.lookup_many("A", 1, &[]), Some(vec![]));
    }

    #[test]
    fn chains_and_residues_keep_encounter_order() {
        let mut table = AtomTable::new();
        table.push(record("B", 10, "ALA", "N", 0.0));
        table.push(record("A", 3, "ALA", "N", 0.0));
        table.push(record("B", 2, "LYS", "N", 0.0));
        table.push(record("B", 10, "ALA", "CA", 0.0));

        let chain_ids: Vec<&str> = table.chains().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(chain_ids, vec!["B", "A"]);

        let residue_numbers: Vec<isize> =
            table.chains()[0].residues().iter().map(|r| r.number).collect();
        assert_eq!(residue_numbers, vec![10, 2]);
        assert_eq!(table.residue_count(), 3);
    }

    #[test]
    fn residue_name_comes_from_first_row() {
        let mut table = AtomTable::new();
        table.push(record("A", 5, "SER", "N", 0.0));
        table.push(record("A", 5, "THR", "CA", 0.0));
        assert_eq!(table.chains()[0].residues()[0].name, "SER");
    }

    #[test]
    fn empty_table_has_no_chains() {
        let table = AtomTable::new();
        assert!(table.is_empty());
        assert!(table.chains().is_empty());
        assert_eq!(table.lookup("A", 1, "N"), None);
        assert!(!table.has_atom("A", 1, "N"));
    }
}
