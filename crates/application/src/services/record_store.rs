use hickory_proto::rr::{LowerName, Name, Record};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Immutable record set assembled from the configured zone sources.
///
/// Records keep their load order: sources in configuration order, records
/// within a source in file order. Duplicates are kept. The name index maps
/// every owner name to its positions in that order, so a lookup visits the
/// same records a full scan would, in the same sequence.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    by_name: FxHashMap<LowerName, SmallVec<[usize; 2]>>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        let mut by_name: FxHashMap<LowerName, SmallVec<[usize; 2]>> = FxHashMap::default();
        for (position, record) in records.iter().enumerate() {
            by_name
                .entry(LowerName::new(record.name()))
                .or_default()
                .push(position);
        }

        Self { records, by_name }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all_records(&self) -> &[Record] {
        &self.records
    }

    /// Records owned by `name` (case-insensitive), in load order.
    pub fn records_named<'a>(&'a self, name: &Name) -> impl Iterator<Item = &'a Record> + 'a {
        self.by_name
            .get(&LowerName::new(name))
            .into_iter()
            .flatten()
            .map(move |&position| &self.records[position])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn distinct_names(&self) -> usize {
        self.by_name.len()
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
