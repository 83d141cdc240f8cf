use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Attribute – one of the fixed record columns
// ---------------------------------------------------------------------------

/// The fixed schema of an indication record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Name,
    Category,
    Gender,
    Indication,
    Link,
}

impl Attribute {
    /// Every attribute, in source column order.
    pub const ALL: [Attribute; 5] = [
        Attribute::Name,
        Attribute::Category,
        Attribute::Gender,
        Attribute::Indication,
        Attribute::Link,
    ];

    /// Column label in the submission spreadsheet (after whitespace trimming).
    pub fn source_label(self) -> &'static str {
        match self {
            Attribute::Name => "Nome",
            Attribute::Category => "Qual categoria deseja cadrastar",
            Attribute::Gender => "Qual o gênero da sua solicitação",
            Attribute::Indication => "Qual indicação você deseja fazer?",
            Attribute::Link => "Insira o Link da sua indicação",
        }
    }

    /// Short header shown in the table view.
    pub fn display_label(self) -> &'static str {
        match self {
            Attribute::Name => "Nome do Usuário",
            Attribute::Category => "Categoria",
            Attribute::Gender => "Gênero",
            Attribute::Indication => "Indicação",
            Attribute::Link => "Link",
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one submitted indication
// ---------------------------------------------------------------------------

/// One row of the submission spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub category: String,
    pub gender: String,
    pub indication: String,
    pub link: Option<String>,
}

impl Record {
    /// Text value of an attribute. A missing link reads as the empty string.
    pub fn value(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Name => &self.name,
            Attribute::Category => &self.category,
            Attribute::Gender => &self.gender,
            Attribute::Indication => &self.indication,
            Attribute::Link => self.link.as_deref().unwrap_or(""),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – ordered, read-only collection of records
// ---------------------------------------------------------------------------

/// An ordered sequence of records. Never mutated once built; filtering
/// produces a new `Table`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy the records at `indices` (in the given order) into a new table.
    /// Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            records: indices
                .iter()
                .filter_map(|&i| self.records.get(i).cloned())
                .collect(),
        }
    }

    /// Distinct values of `attribute` in order of first appearance.
    pub fn unique(&self, attribute: Attribute) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.records
            .iter()
            .map(|r| r.value(attribute))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
