use crate::error::{Error, Result};

/// Common given names. Drawn with replacement for the `first` column.
pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
    "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Thomas", "Sarah", "Christopher", "Karen", "Charles", "Lisa", "Daniel", "Nancy",
    "Matthew", "Betty", "Anthony", "Helen", "Mark", "Sandra", "Donald", "Donna",
    "Steven", "Carol", "Kenneth", "Ruth", "Andrew", "Sharon", "Joshua", "Michelle",
    "Kevin", "Laura", "Brian", "Emily", "George", "Kimberly", "Timothy", "Deborah",
    "Ronald", "Dorothy", "Edward", "Amy", "Jason", "Angela", "Jeffrey", "Ashley",
];

/// Common family names. Drawn with replacement for the `last` column.
pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
    "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker",
    "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill",
    "Flores", "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell",
    "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans", "Turner", "Diaz",
];

/// The pair of tables a batch samples from.
///
/// Both tables must be non-empty; construction is the only place that is
/// checked, so every `NameTables` in hand can be sampled from.
#[derive(Debug, Clone, Copy)]
pub struct NameTables<'a> {
    first: &'a [&'a str],
    last: &'a [&'a str],
}

impl<'a> NameTables<'a> {
    pub fn new(first: &'a [&'a str], last: &'a [&'a str]) -> Result<Self> {
        if first.is_empty() {
            return Err(Error::invalid("first-name table is empty"));
        }
        if last.is_empty() {
            return Err(Error::invalid("last-name table is empty"));
        }
        Ok(NameTables { first, last })
    }

    pub fn first(&self) -> &'a [&'a str] {
        self.first
    }

    pub fn last(&self) -> &'a [&'a str] {
        self.last
    }

    pub fn knows_first(&self, name: &str) -> bool {
        self.first.contains(&name)
    }

    pub fn knows_last(&self, name: &str) -> bool {
        self.last.contains(&name)
    }
}

impl NameTables<'static> {
    pub fn builtin() -> Self {
        NameTables { first: FIRST_NAMES, last: LAST_NAMES }
    }
}
