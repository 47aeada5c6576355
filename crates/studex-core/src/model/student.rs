use serde::{Deserialize, Serialize};

/// One student row as seen by the aggregation engine
///
/// `gender` is kept as the raw label so that records with labels outside
/// `"M"`/`"F"` survive a round trip through the store and still count in
/// gender-independent totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Lookup key; not unique
    pub name: String,

    pub age: u32,

    /// Unconstrained by the engine (no range check)
    pub grade: f64,

    /// Raw categorical label; see [`Gender::from_label`]
    pub gender: String,
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        grade: f64,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            grade,
            gender: gender.into(),
        }
    }

    /// Recognized gender partition of this record, if any
    pub fn partition(&self) -> Option<Gender> {
        Gender::from_label(&self.gender)
    }
}

/// The two gender labels the engine partitions on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Exact, case-sensitive match on `"M"` or `"F"`
    pub fn from_label(label: &str) -> Option<Gender> {
        match label {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A pair of values, one per gender partition
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenderSplit<T> {
    pub male: T,
    pub female: T,
}

impl<T> GenderSplit<T> {
    pub fn new(male: T, female: T) -> Self {
        Self { male, female }
    }

    pub fn get(&self, gender: Gender) -> &T {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    /// Build a split by evaluating `f` once per gender, male first
    pub fn try_from_fn<E>(mut f: impl FnMut(Gender) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            male: f(Gender::Male)?,
            female: f(Gender::Female)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_is_exact() {
        assert_eq!(Gender::from_label("M"), Some(Gender::Male));
        assert_eq!(Gender::from_label("F"), Some(Gender::Female));
        assert_eq!(Gender::from_label("m"), None);
        assert_eq!(Gender::from_label(" F"), None);
        assert_eq!(Gender::from_label("X"), None);
        assert_eq!(Gender::from_label(""), None);
    }

    #[test]
    fn test_label_round_trips() {
        for g in Gender::ALL {
            assert_eq!(Gender::from_label(g.label()), Some(g));
        }
    }

    #[test]
    fn test_record_partition() {
        assert_eq!(
            StudentRecord::new("Bob", 22, 2.5, "M").partition(),
            Some(Gender::Male)
        );
        assert_eq!(StudentRecord::new("Sam", 19, 3.0, "X").partition(), None);
    }

    #[test]
    fn test_split_try_from_fn_short_circuits() {
        let mut calls = Vec::new();
        let result: Result<GenderSplit<u32>, &str> = GenderSplit::try_from_fn(|g| {
            calls.push(g);
            Err("stop")
        });
        assert!(result.is_err());
        assert_eq!(calls, vec![Gender::Male]);
    }
}
