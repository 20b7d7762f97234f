//! Static catalog of checkpoints and prizes.
use serde::{Deserialize, Serialize};

/// Identifier of a checkpoint. Always positive.
pub type CheckpointId = u32;

/// A physical location eligible for stamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub name: String,
    pub description: String,
    pub address: String,
    /// Remote image URL shown on cards and in the detail sheet.
    pub image: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: String,
    pub hours: String,
}

impl Checkpoint {
    /// Two-digit display label, e.g. `07`.
    #[must_use]
    pub fn number_label(&self) -> String {
        format!("{:02}", self.id)
    }
}

/// A reward unlocked once enough stamps are collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub required_stamps: u32,
    pub image: String,
}

impl Prize {
    #[must_use]
    pub const fn is_unlocked(&self, stamped_count: u32) -> bool {
        stamped_count >= self.required_stamps
    }

    /// Stamps still missing before the prize unlocks.
    #[must_use]
    pub const fn remaining(&self, stamped_count: u32) -> u32 {
        self.required_stamps.saturating_sub(stamped_count)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no checkpoints")]
    Empty,
    #[error("checkpoint id {0} is invalid (must be positive)")]
    InvalidId(CheckpointId),
    #[error("checkpoint id {0} appears more than once")]
    DuplicateId(CheckpointId),
}

/// Catalog JSON before validation.
#[derive(Deserialize)]
struct RawCatalog {
    checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    prizes: Vec<Prize>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.checkpoints, raw.prizes)
    }
}

/// Read-only lists of checkpoints and prizes, in display order.
///
/// Deserializing goes through [`Catalog::new`], so every instance holds at
/// least one checkpoint with a unique positive id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    checkpoints: Vec<Checkpoint>,
    prizes: Vec<Prize>,
}

impl Catalog {
    /// Build a catalog from already-parsed lists.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no checkpoints, an id is zero, or ids repeat.
    pub fn new(checkpoints: Vec<Checkpoint>, prizes: Vec<Prize>) -> Result<Self, CatalogError> {
        if checkpoints.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = std::collections::BTreeSet::new();
        for cp in &checkpoints {
            if cp.id == 0 {
                return Err(CatalogError::InvalidId(cp.id));
            }
            if !seen.insert(cp.id) {
                return Err(CatalogError::DuplicateId(cp.id));
            }
        }
        Ok(Self {
            checkpoints,
            prizes,
        })
    }

    /// Parse a catalog from JSON of the form `{"checkpoints": [...], "prizes": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// The rally catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog fails to parse.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::from_json(include_str!("../data/catalog.json"))
    }

    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    #[must_use]
    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Look up a checkpoint; stale or unknown ids yield `None`.
    #[must_use]
    pub fn checkpoint(&self, id: CheckpointId) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|cp| cp.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CheckpointId) -> bool {
        self.checkpoint(id).is_some()
    }

    /// First checkpoint in catalog order.
    #[must_use]
    pub fn first(&self) -> &Checkpoint {
        // `new` rejects empty catalogs.
        &self.checkpoints[0]
    }

    /// Prizes unlocked at the given stamp count, in catalog order.
    pub fn unlocked_prizes(&self, stamped_count: u32) -> impl Iterator<Item = &Prize> {
        self.prizes
            .iter()
            .filter(move |prize| prize.is_unlocked(stamped_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(id: CheckpointId) -> Checkpoint {
        Checkpoint {
            id,
            name: format!("Spot {id}"),
            description: String::new(),
            address: String::new(),
            image: String::new(),
            lat: 0.0,
            lng: 0.0,
            phone: String::new(),
            hours: String::new(),
        }
    }

    #[test]
    fn static_catalog_loads_twelve_spots_and_four_prizes() {
        let catalog = Catalog::load_from_static().unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.prizes().len(), 4);
        assert_eq!(catalog.first().id, 1);
        let thresholds: Vec<u32> = catalog.prizes().iter().map(|p| p.required_stamps).collect();
        assert_eq!(thresholds, vec![3, 6, 9, 12]);
    }

    #[test]
    fn rejects_duplicate_and_zero_ids() {
        let dup = Catalog::new(vec![checkpoint(1), checkpoint(1)], Vec::new());
        assert!(matches!(dup, Err(CatalogError::DuplicateId(1))));
        let zero = Catalog::new(vec![checkpoint(0)], Vec::new());
        assert!(matches!(zero, Err(CatalogError::InvalidId(0))));
        assert!(matches!(
            Catalog::new(Vec::new(), Vec::new()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn deserializing_validates_like_new() {
        for json in [
            r#"{"checkpoints":[],"prizes":[]}"#,
            r#"{"checkpoints":[{"id":0,"name":"a","description":"","address":"","image":"","lat":0.0,"lng":0.0,"phone":"","hours":""}]}"#,
        ] {
            assert!(serde_json::from_str::<Catalog>(json).is_err(), "{json}");
            assert!(Catalog::from_json(json).is_err(), "{json}");
        }
    }

    #[test]
    fn serialized_catalog_deserializes_back() {
        let catalog = Catalog::new(vec![checkpoint(2), checkpoint(5)], Vec::new()).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.first().id, 2);
        assert_eq!(back, catalog);
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let catalog = Catalog::new(vec![checkpoint(1), checkpoint(2)], Vec::new()).unwrap();
        assert!(catalog.checkpoint(2).is_some());
        assert!(catalog.checkpoint(99).is_none());
    }

    #[test]
    fn prize_remaining_saturates() {
        let prize = Prize {
            id: 1,
            name: String::from("Shampoo"),
            description: String::new(),
            required_stamps: 3,
            image: String::new(),
        };
        assert_eq!(prize.remaining(1), 2);
        assert_eq!(prize.remaining(5), 0);
        assert!(!prize.is_unlocked(2));
        assert!(prize.is_unlocked(3));
    }

    #[test]
    fn number_label_is_zero_padded() {
        assert_eq!(checkpoint(7).number_label(), "07");
        assert_eq!(checkpoint(12).number_label(), "12");
    }
}
