use serde::{Deserialize, Serialize};

/// Every tour starts and ends here.
pub const START_CITY: usize = 0;

/// A closed tour and its total cost.
///
/// `path` has length `n + 1`, starts and ends at [`START_CITY`], and visits
/// every other city exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour<T> {
    pub path: Vec<usize>,
    pub cost: T,
}

impl<T> Tour<T> {
    #[inline]
    pub fn new(path: Vec<usize>, cost: T) -> Self {
        Self { path, cost }
    }

    #[inline]
    pub fn is_well_formed(&self, num_cities: usize) -> bool {
        is_well_formed_tour(&self.path, num_cities)
    }
}

/// Checks the closed-tour shape for `num_cities` cities.
pub fn is_well_formed_tour(path: &[usize], num_cities: usize) -> bool {
    if path.len() != num_cities + 1
        || path.first() != Some(&START_CITY)
        || path.last() != Some(&START_CITY)
    {
        return false;
    }
    let mut seen = vec![false; num_cities];
    for &city in &path[..num_cities] {
        if city >= num_cities || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
