//! Best-known tour of a single search.
//!
//! Owned by the search session and passed down the recursion by exclusive
//! reference. Starts empty (an infinite upper bound) unless the caller seeds
//! a cost; a seeded cost has no tour attached until the search beats it.

use tsp_core::{Cost, Tour};

#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent<T> {
    cost: Option<T>,
    path: Option<Vec<usize>>,
}

impl<T> Default for Incumbent<T> {
    fn default() -> Self {
        Self {
            cost: None,
            path: None,
        }
    }
}

impl<T> Incumbent<T>
where
    T: Cost,
{
    /// An incumbent with no tour yet.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// An upper bound without a tour; only strictly cheaper tours replace it.
    #[inline]
    pub fn seeded(cost: T) -> Self {
        Self {
            cost: Some(cost),
            path: None,
        }
    }

    /// Current upper bound; `None` means no bound yet (+infinity).
    #[inline]
    pub fn upper_bound(&self) -> Option<T> {
        self.cost
    }

    /// `true` if a node with this bound may still contain a better tour.
    #[inline]
    pub fn admits(&self, bound: T) -> bool {
        self.cost.is_none_or(|best| bound < best)
    }

    /// Installs the tour if it is strictly cheaper than the current one.
    pub fn try_install(&mut self, path: &[usize], cost: T) -> bool {
        if !self.admits(cost) {
            return false;
        }
        self.cost = Some(cost);
        self.path = Some(path.to_vec());
        true
    }

    /// The best tour, if the search closed one that beat the seed.
    pub fn into_tour(self) -> Option<Tour<T>> {
        Some(Tour::new(self.path?, self.cost?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_admits_everything() {
        let inc = Incumbent::<u32>::empty();
        assert!(inc.admits(u32::MAX));
        assert_eq!(inc.upper_bound(), None);
        assert_eq!(inc.into_tour(), None);
    }

    #[test]
    fn test_install_requires_strict_improvement() {
        let mut inc = Incumbent::empty();
        assert!(inc.try_install(&[0, 1, 2, 0], 10u32));
        assert!(!inc.try_install(&[0, 2, 1, 0], 10));
        assert!(inc.try_install(&[0, 2, 1, 0], 9));
        assert_eq!(inc.into_tour(), Some(Tour::new(vec![0, 2, 1, 0], 9)));
    }

    #[test]
    fn test_seed_without_tour() {
        let mut inc = Incumbent::seeded(5u32);
        assert!(!inc.admits(5));
        assert!(inc.admits(4));
        assert!(!inc.try_install(&[0, 1, 2, 0], 6));
        assert_eq!(inc.clone().into_tour(), None);
        assert!(inc.try_install(&[0, 1, 2, 0], 3));
        assert_eq!(inc.upper_bound(), Some(3));
    }
}
