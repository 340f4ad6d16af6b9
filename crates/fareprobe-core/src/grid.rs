//! Cartesian product of the search axes.
//!
//! Requests are decoded lazily from a flat index, nesting origin airport →
//! day → month → nights with the outermost axis varying slowest, so repeated
//! runs enumerate in the same order.

use crate::axes::SearchAxes;
use crate::search::{ResourceKind, SearchRequest};
use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct ParameterGrid {
    resource: ResourceKind,
    axes: SearchAxes,
}

impl ParameterGrid {
    /// Build a grid for `resource` over validated `axes`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any axis `resource` uses is
    /// empty, out of range, or contains duplicates (which would make two
    /// requests equal).
    pub fn new(resource: ResourceKind, axes: &SearchAxes) -> Result<Self, ConfigError> {
        axes.validate_for(resource)?;
        Ok(Self {
            resource,
            axes: axes.clone(),
        })
    }

    #[must_use]
    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    fn origin_count(&self) -> usize {
        if self.resource.uses_origin() {
            self.axes.airports.len()
        } else {
            1
        }
    }

    /// Number of requests: the product of the applicable axis sizes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origin_count()
            * self.axes.days.len()
            * self.axes.months.len()
            * self.axes.nights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            next: 0,
            len: self.len(),
        }
    }

    fn request_at(&self, index: usize) -> SearchRequest {
        let axes = &self.axes;
        let mut rest = index;

        let nights = axes.nights[rest % axes.nights.len()];
        rest /= axes.nights.len();
        let month = axes.months[rest % axes.months.len()];
        rest /= axes.months.len();
        let day = axes.days[rest % axes.days.len()];
        rest /= axes.days.len();
        let origin = self
            .resource
            .uses_origin()
            .then(|| axes.airports[rest].clone());

        SearchRequest {
            resource: self.resource,
            origin,
            day,
            month,
            nights,
            party: axes.party,
        }
    }
}

impl<'a> IntoIterator for &'a ParameterGrid {
    type Item = SearchRequest;
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`ParameterGrid`].
#[derive(Debug, Clone)]
pub struct GridIter<'a> {
    grid: &'a ParameterGrid,
    next: usize,
    len: usize,
}

impl Iterator for GridIter<'_> {
    type Item = SearchRequest;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let request = self.grid.request_at(self.next);
        self.next += 1;
        Some(request)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::axes::{MonthYear, Party};

    fn axes(airports: &[&str], days: &[u8], months: &[u8], nights: &[u16]) -> SearchAxes {
        SearchAxes {
            airports: airports.iter().map(|a| (*a).to_string()).collect(),
            days: days.to_vec(),
            months: months.iter().map(|m| MonthYear::new(*m, 2025)).collect(),
            nights: nights.to_vec(),
            party: Party::default(),
        }
    }

    #[test]
    fn flights_grid_length_is_product_of_all_axes() {
        let grid = ParameterGrid::new(
            ResourceKind::Flights,
            &axes(&["LON", "MAN"], &[1, 2, 3], &[1, 2], &[7, 8, 9, 10]),
        )
        .unwrap();
        assert_eq!(grid.len(), 2 * 3 * 2 * 4);
        assert_eq!(grid.iter().count(), 48);
        assert_eq!(grid.iter().len(), 48);
    }

    #[test]
    fn non_flight_grids_ignore_airports() {
        let grid = ParameterGrid::new(
            ResourceKind::Hotels,
            &axes(&["LON", "MAN"], &[1, 2, 3], &[1, 2], &[7, 8, 9, 10]),
        )
        .unwrap();
        assert_eq!(grid.len(), 24);
        assert!(grid.iter().all(|r| r.origin.is_none()));
    }

    #[test]
    fn hotels_grid_needs_no_airports_but_flights_does() {
        let no_airports = axes(&[], &[1, 2], &[1], &[7]);
        let grid = ParameterGrid::new(ResourceKind::Hotels, &no_airports).unwrap();
        assert_eq!(grid.len(), 2);
        assert!(matches!(
            ParameterGrid::new(ResourceKind::Flights, &no_airports),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn no_two_requests_are_equal() {
        let grid = ParameterGrid::new(
            ResourceKind::Flights,
            &axes(&["LON", "MAN", "BHX"], &[1, 2], &[1, 2, 3], &[7, 14]),
        )
        .unwrap();
        let unique: HashSet<SearchRequest> = grid.iter().collect();
        assert_eq!(unique.len(), grid.len());
    }

    #[test]
    fn outer_axis_varies_slowest() {
        let grid = ParameterGrid::new(
            ResourceKind::Flights,
            &axes(&["LON", "MAN"], &[10, 11], &[1], &[12, 13]),
        )
        .unwrap();
        let order: Vec<(String, u8, u16)> = grid
            .iter()
            .map(|r| (r.origin.unwrap(), r.day, r.nights))
            .collect();
        assert_eq!(
            order,
            vec![
                ("LON".to_string(), 10, 12),
                ("LON".to_string(), 10, 13),
                ("LON".to_string(), 11, 12),
                ("LON".to_string(), 11, 13),
                ("MAN".to_string(), 10, 12),
                ("MAN".to_string(), 10, 13),
                ("MAN".to_string(), 11, 12),
                ("MAN".to_string(), 11, 13),
            ]
        );
    }

    #[test]
    fn enumeration_is_reproducible() {
        let grid = ParameterGrid::new(ResourceKind::Tickets, &SearchAxes::debug_preset()).unwrap();
        let first: Vec<SearchRequest> = grid.iter().collect();
        let second: Vec<SearchRequest> = grid.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_axes_with_duplicates() {
        let result = ParameterGrid::new(
            ResourceKind::Hotels,
            &axes(&["LON"], &[1, 1], &[1], &[7]),
        );
        assert!(result.is_err());
    }
}
