//! Offset-based pagination

use super::errors::{DomainError, DomainResult};

/// A page window derived from a `(from, size)` offset pair.
///
/// The offset is floored to the start of its page, so `from = 5, size = 2`
/// selects page 2, i.e. rows `[4, 6)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Build a page request from caller-supplied `from` and `size`.
    ///
    /// Returns `Ok(None)` when either value is absent (unpaginated).
    pub fn from_offset(from: Option<i64>, size: Option<i64>) -> DomainResult<Option<Self>> {
        let (Some(from), Some(size)) = (from, size) else {
            return Ok(None);
        };
        if size <= 0 {
            return Err(DomainError::InvalidPagination(format!(
                "size must be positive, got {}",
                size
            )));
        }
        if from < 0 {
            return Err(DomainError::InvalidPagination(format!(
                "from must not be negative, got {}",
                from
            )));
        }
        let size = size as u64;
        Ok(Some(Self {
            page: from as u64 / size,
            size,
        }))
    }

    /// Index of the first row on this page.
    pub fn offset(&self) -> u64 {
        self.page * self.size
    }

    /// Cut this page out of an already ordered result set.
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter()
            .skip(self.offset() as usize)
            .take(self.size as usize)
            .collect()
    }
}

/// Apply an optional page to an ordered result set.
pub fn paginate<T>(rows: Vec<T>, page: Option<PageRequest>) -> Vec<T> {
    match page {
        Some(p) => p.slice(rows),
        None => rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_mean_unpaginated() {
        assert_eq!(PageRequest::from_offset(None, None).unwrap(), None);
        assert_eq!(PageRequest::from_offset(Some(0), None).unwrap(), None);
        assert_eq!(PageRequest::from_offset(None, Some(10)).unwrap(), None);
    }

    #[test]
    fn page_is_floor_of_offset_over_size() {
        let p = PageRequest::from_offset(Some(5), Some(2)).unwrap().unwrap();
        assert_eq!(p, PageRequest { page: 2, size: 2 });
        assert_eq!(p.offset(), 4);

        let p = PageRequest::from_offset(Some(0), Some(20)).unwrap().unwrap();
        assert_eq!(p.page, 0);
    }

    #[test]
    fn rejects_non_positive_size_and_negative_offset() {
        assert!(matches!(
            PageRequest::from_offset(Some(0), Some(0)),
            Err(DomainError::InvalidPagination(_))
        ));
        assert!(matches!(
            PageRequest::from_offset(Some(0), Some(-3)),
            Err(DomainError::InvalidPagination(_))
        ));
        assert!(matches!(
            PageRequest::from_offset(Some(-1), Some(10)),
            Err(DomainError::InvalidPagination(_))
        ));
    }

    #[test]
    fn pages_concatenate_without_gaps() {
        let rows: Vec<u32> = (0..7).collect();
        let mut collected = Vec::new();
        for from in (0..7).step_by(3) {
            let page = PageRequest::from_offset(Some(from), Some(3)).unwrap();
            collected.extend(paginate(rows.clone(), page));
        }
        assert_eq!(collected, rows);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = PageRequest::from_offset(Some(50), Some(10)).unwrap();
        assert!(paginate(vec![1, 2, 3], page).is_empty());
    }
}
