use crate::domain::entities::filter::{
    FilterDescriptor, FilterFamily, QueryDescriptor, SortDescriptor,
};

/// Canonical filters and sorts of one table.
///
/// Filters are keyed by `(field, family)`: picking another comparison inside
/// a family replaces the old filter instead of stacking a second one, and an
/// empty filter always means "absent". Sorts are keyed by field and are only
/// ever added or updated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    query: QueryDescriptor,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.query
    }

    pub fn filters(&self) -> &[FilterDescriptor] {
        &self.query.filters
    }

    pub fn sorts(&self) -> &[SortDescriptor] {
        &self.query.sorts
    }

    pub fn filter_for(&self, field: &str, family: FilterFamily) -> Option<&FilterDescriptor> {
        self.query
            .filters
            .iter()
            .find(|filter| filter.same_slot(field, family))
    }

    /// Merges `event` into the filter set and returns the resulting query.
    pub fn apply_filter(&mut self, event: FilterDescriptor) -> QueryDescriptor {
        let family = event.family();
        let filters = &mut self.query.filters;

        if event.is_empty() {
            let before = filters.len();
            filters.retain(|filter| !filter.same_slot(&event.field, family));
            tracing::debug!(
                field = %event.field,
                ?family,
                removed = before - filters.len(),
                "filter cleared"
            );
            return self.query.clone();
        }

        // Same (field, type) is updated in place; switching the type within a
        // family drops the old entry and appends the new one.
        match filters
            .iter()
            .position(|filter| filter.same_slot(&event.field, family))
        {
            Some(idx) if filters[idx].filter_type == event.filter_type => {
                filters[idx].values = event.values;
            }
            _ => {
                filters.retain(|filter| !filter.same_slot(&event.field, family));
                tracing::debug!(field = %event.field, filter_type = ?event.filter_type, "filter added");
                filters.push(event);
            }
        }

        filters.retain(|filter| !filter.is_empty());
        self.query.clone()
    }

    /// Adds a sort for a new field or flips the direction of an existing one.
    pub fn apply_sort(&mut self, event: SortDescriptor) -> QueryDescriptor {
        match self
            .query
            .sorts
            .iter_mut()
            .find(|sort| sort.field == event.field)
        {
            Some(sort) => sort.direction = event.direction,
            None => self.query.sorts.push(event),
        }
        self.query.clone()
    }
}
