//! Filtered, sorted and paged projection of a client-held item list.

use std::borrow::Cow;
use std::fmt::Debug;

/// Items that can be searched and sorted by named text fields.
pub trait Searchable {
    type Field: Copy + Eq + Debug + 'static;

    /// Fields matched against the search term.
    fn searchable_fields() -> &'static [Self::Field];

    fn field_text(&self, field: Self::Field) -> Cow<'_, str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to the active column header.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortState<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: Copy + Eq> SortState<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    /// Clicking the active column flips its order; clicking another column
    /// sorts by it ascending.
    pub fn select(self, field: F) -> Self {
        if self.field == field {
            Self {
                field,
                order: self.order.toggled(),
            }
        } else {
            Self::new(field)
        }
    }

    /// Order to show for `field`, if it is the active sort column.
    pub fn order_of(&self, field: F) -> Option<SortOrder> {
        (self.field == field).then_some(self.order)
    }
}

/// Inputs of a view: what to search for, how to sort, which page to show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewFilters<F> {
    pub search: String,
    pub sort: Option<SortState<F>>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl<F: Copy + Eq> ViewFilters<F> {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn sorted_by(mut self, field: F, order: SortOrder) -> Self {
        self.sort = Some(SortState { field, order });
        self
    }

    /// A new search term starts over from the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn select_sort(&mut self, field: F) {
        self.sort = Some(match self.sort {
            Some(sort) => sort.select(field),
            None => SortState::new(field),
        });
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// The same sort over `rows` items with no search and a single page,
    /// for rows the backend already searched and paged.
    pub fn sort_only(&self, rows: usize) -> Self {
        Self {
            search: String::new(),
            sort: self.sort,
            page: 1,
            page_size: rows,
        }
    }
}

/// The rows visible on the requested page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionView<'a, T> {
    pub rows: Vec<&'a T>,
    pub total_pages: usize,
    /// Items matching the search, across all pages.
    pub total_matches: usize,
}

impl<T: Clone> CollectionView<'_, T> {
    pub fn to_owned_rows(&self) -> Vec<T> {
        self.rows.iter().map(|row| (*row).clone()).collect()
    }
}

/// Number of pages needed for `count` items. Zero items, or a zero page
/// size, give zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// Derive the visible page: filter by the search term (a case-insensitive
/// substring of any searchable field), sort case-insensitively by the
/// active field keeping input order for ties, then cut out the page.
///
/// The page is not clamped: a page past the end yields no rows.
pub fn derive_view<'a, T: Searchable>(
    items: &'a [T],
    filters: &ViewFilters<T::Field>,
) -> CollectionView<'a, T> {
    let needle = filters.search.to_lowercase();
    let mut matching: Vec<&T> = items
        .iter()
        .filter(|item| needle.is_empty() || matches_search(*item, &needle))
        .collect();

    if let Some(sort) = filters.sort {
        let mut keyed: Vec<(String, &T)> = matching
            .into_iter()
            .map(|item| (item.field_text(sort.field).to_lowercase(), item))
            .collect();
        // `sort_by` is stable and equal keys compare equal in both
        // directions, so ties keep their input order
        keyed.sort_by(|(a, _), (b, _)| match sort.order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        });
        matching = keyed.into_iter().map(|(_, item)| item).collect();
    }

    let total_matches = matching.len();
    let total_pages = total_pages(total_matches, filters.page_size);
    let rows = if filters.page_size == 0 {
        Vec::new()
    } else {
        matching
            .into_iter()
            .skip(filters.page.saturating_sub(1) * filters.page_size)
            .take(filters.page_size)
            .collect()
    };

    CollectionView {
        rows,
        total_pages,
        total_matches,
    }
}

fn matches_search<T: Searchable>(item: &T, needle: &str) -> bool {
    T::searchable_fields()
        .iter()
        .any(|field| item.field_text(*field).to_lowercase().contains(needle))
}

/// Position within a paged list, for Previous/Next controls that disable
/// themselves at the boundaries instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
}

impl PageWindow {
    pub fn new(page: usize, total_pages: usize) -> Self {
        Self { page, total_pages }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn previous(&self) -> usize {
        if self.has_previous() {
            self.page - 1
        } else {
            self.page
        }
    }

    pub fn next(&self) -> usize {
        if self.has_next() {
            self.page + 1
        } else {
            self.page
        }
    }

    /// The last existing page when the list shrank below `page`, for
    /// example after deleting the only row of the last page.
    pub fn clamped(&self) -> usize {
        self.page.min(self.total_pages).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: usize,
        name: String,
        tag: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Col {
        Name,
        Tag,
    }

    impl Searchable for Row {
        type Field = Col;

        fn searchable_fields() -> &'static [Col] {
            &[Col::Name, Col::Tag]
        }

        fn field_text(&self, field: Col) -> Cow<'_, str> {
            match field {
                Col::Name => Cow::Borrowed(&self.name),
                Col::Tag => Cow::Borrowed(&self.tag),
            }
        }
    }

    fn rows(names: &[(&str, &str)]) -> Vec<Row> {
        names
            .iter()
            .enumerate()
            .map(|(id, (name, tag))| Row {
                id,
                name: name.to_string(),
                tag: tag.to_string(),
            })
            .collect()
    }

    fn ids(view: &CollectionView<'_, Row>) -> Vec<usize> {
        view.rows.iter().map(|row| row.id).collect()
    }

    fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(("[a-cA-C]{0,3}", "[x-z]{0,2}"), 0..30).prop_map(
            |pairs| {
                pairs
                    .into_iter()
                    .enumerate()
                    .map(|(id, (name, tag))| Row { id, name, tag })
                    .collect()
            },
        )
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let items = rows(&[("Alpha", "x"), ("beta", "ALP"), ("gamma", "y")]);
        let mut filters = ViewFilters::new(10);
        filters.set_search("alp");

        let view = derive_view(&items, &filters);

        assert_eq!(ids(&view), [0, 1]);
        assert_eq!(view.total_matches, 2);
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let items = rows(&[("b", "1"), ("A", "2"), ("a", "3"), ("B", "4")]);

        let asc = derive_view(
            &items,
            &ViewFilters::new(10).sorted_by(Col::Name, SortOrder::Asc),
        );
        let desc = derive_view(
            &items,
            &ViewFilters::new(10).sorted_by(Col::Name, SortOrder::Desc),
        );

        assert_eq!(ids(&asc), [1, 2, 0, 3]);
        assert_eq!(ids(&desc), [0, 3, 1, 2]);
    }

    #[test]
    fn pages_are_not_clamped() {
        let items = rows(&[("a", ""), ("b", ""), ("c", "")]);
        let mut filters = ViewFilters::new(2);

        filters.set_page(2);
        let view = derive_view(&items, &filters);
        assert_eq!(ids(&view), [2]);
        assert_eq!(view.total_pages, 2);

        filters.set_page(3);
        assert!(derive_view(&items, &filters).rows.is_empty());
    }

    #[test]
    fn empty_set_has_no_pages() {
        let items: Vec<Row> = Vec::new();
        let view = derive_view(&items, &ViewFilters::new(5));
        assert_eq!(view.total_pages, 0);
        assert!(view.rows.is_empty());
        assert_eq!(total_pages(7, 0), 0);
    }

    #[test]
    fn selecting_sort_column() {
        let mut filters: ViewFilters<Col> = ViewFilters::new(5);
        filters.select_sort(Col::Name);
        assert_eq!(filters.sort, Some(SortState::new(Col::Name)));

        filters.select_sort(Col::Name);
        assert_eq!(filters.sort.map(|s| s.order), Some(SortOrder::Desc));
        filters.select_sort(Col::Name);
        assert_eq!(filters.sort.map(|s| s.order), Some(SortOrder::Asc));

        filters.select_sort(Col::Tag);
        assert_eq!(filters.sort, Some(SortState::new(Col::Tag)));
        assert_eq!(
            filters.sort.and_then(|s| s.order_of(Col::Name)),
            None
        );
    }

    #[test]
    fn search_returns_to_first_page() {
        let mut filters: ViewFilters<Col> = ViewFilters::new(5);
        filters.set_page(4);
        filters.set_search("kit");
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn page_window_boundaries() {
        let first = PageWindow::new(1, 3);
        assert!(!first.has_previous());
        assert_eq!(first.previous(), 1);
        assert_eq!(first.next(), 2);

        let last = PageWindow::new(3, 3);
        assert!(!last.has_next());
        assert_eq!(last.next(), 3);

        let empty = PageWindow::new(1, 0);
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
        assert_eq!(empty.clamped(), 1);
    }

    #[test]
    fn sort_only_keeps_every_row() {
        let items = rows(&[("b", ""), ("a", ""), ("c", "")]);
        let mut filters =
            ViewFilters::new(1).sorted_by(Col::Name, SortOrder::Desc);
        filters.set_search("zzz");
        filters.set_page(3);

        let view = derive_view(&items, &filters.sort_only(items.len()));

        assert_eq!(ids(&view), [2, 0, 1]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn deleting_the_last_row_of_the_last_page_steps_back() {
        let mut items = rows(&[("a", ""), ("b", ""), ("c", "")]);
        let mut filters = ViewFilters::<Col>::new(2);
        filters.set_page(2);

        items.pop();
        let view = derive_view(&items, &filters);
        assert!(view.rows.is_empty());

        let window = PageWindow::new(filters.page, view.total_pages);
        filters.set_page(window.clamped());
        assert_eq!(filters.page, 1);
        assert_eq!(ids(&derive_view(&items, &filters)), [0, 1]);
    }

    proptest! {
        #[test]
        fn empty_search_keeps_everything_in_order(items in arb_rows()) {
            let view = derive_view(&items, &ViewFilters::new(usize::MAX));
            let expected: Vec<usize> = items.iter().map(|row| row.id).collect();
            prop_assert_eq!(ids(&view), expected);
        }

        #[test]
        fn sorting_is_idempotent(items in arb_rows(), desc in any::<bool>()) {
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            let filters = ViewFilters::new(usize::MAX)
                .sorted_by(Col::Name, order);

            let once = derive_view(&items, &filters).to_owned_rows();
            let twice = derive_view(&once, &filters).to_owned_rows();

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn equal_keys_keep_input_order(items in arb_rows(), desc in any::<bool>()) {
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            let filters = ViewFilters::new(usize::MAX)
                .sorted_by(Col::Name, order);

            let view = derive_view(&items, &filters);

            for pair in view.rows.windows(2) {
                if pair[0].name.to_lowercase() == pair[1].name.to_lowercase() {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        #[test]
        fn page_count_is_ceiling(items in arb_rows(), page_size in 1usize..8) {
            let view = derive_view(&items, &ViewFilters::new(page_size));
            prop_assert_eq!(
                view.total_pages,
                (items.len() + page_size - 1) / page_size
            );
            let shown: usize = (1..=view.total_pages)
                .map(|page| {
                    let mut filters = ViewFilters::<Col>::new(page_size);
                    filters.set_page(page);
                    derive_view(&items, &filters).rows.len()
                })
                .sum();
            prop_assert_eq!(shown, items.len());
        }
    }
}
