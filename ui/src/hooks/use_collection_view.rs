use std::rc::Rc;

use client_state::{
    PageWindow, Searchable, SortOrder, ViewFilters, derive_view,
};
use yew::prelude::*;

/// Visible rows of a client-side table and the controls that change them.
pub struct UseCollectionViewHandle<T: Searchable> {
    pub rows: Rc<Vec<T>>,
    pub total_pages: usize,
    pub total_matches: usize,
    pub filters: ViewFilters<T::Field>,
    pub set_search: Callback<String>,
    pub select_sort: Callback<T::Field>,
    pub set_page: Callback<usize>,
}

impl<T: Searchable> UseCollectionViewHandle<T> {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.filters.page, self.total_pages)
    }

    pub fn sort_order_of(&self, field: T::Field) -> Option<SortOrder> {
        self.filters.sort.and_then(|sort| sort.order_of(field))
    }
}

/// Search, sort and page `items` in the browser.
///
/// The view is recomputed only when the items or the filters change.
#[hook]
pub fn use_collection_view<T>(
    items: Rc<Vec<T>>,
    initial: ViewFilters<T::Field>,
) -> UseCollectionViewHandle<T>
where
    T: Searchable + Clone + PartialEq + 'static,
    T::Field: 'static,
{
    let filters = use_state(move || initial);

    let view = use_memo(
        (items, (*filters).clone()),
        |(items, filters)| {
            let view = derive_view(items.as_slice(), filters);
            (
                Rc::new(view.to_owned_rows()),
                view.total_pages,
                view.total_matches,
            )
        },
    );
    let (rows, total_pages, total_matches) = (*view).clone();

    // Step back when the list shrank below the selected page
    {
        let filters = filters.clone();
        use_effect_with(total_pages, move |&total_pages| {
            let page = PageWindow::new(filters.page, total_pages).clamped();
            if page != filters.page {
                let mut next = (*filters).clone();
                next.set_page(page);
                filters.set(next);
            }
        });
    }

    let set_search = {
        let filters = filters.clone();
        Callback::from(move |search: String| {
            let mut next = (*filters).clone();
            next.set_search(search);
            filters.set(next);
        })
    };

    let select_sort = {
        let filters = filters.clone();
        Callback::from(move |field| {
            let mut next = (*filters).clone();
            next.select_sort(field);
            filters.set(next);
        })
    };

    let set_page = {
        let filters = filters.clone();
        Callback::from(move |page| {
            let mut next = (*filters).clone();
            next.set_page(page);
            filters.set(next);
        })
    };

    UseCollectionViewHandle {
        rows,
        total_pages,
        total_matches,
        filters: (*filters).clone(),
        set_search,
        select_sort,
        set_page,
    }
}
