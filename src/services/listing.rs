use crate::models::Searchable;

/// One page of a filtered list, with the effective page number after
/// clamping. `total` counts every row that matched the search, not just
/// the visible slice.
#[derive(Debug, PartialEq)]
pub struct PageView<'a, T> {
    pub rows: Vec<&'a T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Case-insensitive substring match across the row's searchable fields.
/// An empty term matches everything.
pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], search: &str) -> Vec<&'a T> {
    let needle = search.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn visible_page<'a, T: Searchable>(
    rows: &'a [T],
    search: &str,
    page: usize,
    page_size: usize,
) -> PageView<'a, T> {
    let page_size = page_size.max(1);
    let filtered = filter_rows(rows, search);
    let total = filtered.len();
    let total_pages = ((total + page_size - 1) / page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;

    PageView {
        rows: filtered.into_iter().skip(start).take(page_size).collect(),
        page,
        total_pages,
        total,
    }
}

/// Search term and page the admin currently has selected for one list.
/// Changing the term always lands back on the first page; the page
/// requested alongside a term change is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSelection {
    pub search: String,
    pub page: usize,
}

impl Default for ListSelection {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
        }
    }
}

impl ListSelection {
    pub fn apply(&mut self, search: Option<&str>, page: Option<usize>) -> (String, usize) {
        let term_changed = match search {
            Some(s) if s != self.search => {
                self.search = s.to_string();
                true
            }
            _ => false,
        };

        if term_changed {
            self.page = 1;
        } else if let Some(p) = page {
            self.page = p.max(1);
        }

        (self.search.clone(), self.page)
    }
}
