use serde::Serialize;

/// Page window over `total` rows. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub per_page: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl Pagination {
    /// Missing or zero `requested` means page 1; pages past the end clamp to the last one.
    pub fn new(requested: Option<u32>, per_page: u32, total: u64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = u32::try_from(total.div_ceil(u64::from(per_page)))
            .unwrap_or(u32::MAX)
            .max(1);
        let current_page = requested.unwrap_or(1).clamp(1, total_pages);

        Self {
            current_page,
            total_pages,
            per_page,
            prev_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < total_pages).then(|| current_page + 1),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.current_page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}
