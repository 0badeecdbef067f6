/*
 * Responsibility
 * - GET /reports の query / response DTO
 * - validate() で形式チェック (page >= 1, 1 <= per_page <= 100)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page == Some(0) {
            return Err("page must be >= 1");
        }
        if let Some(per_page) = self.per_page
            && !(1..=100).contains(&per_page)
        {
            return Err("per_page must be between 1 and 100");
        }
        Ok(())
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(15)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: u32,
    pub title: String,
}

/// Paginated envelope: `data` plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
    pub last_page: u32,
}

impl<T: Clone> Paginated<T> {
    /// `page` and `per_page` below 1 are treated as 1.
    pub fn from_slice(items: &[T], page: u32, per_page: u32) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = items.len();
        let start = ((page - 1) as usize).saturating_mul(per_page as usize);
        let data = items
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();
        let last_page = (total as u32).div_ceil(per_page).max(1);

        Self {
            data,
            total,
            page,
            per_page,
            last_page,
        }
    }
}
