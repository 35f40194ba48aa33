//! 목록 조회 공통 페이지네이션

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1, max = 1_000_000, message = "page는 1-1000000 사이여야 합니다"))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100, message = "limit는 1-100 사이여야 합니다"))]
    pub limit: Option<u64>,
}

impl PageQuery {
    pub const DEFAULT_LIMIT: u64 = 20;
    pub const MAX_PAGE: u64 = 1_000_000;

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).clamp(1, Self::MAX_PAGE)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, 100)
    }

    pub fn skip(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, query: &PageQuery, total: u64) -> Self {
        let limit = query.limit();
        Self {
            items,
            page: query.page(),
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 20);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_skip_for_later_pages() {
        let query = PageQuery { page: Some(3), limit: Some(10) };
        assert_eq!(query.skip(), 20);
    }

    #[test]
    fn test_out_of_range_limit_is_rejected() {
        let query = PageQuery { page: Some(1), limit: Some(500) };
        assert!(query.validate().is_err());
        let query = PageQuery { page: Some(0), limit: None };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_largest_page_is_accepted_and_skip_stays_in_range() {
        let query = PageQuery { page: Some(PageQuery::MAX_PAGE), limit: Some(100) };
        assert!(query.validate().is_ok());
        assert_eq!(query.skip(), 99_999_900);
    }

    #[test]
    fn test_huge_page_is_rejected_without_overflow() {
        let query: PageQuery = serde_json::from_str(r#"{"page": 18446744073709551615}"#).unwrap();
        assert!(query.validate().is_err());

        // 검증을 건너뛰어도 skip 계산은 넘치지 않는다
        assert_eq!(query.page(), PageQuery::MAX_PAGE);
        assert_eq!(query.skip(), (PageQuery::MAX_PAGE - 1) * PageQuery::DEFAULT_LIMIT);
    }

    #[test]
    fn test_total_pages() {
        let query = PageQuery { page: Some(1), limit: Some(10) };
        let page = Paginated::new(vec![1, 2, 3], &query, 21);
        assert_eq!(page.total_pages, 3);

        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 21);
    }
}
