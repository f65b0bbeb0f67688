use super::Job;

/// A 1-indexed page of jobs, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Returns `None` when either value is zero.
    pub fn new(page: u32, limit: u32) -> Option<Self> {
        if page == 0 || limit == 0 {
            return None;
        }
        Some(Self { page, limit })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobPage {
    pub items: Vec<Job>,
    pub has_next_page: bool,
}

impl JobPage {
    /// Builds a page from a lookahead fetch of `limit + 1` rows.
    pub fn from_lookahead(mut rows: Vec<Job>, limit: u32) -> Self {
        let limit = limit as usize;
        let has_next_page = rows.len() > limit;
        rows.truncate(limit);
        Self {
            items: rows,
            has_next_page,
        }
    }
}
