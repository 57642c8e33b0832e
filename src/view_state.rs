use crate::types::{ChannelFilter, SortDirection, SortKey, SortState};
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// User-chosen filter, sort and pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter_channel: ChannelFilter,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter_channel: ChannelFilter::All,
            sort: Some(SortState {
                key: SortKey::Channel,
                direction: SortDirection::Asc,
            }),
            page: 1,
            page_size,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewIntent {
    SetFilterChannel(ChannelFilter),
    SetSort(SortState),
    SetPage(usize),
}

/// Apply one intent. Filter and sort changes always go back to page 1;
/// `SetPage` is taken verbatim, out-of-range pages just render empty.
pub fn reduce(mut state: ViewState, intent: ViewIntent) -> ViewState {
    debug!(?intent, "view intent");
    match intent {
        ViewIntent::SetFilterChannel(value) => {
            state.filter_channel = value;
            state.page = 1;
        }
        ViewIntent::SetSort(sort) => {
            state.sort = Some(sort);
            state.page = 1;
        }
        ViewIntent::SetPage(page) => {
            state.page = page;
        }
    }
    state
}

/// Header-click rule: the active key flips direction, a new key starts ascending.
pub fn next_sort(current: Option<SortState>, key: SortKey) -> SortState {
    match current {
        Some(s) if s.key == key => SortState {
            key,
            direction: s.direction.flipped(),
        },
        _ => SortState {
            key,
            direction: SortDirection::Asc,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: usize) -> ViewState {
        ViewState {
            page,
            ..ViewState::default()
        }
    }

    #[test]
    fn defaults() {
        let s = ViewState::default();
        assert_eq!(s.filter_channel, ChannelFilter::All);
        assert_eq!(s.page, 1);
        assert_eq!(s.page_size, 25);
        assert_eq!(
            s.sort,
            Some(SortState {
                key: SortKey::Channel,
                direction: SortDirection::Asc
            })
        );
    }

    #[test]
    fn filter_change_resets_page() {
        let s = reduce(
            on_page(4),
            ViewIntent::SetFilterChannel(ChannelFilter::parse("Search")),
        );
        assert_eq!(s.page, 1);
        assert_eq!(s.filter_channel, ChannelFilter::Channel("Search".into()));
    }

    #[test]
    fn sort_change_resets_page() {
        let sort = SortState {
            key: SortKey::Spend,
            direction: SortDirection::Desc,
        };
        let s = reduce(on_page(3), ViewIntent::SetSort(sort));
        assert_eq!(s.page, 1);
        assert_eq!(s.sort, Some(sort));
    }

    #[test]
    fn set_page_is_not_clamped() {
        let s = reduce(on_page(1), ViewIntent::SetPage(999));
        assert_eq!(s.page, 999);
        let s = reduce(s, ViewIntent::SetPage(0));
        assert_eq!(s.page, 0);
    }

    #[test]
    fn next_sort_toggles_active_key() {
        let asc = next_sort(None, SortKey::Spend);
        assert_eq!(asc.direction, SortDirection::Asc);
        let desc = next_sort(Some(asc), SortKey::Spend);
        assert_eq!(desc.direction, SortDirection::Desc);
        let back = next_sort(Some(desc), SortKey::Spend);
        assert_eq!(back.direction, SortDirection::Asc);
    }

    #[test]
    fn next_sort_new_key_starts_ascending() {
        let current = SortState {
            key: SortKey::Spend,
            direction: SortDirection::Desc,
        };
        let s = next_sort(Some(current), SortKey::Clicks);
        assert_eq!(s.key, SortKey::Clicks);
        assert_eq!(s.direction, SortDirection::Asc);
    }

    #[test]
    fn parse_all_filter() {
        assert_eq!(ChannelFilter::parse("all"), ChannelFilter::All);
        assert_eq!(ChannelFilter::All.to_string(), "all");
    }
}
