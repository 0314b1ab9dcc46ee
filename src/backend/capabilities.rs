use serde_derive::Serialize;

use super::BackendKind;

/// 每种后端支持的功能，完全由后端类型决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub supports_accounts: bool,
    pub supports_popular_feed: bool,
    pub supports_search_filters: bool,
    pub supports_search_suggestions: bool,
    pub supports_subscriptions: bool,
    pub supports_trending_categories: bool,
    pub supports_user_playlists: bool,
    pub user_playlists_include_videos: bool,
    pub user_playlists_use_channel_endpoint: bool,
    pub user_playlists_have_visibility: bool,
    pub user_playlists_are_editable: bool,
    pub has_frontend_url: bool,
    pub search_uses_indexed_paging: bool,
    pub supports_opening_channels_by_name: bool,
    pub allows_disabling_proxying: bool,
    pub supports_opening_videos_by_id: bool,
}

impl Capabilities {
    // 每个后端一行，新增后端必须把所有字段写全
    pub const fn of(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Local => Self {
                supports_accounts: false,
                supports_popular_feed: false,
                supports_search_filters: false,
                supports_search_suggestions: true,
                supports_subscriptions: false,
                supports_trending_categories: false,
                supports_user_playlists: false,
                user_playlists_include_videos: false,
                user_playlists_use_channel_endpoint: false,
                user_playlists_have_visibility: false,
                user_playlists_are_editable: false,
                has_frontend_url: false,
                search_uses_indexed_paging: false,
                supports_opening_channels_by_name: false,
                allows_disabling_proxying: false,
                supports_opening_videos_by_id: false,
            },
            BackendKind::Invidious => Self {
                supports_accounts: true,
                supports_popular_feed: true,
                supports_search_filters: true,
                supports_search_suggestions: true,
                supports_subscriptions: true,
                supports_trending_categories: true,
                supports_user_playlists: true,
                user_playlists_include_videos: true,
                user_playlists_use_channel_endpoint: false,
                user_playlists_have_visibility: true,
                user_playlists_are_editable: true,
                has_frontend_url: false,
                search_uses_indexed_paging: true,
                supports_opening_channels_by_name: false,
                allows_disabling_proxying: true,
                supports_opening_videos_by_id: true,
            },
            BackendKind::Piped => Self {
                supports_accounts: true,
                supports_popular_feed: false,
                supports_search_filters: false,
                supports_search_suggestions: true,
                supports_subscriptions: true,
                supports_trending_categories: false,
                supports_user_playlists: true,
                user_playlists_include_videos: false,
                user_playlists_use_channel_endpoint: true,
                user_playlists_have_visibility: false,
                user_playlists_are_editable: false,
                has_frontend_url: true,
                search_uses_indexed_paging: false,
                supports_opening_channels_by_name: true,
                allows_disabling_proxying: false,
                supports_opening_videos_by_id: true,
            },
            BackendKind::PeerTube => Self {
                supports_accounts: true,
                supports_popular_feed: false,
                supports_search_filters: false,
                supports_search_suggestions: false,
                supports_subscriptions: true,
                supports_trending_categories: false,
                supports_user_playlists: true,
                user_playlists_include_videos: false,
                user_playlists_use_channel_endpoint: false,
                user_playlists_have_visibility: false,
                user_playlists_are_editable: false,
                has_frontend_url: false,
                search_uses_indexed_paging: false,
                supports_opening_channels_by_name: false,
                allows_disabling_proxying: false,
                supports_opening_videos_by_id: true,
            },
        }
    }

    // 给命令行展示用
    pub fn flags(&self) -> [(&'static str, bool); 16] {
        [
            ("supports_accounts", self.supports_accounts),
            ("supports_popular_feed", self.supports_popular_feed),
            ("supports_search_filters", self.supports_search_filters),
            ("supports_search_suggestions", self.supports_search_suggestions),
            ("supports_subscriptions", self.supports_subscriptions),
            ("supports_trending_categories", self.supports_trending_categories),
            ("supports_user_playlists", self.supports_user_playlists),
            ("user_playlists_include_videos", self.user_playlists_include_videos),
            ("user_playlists_use_channel_endpoint", self.user_playlists_use_channel_endpoint),
            ("user_playlists_have_visibility", self.user_playlists_have_visibility),
            ("user_playlists_are_editable", self.user_playlists_are_editable),
            ("has_frontend_url", self.has_frontend_url),
            ("search_uses_indexed_paging", self.search_uses_indexed_paging),
            ("supports_opening_channels_by_name", self.supports_opening_channels_by_name),
            ("allows_disabling_proxying", self.allows_disabling_proxying),
            ("supports_opening_videos_by_id", self.supports_opening_videos_by_id),
        ]
    }
}
