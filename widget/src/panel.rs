//! # Filter panel
//!
//! State machine for the posts page: a search box with a suggestion
//! dropdown, a pair of views sliders, and the result list.
//!
//! Two filters compose with logical AND:
//! - the text filter runs locally against the loaded collection on every
//!   keystroke;
//! - the range filter (plus the current term) is submitted to the server
//!   via [`FilterPanel::apply`], which returns a sequenced [`PostQuery`].
//!
//! Every query gets a sequence number and [`FilterPanel::absorb`] drops any
//! response that is not the latest issued, so overlapping in-flight fetches
//! cannot overwrite the rendered state with a stale result.

use crate::{Post, PostQuery};

pub const SUGGESTION_LIMIT: usize = 5;

const DEFAULT_MIN_VIEWS: i64 = 0;
const DEFAULT_MAX_VIEWS: i64 = 10_000;

#[derive(Debug, Clone)]
pub struct FilterPanel {
    all_posts: Vec<Post>,
    filtered: Vec<Post>,
    search_term: String,
    slider_floor: i64,
    slider_ceil: i64,
    min_views: i64,
    max_views: i64,
    suggestions_open: bool,
    issued: u64,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self {
            all_posts: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            slider_floor: DEFAULT_MIN_VIEWS,
            slider_ceil: DEFAULT_MAX_VIEWS,
            min_views: DEFAULT_MIN_VIEWS,
            max_views: DEFAULT_MAX_VIEWS,
            suggestions_open: false,
            issued: 0,
        }
    }

    /// Replace the loaded collection and derive the slider range from its
    /// view counts.
    pub fn load(&mut self, posts: Vec<Post>) {
        self.all_posts = posts;
        self.filtered = self.all_posts.clone();
        self.reset_slider_range();
    }

    fn reset_slider_range(&mut self) {
        if self.all_posts.is_empty() {
            return;
        }

        let views = self.all_posts.iter().map(|post| post.views);
        self.slider_floor = views.clone().min().unwrap();
        self.slider_ceil = views.max().unwrap();
        self.min_views = self.slider_floor;
        self.max_views = self.slider_ceil;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
        self.suggestions_open = !self.search_term.is_empty();
        self.refilter();
    }

    fn refilter(&mut self) {
        if self.search_term.is_empty() {
            self.filtered = self.all_posts.clone();
            return;
        }

        let term = self.search_term.to_lowercase();
        self.filtered = self
            .all_posts
            .iter()
            .filter(|post| post.title.to_lowercase().contains(&term))
            .cloned()
            .collect();
    }

    /// Up to [`SUGGESTION_LIMIT`] deduplicated titles containing the
    /// current term, in collection order. An empty term suggests nothing.
    pub fn suggestions(&self) -> Vec<String> {
        if self.search_term.is_empty() {
            return Vec::new();
        }

        let term = self.search_term.to_lowercase();
        let mut titles: Vec<String> = Vec::new();

        for post in &self.all_posts {
            if titles.len() == SUGGESTION_LIMIT {
                break;
            }
            if post.title.to_lowercase().contains(&term) && !titles.contains(&post.title) {
                titles.push(post.title.clone());
            }
        }

        titles
    }

    pub fn select_suggestion(&mut self, title: &str) {
        self.set_search(title);
        self.suggestions_open = false;
    }

    /// Outside click or Escape.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions_open = false;
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_open
    }

    // min <= max holds after every slider event: each setter drags the
    // other bound along when the two would cross.
    pub fn set_min_views(&mut self, value: i64) {
        self.min_views = value.clamp(self.slider_floor, self.slider_ceil);
        if self.min_views > self.max_views {
            self.max_views = self.min_views;
        }
    }

    pub fn set_max_views(&mut self, value: i64) {
        self.max_views = value.clamp(self.slider_floor, self.slider_ceil);
        if self.max_views < self.min_views {
            self.min_views = self.max_views;
        }
    }

    /// Build the server query for the current bounds and term, tagged with
    /// a fresh sequence number.
    pub fn apply(&mut self) -> (u64, PostQuery) {
        self.issued += 1;
        let query = PostQuery {
            views_gte: Some(self.min_views),
            views_lte: Some(self.max_views),
            title_like: (!self.search_term.is_empty()).then(|| self.search_term.clone()),
        };
        (self.issued, query)
    }

    /// Accept a server response for the query tagged `seq`. Returns false
    /// and leaves the rendered state untouched unless `seq` is the latest
    /// issued sequence number.
    pub fn absorb(&mut self, seq: u64, posts: Vec<Post>) -> bool {
        if seq != self.issued {
            return false;
        }
        self.filtered = posts;
        true
    }

    /// Reset the term, rederive the slider range, and show the whole
    /// collection again.
    pub fn clear(&mut self) {
        self.search_term.clear();
        self.suggestions_open = false;
        self.reset_slider_range();
        self.filtered = self.all_posts.clone();
    }

    pub fn results(&self) -> &[Post] {
        &self.filtered
    }

    pub fn no_results(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn min_views(&self) -> i64 {
        self.min_views
    }

    pub fn max_views(&self) -> i64 {
        self.max_views
    }

    pub fn slider_range(&self) -> (i64, i64) {
        (self.slider_floor, self.slider_ceil)
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterPanel, SUGGESTION_LIMIT};
    use crate::Post;

    fn post(id: &str, title: &str, views: i64) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            views,
        }
    }

    fn loaded_panel() -> FilterPanel {
        let mut panel = FilterPanel::new();
        panel.load(vec![
            post("1", "Alpha news", 5),
            post("2", "Beta update", 20),
            post("3", "Gamma alpha", 100),
        ]);
        panel
    }

    #[test]
    fn slider_range_derives_from_loaded_views() {
        let panel = loaded_panel();

        assert_eq!(panel.slider_range(), (5, 100));
        assert_eq!(panel.min_views(), 5);
        assert_eq!(panel.max_views(), 100);
    }

    #[test]
    fn empty_load_keeps_default_range() {
        let mut panel = FilterPanel::new();
        panel.load(Vec::new());

        assert_eq!(panel.slider_range(), (0, 10_000));
    }

    #[test]
    fn min_never_exceeds_max_across_events() {
        let mut panel = loaded_panel();

        let events: [(&str, i64); 7] = [
            ("min", 50),
            ("max", 30),
            ("min", 90),
            ("max", 10),
            ("min", 5),
            ("max", 100),
            ("min", 100),
        ];

        for (slider, value) in events {
            match slider {
                "min" => panel.set_min_views(value),
                _ => panel.set_max_views(value),
            }
            assert!(
                panel.min_views() <= panel.max_views(),
                "violated after {slider} = {value}"
            );
        }
    }

    #[test]
    fn raising_min_drags_max_up() {
        let mut panel = loaded_panel();
        panel.set_max_views(20);
        panel.set_min_views(60);

        assert_eq!(panel.min_views(), 60);
        assert_eq!(panel.max_views(), 60);
    }

    #[test]
    fn lowering_max_drags_min_down() {
        let mut panel = loaded_panel();
        panel.set_min_views(60);
        panel.set_max_views(10);

        assert_eq!(panel.min_views(), 10);
        assert_eq!(panel.max_views(), 10);
    }

    #[test]
    fn slider_values_clamp_to_data_range() {
        let mut panel = loaded_panel();
        panel.set_min_views(-50);
        panel.set_max_views(5_000);

        assert_eq!(panel.min_views(), 5);
        assert_eq!(panel.max_views(), 100);
    }

    #[test]
    fn search_filters_locally_and_case_insensitively() {
        let mut panel = loaded_panel();
        panel.set_search("ALPHA");

        let titles: Vec<&str> = panel.results().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha news", "Gamma alpha"]);
    }

    #[test]
    fn zero_match_term_yields_empty_results_and_suggestions() {
        let mut panel = loaded_panel();
        panel.set_search("zzz");

        assert!(panel.no_results());
        assert!(panel.suggestions().is_empty());
    }

    #[test]
    fn clearing_the_term_restores_the_collection() {
        let mut panel = loaded_panel();
        panel.set_search("beta");
        panel.set_search("");

        assert_eq!(panel.results().len(), 3);
    }

    #[test]
    fn suggestions_deduplicate_and_cap_at_limit() {
        let mut panel = FilterPanel::new();
        let mut posts = vec![post("0", "Release notes", 1), post("1", "Release notes", 2)];
        for i in 0..10 {
            posts.push(post(&i.to_string(), &format!("Release {i}"), i));
        }
        panel.load(posts);
        panel.set_search("release");

        let suggestions = panel.suggestions();
        assert_eq!(suggestions.len(), SUGGESTION_LIMIT);
        assert_eq!(suggestions[0], "Release notes");
        assert_eq!(suggestions[1], "Release 0");
    }

    #[test]
    fn selecting_a_suggestion_reapplies_the_text_filter() {
        let mut panel = loaded_panel();
        panel.set_search("alp");
        assert!(panel.suggestions_visible());

        panel.select_suggestion("Beta update");

        assert_eq!(panel.search_term(), "Beta update");
        assert_eq!(panel.results().len(), 1);
        assert!(!panel.suggestions_visible());
    }

    #[test]
    fn dropdown_dismisses_and_reopens_on_typing() {
        let mut panel = loaded_panel();
        panel.set_search("alp");
        panel.dismiss_suggestions();
        assert!(!panel.suggestions_visible());

        panel.set_search("alph");
        assert!(panel.suggestions_visible());

        panel.set_search("");
        assert!(!panel.suggestions_visible());
    }

    #[test]
    fn apply_carries_bounds_and_nonempty_term() {
        let mut panel = loaded_panel();
        panel.set_min_views(10);
        panel.set_search("alpha");

        let (seq, query) = panel.apply();
        assert_eq!(seq, 1);
        assert_eq!(query.views_gte, Some(10));
        assert_eq!(query.views_lte, Some(100));
        assert_eq!(query.title_like.as_deref(), Some("alpha"));

        panel.set_search("");
        let (_, query) = panel.apply();
        assert_eq!(query.title_like, None);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut panel = loaded_panel();
        let (first, _) = panel.apply();
        let (second, _) = panel.apply();

        assert!(!panel.absorb(first, vec![post("9", "Stale", 1)]));
        assert_eq!(panel.results().len(), 3);

        assert!(panel.absorb(second, vec![post("2", "Beta update", 20)]));
        assert_eq!(panel.results().len(), 1);
    }

    #[test]
    fn clear_resets_term_bounds_and_results() {
        let mut panel = loaded_panel();
        panel.set_search("beta");
        panel.set_min_views(50);
        panel.clear();

        assert_eq!(panel.search_term(), "");
        assert_eq!(panel.min_views(), 5);
        assert_eq!(panel.max_views(), 100);
        assert_eq!(panel.results().len(), 3);
    }

    #[test]
    fn loaded_range_query_agrees_with_local_matching() {
        let mut panel = loaded_panel();
        panel.set_min_views(10);

        let (_, query) = panel.apply();
        let kept: Vec<i64> = panel
            .results()
            .iter()
            .filter(|p| query.matches(p))
            .map(|p| p.views)
            .collect();

        assert_eq!(kept, vec![20, 100]);
    }
}
