//! Projection of the story collection into renderable rows
//!
//! Front-ends draw [`StoryRow`]s and report dismissals through the callback
//! of a [`StoryList`]; they never edit the collection themselves.

use crate::story::{Story, StoryId};

/// One renderable row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryRow<'a> {
    pub key: &'a StoryId,
    pub title: &'a str,
    /// Hyperlink target of the title, empty for self posts
    pub url: &'a str,
    pub author: &'a str,
    pub num_comments: u64,
    pub points: u64,
}

impl<'a> From<&'a Story> for StoryRow<'a> {
    fn from(story: &'a Story) -> Self {
        Self {
            key: &story.object_id,
            title: &story.title,
            url: story.link(),
            author: &story.author,
            num_comments: story.num_comments,
            points: story.points,
        }
    }
}

/// Stories plus the callback fired when one of them is dismissed.
pub struct StoryList<'a, F>
where
    F: FnMut(&Story),
{
    stories: &'a [Story],
    on_remove: F,
}

impl<'a, F> StoryList<'a, F>
where
    F: FnMut(&Story),
{
    pub fn new(stories: &'a [Story], on_remove: F) -> Self {
        Self { stories, on_remove }
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = StoryRow<'a>> {
        let stories: &'a [Story] = self.stories;
        stories.iter().map(StoryRow::from)
    }

    pub fn row(&self, index: usize) -> Option<StoryRow<'a>> {
        self.stories.get(index).map(StoryRow::from)
    }

    /// Activate the dismiss control of row `index`. The callback receives the
    /// full story record. Returns `false` for an out-of-range row.
    pub fn dismiss(&mut self, index: usize) -> bool {
        match self.stories.get(index) {
            Some(story) => {
                (self.on_remove)(story);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_story_in_order() {
        let stories = Story::seed();
        let list = StoryList::new(&stories, |_: &Story| {});
        let titles: Vec<_> = list.rows().map(|r| r.title).collect();
        assert_eq!(titles, ["React", "Redux"]);

        let row = list.row(1).unwrap();
        assert_eq!(row.url, "https://redux.js.org/");
        assert_eq!(row.author, "Dan Abramov, Andrew Clark");
        assert_eq!(row.num_comments, 2);
        assert_eq!(row.points, 5);
    }

    #[test]
    fn dismiss_hands_out_the_full_record() {
        let stories = Story::seed();
        let mut dismissed = Vec::new();
        {
            let mut list = StoryList::new(&stories, |story: &Story| dismissed.push(story.clone()));
            assert!(list.dismiss(1));
            assert!(!list.dismiss(5));
        }
        assert_eq!(dismissed, vec![stories[1].clone()]);
        // Rendering left the collection alone
        assert_eq!(stories.len(), 2);
    }
}
