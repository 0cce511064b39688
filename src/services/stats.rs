//! Blog collection statistics
//!
//! Pure aggregates over an in-memory blog list: total likes, the most-liked
//! blog, and per-author groupings. No I/O and no auth; callers load the
//! collection first and tests drive these directly.
//!
//! Blogs without an author are grouped under an empty author key. Ties are
//! broken by input order: the earliest blog (or earliest-seen author group)
//! wins.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::Blog;

/// An author paired with how many blogs they wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogCount {
    /// Author name; empty for blogs without an author
    pub author: String,
    /// Number of blogs in the collection by this author
    pub blogs: usize,
}

/// An author paired with their accumulated likes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    /// Author name; empty for blogs without an author
    pub author: String,
    /// Sum of likes over this author's blogs
    pub likes: i64,
}

/// Sum of likes across the collection. 0 for an empty collection.
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|blog| blog.likes).sum()
}

/// The blog with the most likes, or `None` for an empty collection.
///
/// Ties go to the blog that appears first.
pub fn favourite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().fold(None, |best: Option<&Blog>, blog| match best {
        None => Some(blog),
        Some(current) if blog.likes > current.likes => Some(blog),
        keep => keep,
    })
}

/// The author with the most blogs, or `None` for an empty collection.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogCount> {
    leading_group(blogs, |_| 1).map(|(author, count)| AuthorBlogCount {
        author: author.to_string(),
        blogs: count as usize,
    })
}

/// The author with the most accumulated likes, or `None` for an empty
/// collection.
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    leading_group(blogs, |blog| blog.likes).map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

fn author_key(blog: &Blog) -> &str {
    blog.author.as_deref().unwrap_or("")
}

/// Group blogs by author, total `value` per group, and return the group
/// with the largest total.
///
/// A single max-tracking pass cannot break ties correctly, because a later
/// blog can raise a later group past an earlier one before the earlier
/// group is complete. So: aggregate first, then scan authors in input order
/// and keep the first strictly-largest total.
fn leading_group<F>(blogs: &[Blog], value: F) -> Option<(&str, i64)>
where
    F: Fn(&Blog) -> i64,
{
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for blog in blogs {
        *totals.entry(author_key(blog)).or_insert(0) += value(blog);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut best: Option<(&str, i64)> = None;

    for blog in blogs {
        let author = author_key(blog);
        if !seen.insert(author) {
            continue;
        }
        let total = totals[author];
        match best {
            Some((_, max)) if total <= max => {}
            _ => best = Some((author, total)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(title: &str, author: Option<&str>, likes: i64) -> Blog {
        Blog::new(
            title.to_string(),
            author.map(String::from),
            "https://example.com".to_string(),
            likes,
            1,
        )
    }

    fn catalog() -> Vec<Blog> {
        vec![
            blog("React patterns", Some("Michael Chan"), 7),
            blog(
                "Go To Statement Considered Harmful",
                Some("Edsger W. Dijkstra"),
                5,
            ),
            blog(
                "Canonical string reduction",
                Some("Edsger W. Dijkstra"),
                12,
            ),
            blog("First class tests", Some("Robert C. Martin"), 10),
            blog("TDD harms architecture", Some("Robert C. Martin"), 0),
            blog("Type wars", Some("Robert C. Martin"), 2),
        ]
    }

    #[test]
    fn test_total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn test_total_likes_of_one_blog_equals_its_likes() {
        let blogs = vec![blog("Canonical string reduction", Some("Edsger W. Dijkstra"), 5)];

        assert_eq!(total_likes(&blogs), 5);
    }

    #[test]
    fn test_total_likes_of_bigger_list() {
        assert_eq!(total_likes(&catalog()), 36);
    }

    #[test]
    fn test_favourite_blog_of_empty_list_is_none() {
        assert!(favourite_blog(&[]).is_none());
    }

    #[test]
    fn test_favourite_blog_picks_max_likes() {
        let blogs = catalog();

        let favourite = favourite_blog(&blogs).expect("Should find a favourite");

        assert_eq!(favourite.title, "Canonical string reduction");
        assert_eq!(favourite.likes, 12);
    }

    #[test]
    fn test_favourite_blog_of_one_blog_is_that_blog() {
        let blogs = vec![blog("Only entry", Some("Solo Author"), 3)];

        let favourite = favourite_blog(&blogs).expect("Should find a favourite");

        assert_eq!(favourite.title, "Only entry");
    }

    #[test]
    fn test_favourite_blog_tie_goes_to_first() {
        let blogs = vec![
            blog("first with ten", Some("A"), 10),
            blog("second with ten", Some("B"), 10),
            blog("small", Some("C"), 1),
        ];

        let favourite = favourite_blog(&blogs).expect("Should find a favourite");

        assert_eq!(favourite.title, "first with ten");
    }

    #[test]
    fn test_most_blogs_of_empty_list_is_none() {
        assert!(most_blogs(&[]).is_none());
    }

    #[test]
    fn test_most_blogs_counts_per_author() {
        let top = most_blogs(&catalog()).expect("Should find a top author");

        assert_eq!(
            top,
            AuthorBlogCount {
                author: "Robert C. Martin".to_string(),
                blogs: 3,
            }
        );
    }

    #[test]
    fn test_most_blogs_tie_goes_to_first_seen_author() {
        let blogs = vec![
            blog("a1", Some("A"), 0),
            blog("b1", Some("B"), 0),
            blog("b2", Some("B"), 0),
            blog("a2", Some("A"), 0),
        ];

        let top = most_blogs(&blogs).expect("Should find a top author");

        assert_eq!(top.author, "A");
        assert_eq!(top.blogs, 2);
    }

    #[test]
    fn test_most_blogs_groups_missing_author_under_empty_key() {
        let blogs = vec![
            blog("anonymous one", None, 1),
            blog("anonymous two", None, 1),
            blog("named", Some("A"), 1),
        ];

        let top = most_blogs(&blogs).expect("Should find a top author");

        assert_eq!(top.author, "");
        assert_eq!(top.blogs, 2);
    }

    #[test]
    fn test_most_likes_of_empty_list_is_none() {
        assert!(most_likes(&[]).is_none());
    }

    #[test]
    fn test_most_likes_sums_per_author() {
        let top = most_likes(&catalog()).expect("Should find a top author");

        assert_eq!(
            top,
            AuthorLikes {
                author: "Edsger W. Dijkstra".to_string(),
                likes: 17,
            }
        );
    }

    #[test]
    fn test_most_likes_tie_goes_to_first_seen_author() {
        let blogs = vec![
            blog("a1", Some("A"), 5),
            blog("b1", Some("B"), 2),
            blog("b2", Some("B"), 3),
        ];

        let top = most_likes(&blogs).expect("Should find a top author");

        assert_eq!(top.author, "A");
        assert_eq!(top.likes, 5);
    }

    #[test]
    fn test_most_likes_late_overtake_still_wins() {
        // B's total only passes A's on the last entry
        let blogs = vec![
            blog("a1", Some("A"), 5),
            blog("b1", Some("B"), 2),
            blog("b2", Some("B"), 4),
        ];

        let top = most_likes(&blogs).expect("Should find a top author");

        assert_eq!(top.author, "B");
        assert_eq!(top.likes, 6);
    }
}
