//! Reply trees are not stored: comments only know their parent id, and the
//! nested view is assembled here at read time.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Comment, CommentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

/// Builds the reply forest for one post's comments.
///
/// Roots are comments without a parent, plus orphans whose parent is not in
/// `comments`. Siblings keep input order.
pub fn build_reply_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let present: std::collections::HashSet<CommentId> = comments.iter().map(|c| c.id).collect();

    let mut children: HashMap<CommentId, Vec<Comment>> = HashMap::new();
    let mut roots = Vec::new();
    for comment in comments {
        match comment.parent_id {
            Some(parent) if present.contains(&parent) && parent != comment.id => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }

    roots.into_iter().map(|root| attach(root, &mut children)).collect()
}

fn attach(comment: Comment, children: &mut HashMap<CommentId, Vec<Comment>>) -> CommentNode {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|reply| attach(reply, children))
        .collect();
    CommentNode { comment, replies }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: CommentId, parent_id: Option<CommentId>) -> Comment {
        Comment {
            id,
            content: format!("c{id}"),
            created_at: Utc::now(),
            updated_at: None,
            owner_id: 1,
            post_id: 1,
            parent_id,
        }
    }

    fn ids(nodes: &[CommentNode]) -> Vec<CommentId> {
        nodes.iter().map(|n| n.comment.id).collect()
    }

    #[test]
    fn nests_replies_under_parents() {
        let tree = build_reply_tree(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, None),
            comment(5, Some(1)),
        ]);

        assert_eq!(ids(&tree), vec![1, 4]);
        assert_eq!(ids(&tree[0].replies), vec![2, 5]);
        assert_eq!(ids(&tree[0].replies[0].replies), vec![3]);
        assert!(tree[1].replies.is_empty());
    }

    #[test]
    fn orphans_surface_as_roots() {
        let tree = build_reply_tree(vec![comment(2, Some(99)), comment(3, Some(2))]);
        assert_eq!(ids(&tree), vec![2]);
        assert_eq!(ids(&tree[0].replies), vec![3]);
    }
}
